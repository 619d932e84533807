//! Reader for knowledge base sources.
//!
//! Turns `fact:` and `rule:` declarations into [`Item`]s. Variables are written
//! `?name`; everything else inside a statement is a constant.

use crate::ast::Span;
use crate::error::ModusError;
use crate::resource_limits::ResourceLimits;
use crate::semantic::{Item, Statement};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod statements;

#[derive(Parser)]
#[grammar = "src/parser/modus.pest"]
pub struct ModusParser;

/// Source identity and text, carried along so errors can point into the input
pub(crate) struct SourceContext<'a> {
    pub source_id: String,
    pub source_text: Arc<str>,
    pub limits: &'a ResourceLimits,
}

/// Parse a whole source into its declarations, in source order
pub fn parse(
    content: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> Result<Vec<Item>, ModusError> {
    // Check file size limit
    if content.len() > limits.max_file_size_bytes {
        return Err(ModusError::ResourceLimitExceeded {
            limit_name: "max_file_size_bytes".to_string(),
            limit_value: format!(
                "{} bytes ({} MB)",
                limits.max_file_size_bytes,
                limits.max_file_size_bytes / (1024 * 1024)
            ),
            actual_value: format!(
                "{} bytes ({:.2} MB)",
                content.len(),
                content.len() as f64 / (1024.0 * 1024.0)
            ),
            suggestion: "Reduce file size or split the knowledge base into multiple files"
                .to_string(),
        });
    }

    let ctx = SourceContext {
        source_id: source_id.unwrap_or_else(|| "<input>".to_string()),
        source_text: Arc::from(content),
        limits,
    };

    let file = ModusParser::parse(Rule::kb_file, content)
        .map_err(|e| pest_error(e, &ctx))?
        .next()
        .ok_or_else(|| ModusError::Engine("Grammar error: empty parse of kb_file".to_string()))?;

    let mut items = Vec::new();
    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::fact_decl | Rule::rule_decl => items.push(statements::parse_declaration(pair, &ctx)?),
            Rule::EOI => {}
            other => {
                return Err(ModusError::Engine(format!(
                    "Grammar error: unexpected {:?} in kb_file",
                    other
                )))
            }
        }
    }
    Ok(items)
}

/// Parse a single statement such as `(isa ?x block)`, typically a query
pub fn parse_statement(text: &str, limits: &ResourceLimits) -> Result<Statement, ModusError> {
    let ctx = SourceContext {
        source_id: "<query>".to_string(),
        source_text: Arc::from(text),
        limits,
    };
    let statement = single_inner(Rule::query, text, &ctx)?;
    statements::parse_statement(statement, &ctx)
}

/// Parse one `fact:` or `rule:` declaration; a bare statement is read as a fact
pub fn parse_item(text: &str, limits: &ResourceLimits) -> Result<Item, ModusError> {
    let ctx = SourceContext {
        source_id: "<item>".to_string(),
        source_text: Arc::from(text),
        limits,
    };
    let pair = single_inner(Rule::item_input, text, &ctx)?;
    match pair.as_rule() {
        Rule::statement => Ok(Item::fact(statements::parse_statement(pair, &ctx)?)),
        _ => statements::parse_declaration(pair, &ctx),
    }
}

fn single_inner<'i>(
    rule: Rule,
    text: &'i str,
    ctx: &SourceContext<'_>,
) -> Result<Pair<'i, Rule>, ModusError> {
    ModusParser::parse(rule, text)
        .map_err(|e| pest_error(e, ctx))?
        .next()
        .and_then(|pair| pair.into_inner().next())
        .ok_or_else(|| ModusError::Engine(format!("Grammar error: empty parse of {:?}", rule)))
}

fn pest_error(e: pest::error::Error<Rule>, ctx: &SourceContext<'_>) -> ModusError {
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((line, col), _) => (line, col),
    };

    ModusError::parse(
        e.variant.message().to_string(),
        Span {
            start,
            end,
            line,
            col,
        },
        ctx.source_id.clone(),
        ctx.source_text.clone(),
    )
}
