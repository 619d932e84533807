use super::{Rule, SourceContext};
use crate::ast::Span;
use crate::error::ModusError;
use crate::semantic::{Item, Statement, Term};
use pest::iterators::Pair;

pub(crate) fn parse_declaration(
    pair: Pair<Rule>,
    ctx: &SourceContext<'_>,
) -> Result<Item, ModusError> {
    match pair.as_rule() {
        Rule::fact_decl => parse_fact_declaration(pair, ctx),
        Rule::rule_decl => parse_rule_declaration(pair, ctx),
        other => Err(ModusError::Engine(format!(
            "Grammar error: expected a declaration, found {:?}",
            other
        ))),
    }
}

fn parse_fact_declaration(pair: Pair<Rule>, ctx: &SourceContext<'_>) -> Result<Item, ModusError> {
    let span = Span::from_pest_span(pair.as_span());
    let statement = pair.into_inner().next().ok_or_else(|| {
        ModusError::Engine("Grammar error: fact_decl missing statement".to_string())
    })?;
    let statement = parse_statement(statement, ctx)?;

    if let Some(variable) = statement.variables().next() {
        return Err(ModusError::semantic_with_suggestion(
            format!("fact {} contains variable ?{}", statement, variable),
            span,
            ctx.source_id.clone(),
            ctx.source_text.clone(),
            "Facts must be ground; write a rule to state something about every value",
        ));
    }
    Ok(Item::fact(statement))
}

fn parse_rule_declaration(pair: Pair<Rule>, ctx: &SourceContext<'_>) -> Result<Item, ModusError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut lhs = Vec::new();
    let mut rhs = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::antecedents => {
                for antecedent in inner_pair.into_inner() {
                    lhs.push(parse_statement(antecedent, ctx)?);
                }
            }
            Rule::statement => rhs = Some(parse_statement(inner_pair, ctx)?),
            _ => {}
        }
    }

    let rhs = rhs.ok_or_else(|| {
        ModusError::Engine("Grammar error: rule_decl missing consequent".to_string())
    })?;

    Item::rule(lhs, rhs).map_err(|e| match e {
        ModusError::MalformedRule(message) => ModusError::semantic_with_suggestion(
            message,
            span,
            ctx.source_id.clone(),
            ctx.source_text.clone(),
            "Every variable in the consequent must appear in an antecedent",
        ),
        other => other,
    })
}

pub(crate) fn parse_statement(
    pair: Pair<Rule>,
    ctx: &SourceContext<'_>,
) -> Result<Statement, ModusError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut terms = Vec::new();

    for inner_pair in pair.into_inner() {
        let term = match inner_pair.as_rule() {
            Rule::constant => Term::constant(inner_pair.as_str()),
            Rule::variable => Term::variable(&inner_pair.as_str()[1..]),
            other => {
                return Err(ModusError::Engine(format!(
                    "Grammar error: unexpected {:?} in statement",
                    other
                )))
            }
        };
        terms.push(term);
    }

    if terms.len() > ctx.limits.max_statement_terms {
        return Err(ModusError::ResourceLimitExceeded {
            limit_name: "max_statement_terms".to_string(),
            limit_value: ctx.limits.max_statement_terms.to_string(),
            actual_value: format!(
                "{} (at {}:{}:{})",
                terms.len(),
                ctx.source_id,
                span.line,
                span.col
            ),
            suggestion: "Split the statement into several smaller ones".to_string(),
        });
    }

    Ok(Statement::new(terms))
}
