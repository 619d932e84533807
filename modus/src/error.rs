use crate::ast::Span;
use std::sync::Arc;
use thiserror::Error;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

impl ErrorDetails {
    fn suffix(&self) -> String {
        let mut out = String::new();
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!(" (suggestion: {})", suggestion));
        }
        out.push_str(&format!(
            " at {}:{}:{}",
            self.source_id, self.span.line, self.span.col
        ));
        out
    }
}

/// Error types for the knowledge base and its text reader
#[derive(Debug, Clone, Error)]
pub enum ModusError {
    /// Parse error with source location
    #[error("Parse error: {}{}", .0.message, .0.suffix())]
    Parse(Box<ErrorDetails>),

    /// A well-formed source declaration that does not describe a valid item
    #[error("Semantic error: {}{}", .0.message, .0.suffix())]
    Semantic(Box<ErrorDetails>),

    /// `ask` was called with something other than a fact
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A fact containing variables; only queries may contain them
    #[error("Non-ground fact: {0}")]
    NonGroundFact(String),

    /// A rule that cannot take part in chaining
    #[error("Malformed rule: {0}")]
    MalformedRule(String),

    /// Instantiation met a variable with no binding
    #[error("Unbound variable ?{variable} while instantiating {statement}")]
    UnboundVariable { variable: String, statement: String },

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// Engine error without specific source location
    #[error("Engine error: {0}")]
    Engine(String),
}

impl ModusError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a semantic error with suggestion
    pub fn semantic_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Semantic(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            ModusError::Parse(details) | ModusError::Semantic(details) => Some(details),
            _ => None,
        }
    }
}
