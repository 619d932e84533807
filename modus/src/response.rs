use crate::matcher::Bindings;
use crate::semantic::Statement;
use serde::Serialize;
use std::fmt;

/// One successful match of a query against a stored fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub bindings: Bindings,
    /// The stored facts the bindings were read from
    pub facts: Vec<Statement>,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bindings)?;
        for fact in &self.facts {
            write!(f, " <- {}", fact)?;
        }
        Ok(())
    }
}
