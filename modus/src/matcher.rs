//! One-way matching of stored statements against patterns, and substitution of the
//! resulting bindings back into patterns.

use crate::error::ModusError;
use crate::semantic::{Statement, Term};
use crate::ModusResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Variable-to-term substitution produced by a single match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    map: BTreeMap<String, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.map.get(variable)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.map.iter().map(|(name, term)| (name.as_str(), term))
    }

    /// Bind `variable` to `term`. Returns false if it is already bound to something else.
    fn bind(&mut self, variable: &str, term: &Term) -> bool {
        match self.map.get(variable) {
            Some(bound) => bound == term,
            None => {
                self.map.insert(variable.to_string(), term.clone());
                true
            }
        }
    }

    /// Substitute bound variables, leaving unbound ones in place
    pub fn apply(&self, pattern: &Statement) -> Statement {
        let terms = pattern
            .terms()
            .iter()
            .map(|term| match term {
                Term::Variable(name) => self.map.get(name).cloned().unwrap_or_else(|| term.clone()),
                Term::Constant(_) => term.clone(),
            })
            .collect();
        Statement::new(terms)
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map.is_empty() {
            return write!(f, "{{}}");
        }
        let parts: Vec<String> = self
            .map
            .iter()
            .map(|(name, term)| format!("?{}: {}", name, term))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Match `ground` against `pattern`, binding only the pattern's variables.
///
/// Returns `None` on arity mismatch, on differing constants, or when a variable
/// would be bound to two different terms. A variable-free pattern equal to
/// `ground` matches with empty bindings.
pub fn match_statement(ground: &Statement, pattern: &Statement) -> Option<Bindings> {
    if ground.arity() != pattern.arity() {
        return None;
    }

    let mut bindings = Bindings::new();
    for (term, pattern_term) in ground.terms().iter().zip(pattern.terms()) {
        let consistent = match pattern_term {
            Term::Variable(name) => bindings.bind(name, term),
            Term::Constant(_) => pattern_term == term,
        };
        if !consistent {
            return None;
        }
    }

    Some(bindings)
}

/// Substitute every variable of `pattern`; a variable with no binding is an error
pub fn instantiate(pattern: &Statement, bindings: &Bindings) -> ModusResult<Statement> {
    if let Some(unbound) = pattern.variables().find(|name| bindings.get(name).is_none()) {
        return Err(ModusError::UnboundVariable {
            variable: unbound.to_string(),
            statement: pattern.to_string(),
        });
    }
    Ok(bindings.apply(pattern))
}
