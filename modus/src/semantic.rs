use crate::error::ModusError;
use crate::ModusResult;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A single position in a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Term {
    /// Opaque symbolic value
    Constant(String),
    /// Placeholder, scoped to a single match or instantiation
    Variable(String),
}

impl Term {
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Term::Constant(name) | Term::Variable(name) => name,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(name) => write!(f, "{}", name),
            Term::Variable(name) => write!(f, "?{}", name),
        }
    }
}

/// An ordered predicate expression: the predicate symbol followed by its arguments.
///
/// Equality is structural. Two statements are equal when they hold the same terms
/// in the same order, regardless of where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Statement {
    terms: Vec<Term>,
}

impl Statement {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Build a statement from `?`-prefixed variables and bare constants.
    ///
    /// ```
    /// use modus::{Statement, Term};
    /// let s = Statement::from_symbols(&["isa", "?x", "block"]);
    /// assert_eq!(s.terms()[1], Term::variable("x"));
    /// ```
    pub fn from_symbols(symbols: &[&str]) -> Self {
        let terms = symbols
            .iter()
            .map(|symbol| match symbol.strip_prefix('?') {
                Some(name) => Term::variable(name),
                None => Term::constant(*symbol),
            })
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn predicate(&self) -> Option<&Term> {
        self.terms.first()
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    pub fn is_ground(&self) -> bool {
        !self.terms.iter().any(Term::is_variable)
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().filter_map(|term| match term {
            Term::Variable(name) => Some(name.as_str()),
            Term::Constant(_) => None,
        })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fact {
    pub statement: Statement,
}

impl Fact {
    pub fn new(statement: Statement) -> Self {
        Self { statement }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fact: {}", self.statement)
    }
}

/// An implication from an ordered, non-empty list of antecedents to one consequent.
///
/// Every variable of the consequent must occur in some antecedent, so that matching
/// all antecedents leaves nothing unbound in the derived fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    lhs: Vec<Statement>,
    rhs: Statement,
}

impl Rule {
    pub fn new(lhs: Vec<Statement>, rhs: Statement) -> ModusResult<Self> {
        if lhs.is_empty() {
            return Err(ModusError::MalformedRule(format!(
                "rule with consequent {} has no antecedents",
                rhs
            )));
        }

        let bound: BTreeSet<&str> = lhs.iter().flat_map(Statement::variables).collect();
        if let Some(free) = rhs.variables().find(|name| !bound.contains(name)) {
            return Err(ModusError::MalformedRule(format!(
                "variable ?{} in consequent {} does not occur in any antecedent",
                free, rhs
            )));
        }

        Ok(Self { lhs, rhs })
    }

    pub fn lhs(&self) -> &[Statement] {
        &self.lhs
    }

    pub fn rhs(&self) -> &Statement {
        &self.rhs
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule: (")?;
        for (i, antecedent) in self.lhs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", antecedent)?;
        }
        write!(f, ") -> {}", self.rhs)
    }
}

/// Anything the knowledge base stores: a fact or a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Fact(Fact),
    Rule(Rule),
}

impl Item {
    pub fn fact(statement: Statement) -> Self {
        Item::Fact(Fact::new(statement))
    }

    pub fn rule(lhs: Vec<Statement>, rhs: Statement) -> ModusResult<Self> {
        Ok(Item::Rule(Rule::new(lhs, rhs)?))
    }

    pub fn is_fact(&self) -> bool {
        matches!(self, Item::Fact(_))
    }

    pub fn as_fact(&self) -> Option<&Fact> {
        match self {
            Item::Fact(fact) => Some(fact),
            Item::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Item::Rule(rule) => Some(rule),
            Item::Fact(_) => None,
        }
    }
}

impl From<Fact> for Item {
    fn from(fact: Fact) -> Self {
        Item::Fact(fact)
    }
}

impl From<Rule> for Item {
    fn from(rule: Rule) -> Self {
        Item::Rule(rule)
    }
}

impl From<Statement> for Item {
    fn from(statement: Statement) -> Self {
        Item::fact(statement)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Fact(fact) => write!(f, "{}", fact),
            Item::Rule(rule) => write!(f, "{}", rule),
        }
    }
}
