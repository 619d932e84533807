//! # Modus Engine
//!
//! **Forward chaining with truth maintenance**
//!
//! Modus keeps a deduplicated knowledge base of facts and rules. Every assertion is
//! chained forward until nothing new can be derived, and every derived item remembers
//! the (fact, rule) pairs that justify it, so retraction removes exactly what is no
//! longer supported.
//!
//! ## Quick Start
//!
//! ```rust
//! use modus::{Engine, ModusResult};
//!
//! fn main() -> ModusResult<()> {
//!     let mut engine = Engine::new();
//!
//!     engine.add_code(r#"
//!         fact: (isa cube block)
//!         rule: ((isa ?x block)) -> (movable ?x)
//!     "#, "example.kb")?;
//!
//!     let answers = engine.ask_code("(movable ?what)")?;
//!     assert_eq!(answers.len(), 1);
//!
//!     engine.retract_code("fact: (isa cube block)")?;
//!     assert!(engine.ask_code("(movable ?what)")?.is_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Statements
//! A statement is an ordered list of terms, predicate first: `(isa cube block)`.
//! Terms are constants or `?variables`.
//!
//! ### Rules
//! A rule has one or more antecedents and one consequent. Matching a fact against the
//! first antecedent yields either a new fact (last antecedent) or a new, shorter rule.
//!
//! ### Justifications
//! Derived items record the fact and rule they came from. An item stays in the
//! knowledge base while it is asserted or has at least one justification.

pub mod ast;
pub mod engine;
pub mod error;
pub mod explain;
pub mod inference;
pub mod matcher;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod retraction;
pub mod semantic;
pub mod store;

pub use ast::Span;
pub use engine::Engine;
pub use error::{ErrorDetails, ModusError};
pub use explain::{Explanation, SupportExplanation};
pub use inference::InferenceEngine;
pub use matcher::{instantiate, match_statement, Bindings};
pub use parser::{parse, parse_item, parse_statement};
pub use resource_limits::ResourceLimits;
pub use response::Answer;
pub use retraction::Retraction;
pub use semantic::*;
pub use store::{Entry, ItemId, Justification, KnowledgeBase};

/// Result type for Modus operations
pub type ModusResult<T> = Result<T, ModusError>;

#[cfg(test)]
mod tests;
