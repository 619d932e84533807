use crate::matcher::{instantiate, match_statement};
use crate::semantic::{Fact, Item, Rule};
use crate::ModusResult;
use tracing::trace;

/// Single forward-chaining step between one fact and one rule.
///
/// Stateless: the knowledge base decides what to do with the derived item and
/// records the justification.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferenceEngine;

impl InferenceEngine {
    /// Match `fact` against the first antecedent of `rule`.
    ///
    /// With a single antecedent the result is the instantiated consequent as a fact.
    /// With more, the result is a rule over the remaining antecedents with the
    /// bindings applied. No match, no result.
    pub fn combine(&self, fact: &Fact, rule: &Rule) -> ModusResult<Option<Item>> {
        let (first, rest) = match rule.lhs().split_first() {
            Some(split) => split,
            None => return Ok(None),
        };

        let bindings = match match_statement(&fact.statement, first) {
            Some(bindings) => bindings,
            None => {
                trace!(fact = %fact.statement, antecedent = %first, "no match");
                return Ok(None);
            }
        };
        trace!(fact = %fact.statement, antecedent = %first, %bindings, "matched");

        if rest.is_empty() {
            let statement = instantiate(rule.rhs(), &bindings)?;
            return Ok(Some(Item::fact(statement)));
        }

        let lhs = rest.iter().map(|antecedent| bindings.apply(antecedent)).collect();
        let rhs = bindings.apply(rule.rhs());
        Ok(Some(Item::rule(lhs, rhs)?))
    }
}
