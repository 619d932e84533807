//! Dependency-directed retraction over the justification graph.

use crate::semantic::{Fact, Item, Rule};
use crate::store::{Entry, ItemId, Justification, KnowledgeBase};
use serde::Serialize;
use tracing::debug;

/// What a retraction changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Retraction {
    /// The target stays believed through its derivations; only its assertion was withdrawn
    pub unasserted: bool,
    pub removed_facts: Vec<Fact>,
    pub removed_rules: Vec<Rule>,
}

impl Retraction {
    pub fn is_noop(&self) -> bool {
        !self.unasserted && self.removed_facts.is_empty() && self.removed_rules.is_empty()
    }

    pub fn removed_count(&self) -> usize {
        self.removed_facts.len() + self.removed_rules.len()
    }
}

impl KnowledgeBase {
    /// Withdraw `item` and everything that no longer has support without it.
    ///
    /// An item that is asserted and also derived only loses its assertion. An item with
    /// no assertion and no justification is removed, and its dependents lose the
    /// justifications that named it; dependents left with neither are removed in turn.
    /// Items that are not stored are ignored.
    pub fn retract(&mut self, item: impl Into<Item>) -> Retraction {
        let item = item.into();
        let mut report = Retraction::default();

        let Some(id) = self.lookup(&item) else {
            debug!(%item, "retract of unknown item ignored");
            return report;
        };

        let still_supported = match self.get_mut(id) {
            Some(entry) => {
                let was_asserted = entry.asserted;
                entry.asserted = false;
                let supported = !entry.supported_by.is_empty();
                report.unasserted = was_asserted && supported;
                supported
            }
            None => return report,
        };
        if still_supported {
            debug!(%item, "retracted item remains supported");
            return report;
        }

        let mut worklist = vec![id];
        while let Some(id) = worklist.pop() {
            let Some(entry) = self.remove(id) else {
                continue;
            };
            debug!(item = %entry.item, %id, "removed");

            let dependents = entry.supports_facts.iter().chain(&entry.supports_rules);
            for &dependent in dependents {
                if self.strip_premise(dependent, id) {
                    worklist.push(dependent);
                }
            }

            match entry.item {
                Item::Fact(fact) => report.removed_facts.push(fact),
                Item::Rule(rule) => report.removed_rules.push(rule),
            }
        }

        report
    }

    /// Take `id` out of the arena and its ordered collection
    fn remove(&mut self, id: ItemId) -> Option<Entry> {
        let entry = self.entries.get_mut(id.index())?.take()?;
        if entry.item.is_fact() {
            self.facts.retain(|&fact| fact != id);
        } else {
            self.rules.retain(|&rule| rule != id);
        }
        Some(entry)
    }

    /// Remove every justification of `dependent` that names `premise`.
    ///
    /// Returns true when `dependent` is left unasserted with no justification.
    fn strip_premise(&mut self, dependent: ItemId, premise: ItemId) -> bool {
        let (stripped, is_fact, unsupported) = match self.get_mut(dependent) {
            Some(entry) => {
                let (stripped, kept): (Vec<Justification>, Vec<Justification>) =
                    std::mem::take(&mut entry.supported_by)
                        .into_iter()
                        .partition(|justification| justification.names(premise));
                entry.supported_by = kept;
                let unsupported = !entry.asserted && entry.supported_by.is_empty();
                (stripped, entry.item.is_fact(), unsupported)
            }
            None => return false,
        };

        for justification in stripped {
            let partner = if justification.fact == premise {
                justification.rule
            } else {
                justification.fact
            };
            let still_named = self
                .get(dependent)
                .is_some_and(|entry| entry.supported_by.iter().any(|kept| kept.names(partner)));
            if still_named {
                continue;
            }
            if let Some(entry) = self.get_mut(partner) {
                entry.supports_mut(is_fact).retain(|&id| id != dependent);
            }
        }
        unsupported
    }
}
