//! The knowledge base: a deduplicated arena of facts and rules with their
//! justification bookkeeping.
//!
//! Stored items are addressed by [`ItemId`] handles that stay valid for the lifetime of
//! the knowledge base and are never reused. Justifications and back-links are plain
//! handle pairs, so the support graph can be walked in both directions without shared
//! ownership.

use crate::error::ModusError;
use crate::inference::InferenceEngine;
use crate::matcher::match_statement;
use crate::resource_limits::ResourceLimits;
use crate::response::Answer;
use crate::semantic::{Fact, Item, Rule};
use crate::ModusResult;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Stable handle of a stored fact or rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The (fact, rule) pair whose combination produced a derived item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Justification {
    pub fact: ItemId,
    pub rule: ItemId,
}

impl Justification {
    pub fn new(fact: ItemId, rule: ItemId) -> Self {
        Self { fact, rule }
    }

    pub fn names(&self, premise: ItemId) -> bool {
        self.fact == premise || self.rule == premise
    }
}

/// A stored item together with why it is believed and what it helped derive
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) item: Item,
    pub(crate) asserted: bool,
    pub(crate) supported_by: Vec<Justification>,
    pub(crate) supports_facts: Vec<ItemId>,
    pub(crate) supports_rules: Vec<ItemId>,
}

impl Entry {
    fn new(item: Item, asserted: bool) -> Self {
        Self {
            item,
            asserted,
            supported_by: Vec::new(),
            supports_facts: Vec::new(),
            supports_rules: Vec::new(),
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn supported_by(&self) -> &[Justification] {
        &self.supported_by
    }

    pub fn supports_facts(&self) -> &[ItemId] {
        &self.supports_facts
    }

    pub fn supports_rules(&self) -> &[ItemId] {
        &self.supports_rules
    }

    pub(crate) fn supports_mut(&mut self, dependent_is_fact: bool) -> &mut Vec<ItemId> {
        if dependent_is_fact {
            &mut self.supports_facts
        } else {
            &mut self.supports_rules
        }
    }
}

/// Deduplicated store of facts and rules, closed under forward chaining.
pub struct KnowledgeBase {
    pub(crate) entries: Vec<Option<Entry>>,
    pub(crate) facts: Vec<ItemId>,
    pub(crate) rules: Vec<ItemId>,
    /// Combinations left over when an assertion hit the step limit
    backlog: Vec<Justification>,
    engine: InferenceEngine,
    limits: ResourceLimits,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::with_limits(ResourceLimits::default())
    }
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a knowledge base with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            entries: Vec::new(),
            facts: Vec::new(),
            rules: Vec::new(),
            backlog: Vec::new(),
            engine: InferenceEngine,
            limits,
        }
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn get(&self, id: ItemId) -> Option<&Entry> {
        self.entries.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Entry> {
        self.entries.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Stored facts in insertion order
    pub fn facts(&self) -> impl Iterator<Item = (ItemId, &Entry)> {
        self.facts
            .iter()
            .filter_map(move |&id| self.get(id).map(|entry| (id, entry)))
    }

    /// Stored rules in insertion order
    pub fn rules(&self) -> impl Iterator<Item = (ItemId, &Entry)> {
        self.rules
            .iter()
            .filter_map(move |&id| self.get(id).map(|entry| (id, entry)))
    }

    /// Find the canonical stored instance structurally equal to `item`
    pub fn lookup(&self, item: &Item) -> Option<ItemId> {
        let candidates = if item.is_fact() { &self.facts } else { &self.rules };
        candidates
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|entry| &entry.item == item))
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.lookup(item).is_some()
    }

    /// False while combinations cut short by the step limit are still waiting to run
    pub fn is_saturated(&self) -> bool {
        self.backlog.is_empty()
    }

    /// Continue chaining from where the step limit last stopped it
    pub fn resume(&mut self) -> ModusResult<()> {
        let pending = std::mem::take(&mut self.backlog);
        self.saturate(pending)
    }

    /// Assert `item` as independently true and chain forward to a fixpoint
    pub fn assert(&mut self, item: impl Into<Item>) -> ModusResult<ItemId> {
        self.add(item.into())
    }

    /// Insert `item` as an external assertion, or mark an equal stored item asserted.
    ///
    /// A new item is combined with every stored item of the opposite kind; derived items
    /// re-enter through the same path until nothing new appears. Combinations run from an
    /// explicit stack so that the pairs of a newly derived item are processed before older
    /// pending pairs (depth-first order). Combinations left over from an earlier
    /// assertion that hit the step limit run after the new item's own.
    ///
    /// Facts must be ground; a fact with variables is rejected before anything changes.
    pub fn add(&mut self, item: Item) -> ModusResult<ItemId> {
        if item.as_fact().is_some_and(|fact| !fact.statement.is_ground()) {
            return Err(ModusError::NonGroundFact(item.to_string()));
        }
        debug!(%item, "asserting");
        let mut pending = std::mem::take(&mut self.backlog);
        let id = self.merge(item, None, &mut pending);
        self.saturate(pending)?;
        Ok(id)
    }

    /// Answer a fact-shaped query with every stored fact it matches.
    ///
    /// An empty result is a valid answer. Asking with a rule is an error.
    pub fn ask(&self, query: &Item) -> ModusResult<Vec<Answer>> {
        let Item::Fact(query) = query else {
            return Err(ModusError::InvalidQuery(format!(
                "only facts can be asked, got {}",
                query
            )));
        };

        let answers = self
            .facts()
            .filter_map(|(_, entry)| {
                let fact = entry.item.as_fact()?;
                let bindings = match_statement(&fact.statement, &query.statement)?;
                Some(Answer {
                    bindings,
                    facts: vec![fact.statement.clone()],
                })
            })
            .collect();
        Ok(answers)
    }

    fn saturate(&mut self, mut pending: Vec<Justification>) -> ModusResult<()> {
        let mut steps = 0usize;
        while let Some(pair) = pending.pop() {
            steps += 1;
            if steps > self.limits.max_inference_steps {
                pending.push(pair);
                let remaining = pending.len();
                self.backlog = pending;
                debug!(remaining, "step limit reached, combinations deferred");
                return Err(ModusError::ResourceLimitExceeded {
                    limit_name: "max_inference_steps".to_string(),
                    limit_value: self.limits.max_inference_steps.to_string(),
                    actual_value: steps.to_string(),
                    suggestion: format!(
                        "The knowledge base is incomplete until the {} deferred combinations run; call resume or assert again",
                        remaining
                    ),
                });
            }

            let derived = match (self.stored_fact(pair.fact), self.stored_rule(pair.rule)) {
                (Some(fact), Some(rule)) => self.engine.combine(fact, rule)?,
                _ => None,
            };
            if let Some(derived) = derived {
                self.merge(derived, Some(pair), &mut pending);
            }
        }
        Ok(())
    }

    /// Insert or merge one item; schedules the combinations of a fresh insert.
    fn merge(
        &mut self,
        item: Item,
        justification: Option<Justification>,
        pending: &mut Vec<Justification>,
    ) -> ItemId {
        if let Some(id) = self.lookup(&item) {
            match justification {
                Some(justification) => self.attach(id, justification),
                None => {
                    if let Some(entry) = self.get_mut(id) {
                        entry.asserted = true;
                    }
                }
            }
            debug!(%item, %id, "merged into existing item");
            return id;
        }

        let id = ItemId(self.entries.len());
        let is_fact = item.is_fact();
        debug!(%item, %id, derived = justification.is_some(), "inserted");
        self.entries
            .push(Some(Entry::new(item, justification.is_none())));
        if let Some(justification) = justification {
            self.attach(id, justification);
        }

        if is_fact {
            self.facts.push(id);
            pending.extend(self.rules.iter().rev().map(|&rule| Justification::new(id, rule)));
        } else {
            self.rules.push(id);
            pending.extend(self.facts.iter().rev().map(|&fact| Justification::new(fact, id)));
        }
        id
    }

    /// Record `justification` on `id` and mirror it in both premises
    pub(crate) fn attach(&mut self, id: ItemId, justification: Justification) {
        let is_fact = match self.get_mut(id) {
            Some(entry) => {
                if !entry.supported_by.contains(&justification) {
                    entry.supported_by.push(justification);
                }
                entry.item.is_fact()
            }
            None => return,
        };

        for premise in [justification.fact, justification.rule] {
            if let Some(entry) = self.get_mut(premise) {
                let supports = entry.supports_mut(is_fact);
                if !supports.contains(&id) {
                    supports.push(id);
                }
            }
        }
    }

    fn stored_fact(&self, id: ItemId) -> Option<&Fact> {
        self.get(id).and_then(|entry| entry.item.as_fact())
    }

    fn stored_rule(&self, id: ItemId) -> Option<&Rule> {
        self.get(id).and_then(|entry| entry.item.as_rule())
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Base:")?;
        for (_, entry) in self.facts().chain(self.rules()) {
            writeln!(f, "{}", entry.item)?;
        }
        Ok(())
    }
}
