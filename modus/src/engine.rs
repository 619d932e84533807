use crate::explain::Explanation;
use crate::parser::{parse, parse_item, parse_statement};
use crate::{Answer, Item, ItemId, KnowledgeBase, ModusResult, ResourceLimits, Retraction};
use tracing::info;

/// Text front end over a [`KnowledgeBase`].
///
/// Reads sources and queries with the statement reader and forwards them to the
/// knowledge base, applying one set of resource limits to both.
pub struct Engine {
    kb: KnowledgeBase,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_limits(ResourceLimits::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            kb: KnowledgeBase::with_limits(limits.clone()),
            limits,
        }
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Assert every declaration of `code` in source order.
    ///
    /// The whole source is read before anything is asserted, so a parse error leaves
    /// the knowledge base untouched. Returns the number of declarations asserted.
    pub fn add_code(&mut self, code: &str, source: &str) -> ModusResult<usize> {
        let items = parse(code, Some(source.to_string()), &self.limits)?;
        let count = items.len();
        for item in items {
            self.kb.add(item)?;
        }
        info!(
            source,
            declarations = count,
            facts = self.kb.fact_count(),
            rules = self.kb.rule_count(),
            "loaded source"
        );
        Ok(count)
    }

    pub fn assert(&mut self, item: impl Into<Item>) -> ModusResult<ItemId> {
        self.kb.assert(item)
    }

    /// Run combinations deferred by the inference step limit
    pub fn resume(&mut self) -> ModusResult<()> {
        self.kb.resume()
    }

    pub fn retract(&mut self, item: impl Into<Item>) -> Retraction {
        self.kb.retract(item)
    }

    /// Retract a declaration written as text, e.g. `fact: (isa cube block)`
    pub fn retract_code(&mut self, text: &str) -> ModusResult<Retraction> {
        let item = parse_item(text, &self.limits)?;
        Ok(self.kb.retract(item))
    }

    pub fn ask(&self, query: &Item) -> ModusResult<Vec<Answer>> {
        self.kb.ask(query)
    }

    /// Ask with a statement written as text, e.g. `(isa ?x block)`
    pub fn ask_code(&self, query: &str) -> ModusResult<Vec<Answer>> {
        let statement = parse_statement(query, &self.limits)?;
        self.kb.ask(&Item::fact(statement))
    }

    pub fn explain(&self, item: &Item) -> Option<Explanation> {
        self.kb.explain(item)
    }

    /// Explain a declaration written as text; a bare statement is read as a fact
    pub fn explain_code(&self, text: &str) -> ModusResult<Option<Explanation>> {
        let item = parse_item(text, &self.limits)?;
        Ok(self.kb.explain(&item))
    }
}
