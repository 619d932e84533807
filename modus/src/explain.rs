use crate::semantic::Item;
use crate::store::{ItemId, Justification, KnowledgeBase};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Why a stored item is believed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub item: Item,
    pub asserted: bool,
    /// One entry per justification, in the order they were recorded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supported_by: Vec<SupportExplanation>,
    /// Set when the item already appears higher up this branch; its support is not repeated
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cycle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportExplanation {
    pub fact: Explanation,
    pub rule: Explanation,
}

impl KnowledgeBase {
    /// Build the justification tree of `item`, or `None` if it is not stored
    pub fn explain(&self, item: &Item) -> Option<Explanation> {
        let id = self.lookup(item)?;
        let mut branch = HashSet::new();
        let mut stack = vec![self.open(id, &mut branch)?];

        loop {
            let frame = stack.last_mut()?;
            if let Some(premise) = frame.next_premise() {
                match self.open(premise, &mut branch) {
                    Some(child) => stack.push(child),
                    None => frame.skip_justification(),
                }
                continue;
            }

            let frame = stack.pop()?;
            if frame.on_branch {
                branch.remove(&frame.id);
            }
            match stack.last_mut() {
                Some(parent) => parent.accept(frame.explanation),
                None => return Some(frame.explanation),
            }
        }
    }

    /// Start the explanation of `id`; an item already on the current branch is a cycle
    fn open(&self, id: ItemId, branch: &mut HashSet<ItemId>) -> Option<Frame> {
        let entry = self.get(id)?;
        let on_branch = branch.insert(id);
        Some(Frame {
            id,
            explanation: Explanation {
                item: entry.item().clone(),
                asserted: entry.is_asserted(),
                supported_by: Vec::new(),
                cycle: !on_branch,
            },
            justifications: if on_branch {
                entry.supported_by().to_vec()
            } else {
                Vec::new()
            },
            next: 0,
            fact: None,
            on_branch,
        })
    }
}

/// An explanation under construction, waiting for the premises of its justifications
struct Frame {
    id: ItemId,
    explanation: Explanation,
    justifications: Vec<Justification>,
    next: usize,
    /// Fact premise of the current justification, once explained
    fact: Option<Explanation>,
    on_branch: bool,
}

impl Frame {
    fn next_premise(&self) -> Option<ItemId> {
        let justification = self.justifications.get(self.next)?;
        match self.fact {
            None => Some(justification.fact),
            Some(_) => Some(justification.rule),
        }
    }

    fn accept(&mut self, premise: Explanation) {
        match self.fact.take() {
            None => self.fact = Some(premise),
            Some(fact) => {
                self.explanation.supported_by.push(SupportExplanation {
                    fact,
                    rule: premise,
                });
                self.next += 1;
            }
        }
    }

    /// A premise that is no longer stored drops its justification from the tree
    fn skip_justification(&mut self) {
        self.fact = None;
        self.next += 1;
    }
}

// Deep trees are released level by level instead of through nested drops.
impl Drop for Explanation {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.supported_by);
        while let Some(mut support) = pending.pop() {
            pending.append(&mut support.fact.supported_by);
            pending.append(&mut support.rule.supported_by);
        }
    }
}

impl Explanation {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let mut notes = Vec::new();
        if self.asserted {
            notes.push("asserted");
        }
        if self.cycle {
            notes.push("cycle");
        }
        if notes.is_empty() {
            writeln!(f, "{}{}", indent, self.item)?;
        } else {
            writeln!(f, "{}{} [{}]", indent, self.item, notes.join(", "))?;
        }

        for support in &self.supported_by {
            writeln!(f, "{}  supported by:", indent)?;
            support.fact.write_indented(f, depth + 2)?;
            support.rule.write_indented(f, depth + 2)?;
        }
        Ok(())
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
