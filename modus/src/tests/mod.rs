use crate::{Item, ItemId, KnowledgeBase, Statement};





pub(crate) fn st(symbols: &[&str]) -> Statement {
    Statement::from_symbols(symbols)
}

pub(crate) fn fact(symbols: &[&str]) -> Item {
    Item::fact(st(symbols))
}

pub(crate) fn rule(lhs: &[&[&str]], rhs: &[&str]) -> Item {
    Item::rule(lhs.iter().map(|s| st(s)).collect(), st(rhs)).unwrap()
}

pub(crate) fn id_of(kb: &KnowledgeBase, item: &Item) -> ItemId {
    kb.lookup(item)
        .unwrap_or_else(|| panic!("{} is not stored", item))
}

/// Check the dedup, support and back-link invariants over the whole store
pub(crate) fn assert_consistent(kb: &KnowledgeBase) {
    let mut seen = std::collections::HashSet::new();
    for (id, entry) in kb.facts().chain(kb.rules()) {
        assert!(seen.insert(entry.item().clone()), "duplicate {}", entry.item());
        assert!(
            entry.is_asserted() || !entry.supported_by().is_empty(),
            "{} is neither asserted nor justified",
            entry.item()
        );

        let is_fact = entry.item().is_fact();
        for justification in entry.supported_by() {
            for premise in [justification.fact, justification.rule] {
                let premise_entry = kb
                    .get(premise)
                    .unwrap_or_else(|| panic!("{} justified by removed {}", entry.item(), premise));
                let supports = if is_fact {
                    premise_entry.supports_facts()
                } else {
                    premise_entry.supports_rules()
                };
                assert!(
                    supports.contains(&id),
                    "{} missing back-link to {}",
                    premise_entry.item(),
                    entry.item()
                );
            }
        }

        for &dependent in entry.supports_facts().iter().chain(entry.supports_rules()) {
            let dependent_entry = kb
                .get(dependent)
                .unwrap_or_else(|| panic!("{} supports removed {}", entry.item(), dependent));
            assert!(
                dependent_entry
                    .supported_by()
                    .iter()
                    .any(|justification| justification.names(id)),
                "{} lists {} as dependent without a justification",
                entry.item(),
                dependent_entry.item()
            );
        }
    }
}
