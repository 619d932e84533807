use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use modus::{Answer, Entry, Explanation, KnowledgeBase, Retraction};

enum LineType {
    Support,
    LastSupport,
    Premise,
    LastPremise,
}

impl LineType {
    fn symbol(&self) -> &'static str {
        match self {
            LineType::Support | LineType::Premise => "├─",
            LineType::LastSupport | LineType::LastPremise => "└─",
        }
    }

    fn continuation(&self) -> &'static str {
        match self {
            LineType::Support | LineType::Premise => "│  ",
            LineType::LastSupport | LineType::LastPremise => "   ",
        }
    }
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// Render the answers to one query; an empty answer set is reported, not an error
    pub fn format_answers(&self, query: &str, answers: &[Answer]) -> String {
        let mut output = format!("? {}\n", query);
        if answers.is_empty() {
            output.push_str("No matching facts\n");
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Bindings").set_alignment(CellAlignment::Left),
            Cell::new("Fact").set_alignment(CellAlignment::Left),
        ]));

        for answer in answers {
            let facts: Vec<String> = answer.facts.iter().map(|fact| fact.to_string()).collect();
            table.add_row(Row::from(vec![
                Cell::new(answer.bindings.to_string()),
                Cell::new(facts.join("\n")),
            ]));
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    pub fn format_retraction(&self, target: &str, retraction: &Retraction) -> String {
        let mut output = format!("- {}\n", target);
        if retraction.is_noop() {
            output.push_str("Nothing retracted\n");
            return output;
        }
        if retraction.unasserted {
            output.push_str("No longer asserted, still supported by derivation\n");
        }
        if retraction.removed_count() > 0 {
            output.push_str(&format!("Removed {} item(s):\n", retraction.removed_count()));
            for fact in &retraction.removed_facts {
                output.push_str(&format!("  {}\n", fact));
            }
            for rule in &retraction.removed_rules {
                output.push_str(&format!("  {}\n", rule));
            }
        }
        output
    }

    pub fn format_knowledge_base(&self, kb: &KnowledgeBase) -> String {
        let mut output = String::new();

        output.push_str(&format!("Facts ({}):\n", kb.fact_count()));
        output.push_str(&self.format_entries_table(
            "Fact",
            kb.facts().map(|(_, entry)| entry),
            |entry| entry.item().as_fact().map(|fact| fact.statement.to_string()),
        ));
        output.push('\n');

        output.push_str(&format!("Rules ({}):\n", kb.rule_count()));
        output.push_str(&self.format_entries_table(
            "Rule",
            kb.rules().map(|(_, entry)| entry),
            |entry| {
                entry
                    .item()
                    .as_rule()
                    .map(|rule| rule.to_string().trim_start_matches("rule: ").to_string())
            },
        ));
        output.push('\n');

        output
    }

    fn format_entries_table<'a>(
        &self,
        header: &str,
        entries: impl Iterator<Item = &'a Entry>,
        describe: impl Fn(&Entry) -> Option<String>,
    ) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new(header).set_alignment(CellAlignment::Left),
            Cell::new("Asserted").set_alignment(CellAlignment::Center),
            Cell::new("Justifications").set_alignment(CellAlignment::Right),
            Cell::new("Supports").set_alignment(CellAlignment::Right),
        ]));

        for entry in entries {
            let Some(text) = describe(entry) else {
                continue;
            };
            let supports = entry.supports_facts().len() + entry.supports_rules().len();
            table.add_row(Row::from(vec![
                Cell::new(text),
                Cell::new(if entry.is_asserted() { "yes" } else { "no" })
                    .set_alignment(CellAlignment::Center),
                Cell::new(entry.supported_by().len()).set_alignment(CellAlignment::Right),
                Cell::new(supports).set_alignment(CellAlignment::Right),
            ]));
        }

        table.to_string()
    }

    /// Render a justification tree with box-drawing branches
    pub fn format_explanation(&self, explanation: &Explanation) -> String {
        let mut output = format!("{}\n", Self::describe(explanation));
        self.format_supports(explanation, "", &mut output);
        output
    }

    fn format_supports(&self, explanation: &Explanation, prefix: &str, output: &mut String) {
        let count = explanation.supported_by.len();
        for (index, support) in explanation.supported_by.iter().enumerate() {
            let line = if index + 1 == count {
                LineType::LastSupport
            } else {
                LineType::Support
            };
            output.push_str(&format!("{}{} supported by\n", prefix, line.symbol()));

            let inner = format!("{}{}", prefix, line.continuation());
            for (premise, line) in [
                (&support.fact, LineType::Premise),
                (&support.rule, LineType::LastPremise),
            ] {
                output.push_str(&format!(
                    "{}{} {}\n",
                    inner,
                    line.symbol(),
                    Self::describe(premise)
                ));
                self.format_supports(
                    premise,
                    &format!("{}{}", inner, line.continuation()),
                    output,
                );
            }
        }
    }

    fn describe(explanation: &Explanation) -> String {
        let mut text = explanation.item.to_string();
        if explanation.asserted {
            text.push_str(" [asserted]");
        }
        if explanation.cycle {
            text.push_str(" [cycle]");
        }
        text
    }
}
