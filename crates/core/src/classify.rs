//! Heuristic stress classification of kinetic blocks.
//!
//! The host simulation keeps the authoritative stress numbers to itself, so each block is mapped
//! to a coarse [`NodeCategory`] by substring rules over its registry id, and each category carries
//! a fixed [`Contribution`].

use kinemeter_api::{Contribution, Node};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Supplies stress capacity (motors, engines).
    Generator,
    /// Ordinary stress consumer (fans, presses).
    Consumer,
    HeavyConsumer,
    /// Passive transmission: shafts, cogwheels, gearboxes and anything unrecognised.
    Connector,
}

impl NodeCategory {
    pub fn contribution(self) -> Contribution {
        match self {
            NodeCategory::Generator => Contribution::generator(256.0),
            NodeCategory::Consumer => Contribution::consumer(16.0),
            NodeCategory::HeavyConsumer => Contribution::consumer(32.0),
            NodeCategory::Connector => Contribution::INERT,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Matched as a substring of the block id.
    pub pattern: String,
    pub category: NodeCategory,
}

impl ClassificationRule {
    pub fn new(pattern: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            pattern: pattern.into(),
            category,
        }
    }
}

/// Ordered rule list; the first matching rule wins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ClassificationTable {
    rules: Vec<ClassificationRule>,
}

impl ClassificationTable {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Appends a rule with the lowest precedence.
    pub fn push(&mut self, rule: ClassificationRule) {
        self.rules.push(rule);
    }

    pub fn category_of(&self, block_id: &str) -> NodeCategory {
        self.rules
            .iter()
            .filter(|rule| !rule.pattern.is_empty())
            .find(|rule| block_id.contains(rule.pattern.as_str()))
            .map(|rule| rule.category)
            .unwrap_or(NodeCategory::Connector)
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::new(vec![
            ClassificationRule::new("motor", NodeCategory::Generator),
            ClassificationRule::new("generator", NodeCategory::Generator),
            ClassificationRule::new("fan", NodeCategory::Consumer),
            ClassificationRule::new("press", NodeCategory::Consumer),
            ClassificationRule::new("consumer", NodeCategory::Consumer),
            ClassificationRule::new("furnace", NodeCategory::HeavyConsumer),
        ])
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeClassifier {
    table: ClassificationTable,
}

impl NodeClassifier {
    pub fn new(table: ClassificationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    pub fn category(&self, node: &Node) -> NodeCategory {
        self.table.category_of(&node.block_id)
    }

    pub fn classify(&self, node: &Node) -> Contribution {
        self.category(node).contribution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinemeter_api::GridPos;

    fn node(id: &str) -> Node {
        Node::new(GridPos::ORIGIN, id)
    }

    #[test]
    fn test_default_table() {
        let classifier = NodeClassifier::default();
        assert_eq!(
            classifier.classify(&node("create:creative_motor")),
            Contribution::new(0.0, 256.0)
        );
        assert_eq!(
            classifier.classify(&node("create:encased_fan")),
            Contribution::new(16.0, 0.0)
        );
        assert_eq!(
            classifier.classify(&node("create:mechanical_press")),
            Contribution::new(16.0, 0.0)
        );
        assert_eq!(
            classifier.classify(&node("create:blaze_furnace")),
            Contribution::new(32.0, 0.0)
        );
        assert_eq!(classifier.classify(&node("create:shaft")), Contribution::INERT);
    }

    #[test]
    fn test_default_table_matches_generic_ids() {
        let classifier = NodeClassifier::default();
        assert_eq!(classifier.category(&node("x:generator")), NodeCategory::Generator);
        assert_eq!(
            classifier.classify(&node("x:generator")),
            Contribution::new(0.0, 256.0)
        );
        assert_eq!(classifier.category(&node("x:consumer")), NodeCategory::Consumer);
        assert_eq!(
            classifier.classify(&node("x:consumer")),
            Contribution::new(16.0, 0.0)
        );
    }

    #[test]
    fn test_unknown_block_is_inert_connector() {
        let classifier = NodeClassifier::default();
        let unknown = node("somemod:mystery_box");
        assert_eq!(classifier.category(&unknown), NodeCategory::Connector);
        assert_eq!(classifier.classify(&unknown), Contribution::INERT);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = ClassificationTable::new(vec![
            ClassificationRule::new("furnace", NodeCategory::HeavyConsumer),
            ClassificationRule::new("fan", NodeCategory::Consumer),
        ]);
        let classifier = NodeClassifier::new(table);
        // Matches both patterns; precedence follows rule order.
        assert_eq!(
            classifier.category(&node("furnace_fan")),
            NodeCategory::HeavyConsumer
        );
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        let table = ClassificationTable::new(vec![ClassificationRule::new(
            "",
            NodeCategory::Generator,
        )]);
        assert_eq!(table.category_of("create:shaft"), NodeCategory::Connector);
    }

    #[test]
    fn test_table_deserializes_from_rule_list() {
        let json = r#"[{"pattern": "engine", "category": "generator"}]"#;
        let table: ClassificationTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.category_of("create:steam_engine"), NodeCategory::Generator);
        assert_eq!(table.category_of("create:encased_fan"), NodeCategory::Connector);
    }
}
