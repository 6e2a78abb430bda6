//! Shared types used across shardgrid crates.

use serde::{Deserialize, Serialize};

/// One unit of work to schedule: a test file, scenario, or feature.
///
/// Item files use the natural JSON/TOML shapes: `"a"` is `Plain`,
/// `["a", 1.5]` is `Weighted`, `["a", ["@ui"]]` is `Tagged`, and
/// `["a", 1.5, ["@ui"]]` is `WeightedTagged`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// Identifier only. Weighs 1.
    Plain(String),
    /// Identifier with a non-negative cost, usually runtime in seconds.
    Weighted(String, f64),
    /// Identifier with tags. Weighs 1; tags drive pinning.
    Tagged(String, Vec<String>),
    /// Both a cost and tags, e.g. a tagged item sized from a runtime log.
    WeightedTagged(String, f64, Vec<String>),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Item::Plain(id)
            | Item::Weighted(id, _)
            | Item::Tagged(id, _)
            | Item::WeightedTagged(id, ..) => id,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Item::Weighted(_, weight) | Item::WeightedTagged(_, weight, _) => *weight,
            Item::Plain(_) | Item::Tagged(..) => 1.0,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Item::Tagged(_, tags) | Item::WeightedTagged(_, _, tags) => tags,
            Item::Plain(_) | Item::Weighted(..) => &[],
        }
    }

    /// Consume the item, keeping only its identifier.
    pub fn into_id(self) -> String {
        match self {
            Item::Plain(id)
            | Item::Weighted(id, _)
            | Item::Tagged(id, _)
            | Item::WeightedTagged(id, ..) => id,
        }
    }

    /// Give the item a cost, keeping any tags it carries.
    pub fn with_weight(self, weight: f64) -> Item {
        match self {
            Item::Plain(id) | Item::Weighted(id, _) => Item::Weighted(id, weight),
            Item::Tagged(id, tags) | Item::WeightedTagged(id, _, tags) => {
                if tags.is_empty() {
                    Item::Weighted(id, weight)
                } else {
                    Item::WeightedTagged(id, weight, tags)
                }
            }
        }
    }
}

/// Work assigned to a single worker process.
///
/// Groups start empty and only grow through [`Group::push`], which keeps
/// `size` equal to the sum of member weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    items: Vec<String>,
    size: f64,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, weight: f64) {
        self.items.push(id.into());
        self.size += weight;
    }

    /// Sort members ascending. Presentation only; does not touch `size`.
    pub fn sort_items(&mut self) {
        self.items.sort();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_defaults_weight_to_one() {
        assert_eq!(Item::Plain("a".into()).weight(), 1.0);
        assert_eq!(Item::Tagged("a".into(), vec!["@ui".into()]).weight(), 1.0);
        assert_eq!(Item::Weighted("a".into(), 4.5).weight(), 4.5);
    }

    #[test]
    fn item_shapes_deserialize_untagged() {
        let json = r#"["a", ["b", 2.5], ["c", ["@api", "@slow"]], ["d", 3, ["@ui"]]]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(
            items,
            vec![
                Item::Plain("a".into()),
                Item::Weighted("b".into(), 2.5),
                Item::Tagged("c".into(), vec!["@api".into(), "@slow".into()]),
                Item::WeightedTagged("d".into(), 3.0, vec!["@ui".into()]),
            ]
        );
    }

    #[test]
    fn with_weight_keeps_tags() {
        let item = Item::Tagged("a".into(), vec!["@serial".into()]).with_weight(5.0);
        assert_eq!(item, Item::WeightedTagged("a".into(), 5.0, vec!["@serial".into()]));
        assert_eq!(item.weight(), 5.0);
        assert_eq!(item.tags(), ["@serial"]);

        assert_eq!(
            Item::Tagged("b".into(), vec![]).with_weight(2.0),
            Item::Weighted("b".into(), 2.0)
        );
        assert_eq!(Item::Plain("c".into()).with_weight(1.5), Item::Weighted("c".into(), 1.5));
    }

    #[test]
    fn group_push_accumulates_size() {
        let mut group = Group::new();
        group.push("b", 2.0);
        group.push("a", 3.5);
        assert_eq!(group.len(), 2);
        assert_eq!(group.size(), 5.5);

        group.sort_items();
        assert_eq!(group.items(), ["a", "b"]);
        assert_eq!(group.size(), 5.5);
    }
}
