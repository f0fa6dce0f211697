//! tree model and assembly
//!
//! [SectionNode] is the decoded content of one `config`/`edit` block: its own
//! field map plus its child sections, both insertion-ordered. [ParsedTree]
//! keys one root node per region.
//!
//! Serialization flattens a node into a single mapping - own fields first,
//! then children - so exported JSON/YAML reads like the dump it came from.

use crate::directive::Value;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::Serializer;

/// The decoded content of one `config`/`edit` block
///
/// A node may have fields only, children only, both, or neither (an empty
/// block parses to an empty node).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SectionNode {
    pub fields: IndexMap<String, Value>,
    pub children: IndexMap<String, SectionNode>,
}

impl SectionNode {
    /// Merge `fields` into the node at `path`, creating empty intermediate
    /// nodes on the way down.
    ///
    /// Field merge is last-write-wins; existing children of the target node
    /// are left untouched. Inserting the same `(path, fields)` twice is a
    /// no-op the second time.
    pub fn insert(&mut self, path: &[String], fields: IndexMap<String, Value>) {
        let mut node = self;
        for segment in path {
            node = node
                .children
                .entry(segment.clone())
                .or_insert_with(SectionNode::default);
        }

        for (field, value) in fields {
            node.fields.insert(field, value);
        }
    }

    /// Walk `path` down from this node.
    pub fn get(&self, path: &[String]) -> Option<&SectionNode> {
        let mut node = self;
        for segment in path {
            node = node.children.get(segment)?;
        }
        Some(node)
    }
}

/// The final output: one section tree per region, keyed by region name
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedTree {
    regions: IndexMap<String, SectionNode>,
}

impl ParsedTree {
    pub fn insert_region(&mut self, name: String, node: SectionNode) {
        self.regions.insert(name, node);
    }

    /// The tree rooted at a region (a context name, or `"global"`).
    pub fn region(&self, name: &str) -> Option<&SectionNode> {
        self.regions.get(name)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, &SectionNode)> {
        self.regions.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl serde::Serialize for SectionNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + self.children.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        for (name, child) in &self.children {
            map.serialize_entry(name, child)?;
        }
        map.end()
    }
}

impl serde::Serialize for ParsedTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.regions.len()))?;
        for (name, node) in &self.regions {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn fields(pairs: &[(&str, &str)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(field, value)| (field.to_string(), Value::Scalar(value.to_string())))
            .collect()
    }

    #[test]
    fn insert_is_idempotent() {
        let mut once = SectionNode::default();
        once.insert(&path(&["system", "global"]), fields(&[("hostname", "fw1")]));

        let mut twice = SectionNode::default();
        twice.insert(&path(&["system", "global"]), fields(&[("hostname", "fw1")]));
        twice.insert(&path(&["system", "global"]), fields(&[("hostname", "fw1")]));

        assert_eq!(once, twice);
    }

    #[test]
    fn insert_never_drops_existing_children() {
        let mut tree = SectionNode::default();
        tree.insert(&path(&["system", "dhcp", "1"]), fields(&[("lease", "300")]));
        tree.insert(&path(&["system", "dhcp"]), fields(&[("status", "enable")]));

        let dhcp = tree.get(&path(&["system", "dhcp"])).unwrap();
        assert_eq!(dhcp.fields["status"], Value::Scalar("enable".to_string()));
        assert!(dhcp.children.contains_key("1"));
    }

    #[test]
    fn later_fields_overwrite_earlier_ones() {
        let mut tree = SectionNode::default();
        tree.insert(&path(&["system"]), fields(&[("hostname", "old")]));
        tree.insert(&path(&["system"]), fields(&[("hostname", "new")]));

        let node = tree.get(&path(&["system"])).unwrap();
        assert_eq!(node.fields["hostname"], Value::Scalar("new".to_string()));
    }

    #[test]
    fn get_misses_on_unknown_paths() {
        let mut tree = SectionNode::default();
        tree.insert(&path(&["system", "global"]), fields(&[]));

        assert!(tree.get(&path(&["system", "global"])).is_some());
        assert!(tree.get(&path(&["system", "globally"])).is_none());
        assert!(tree.get(&path(&["system", "global", "deeper"])).is_none());
    }

    #[test]
    fn nodes_serialize_as_one_flat_mapping() {
        let mut tree = SectionNode::default();
        tree.insert(&path(&["system"]), fields(&[("hostname", "fw1")]));
        tree.insert(&path(&["system", "ntp"]), fields(&[("ntpsync", "enable")]));

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            serde_json::json!({
                "system": {
                    "hostname": "fw1",
                    "ntp": { "ntpsync": "enable" }
                }
            })
        );
    }
}
