use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in the extracted category tree. Immutable once emitted by the
/// walker; the tree is assembled depth-first, one branch at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub url: Option<String>,
    /// Filter label -> ordered value strings, scraped from the listing page
    /// sidebar. Empty when the page has no filters or extraction failed.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(name: String, url: Option<String>) -> Self {
        Self {
            name,
            url,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Total node count including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::count).sum::<usize>()
    }

    /// Deepest nesting level below this node. A leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of filter values across the whole subtree.
    pub fn filter_value_count(&self) -> usize {
        let own: usize = self.attributes.values().map(Vec::len).sum();
        own + self
            .children
            .iter()
            .map(CategoryNode::filter_value_count)
            .sum::<usize>()
    }
}
