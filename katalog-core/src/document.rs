use crate::error::Result;
use chrono::Utc;
use katalog_walker::CategoryNode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The on-disk output shape. Field names and nesting are load-bearing:
/// downstream consumers parse `categories` and `metadata.total_categories`
/// exactly as written here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDocument {
    pub categories: Vec<CategoryNode>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub total_categories: usize,
    pub timestamp: String,
}

impl CategoryDocument {
    pub fn new(categories: Vec<CategoryNode>) -> Self {
        let metadata = Metadata {
            total_categories: categories.len(),
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        Self {
            categories,
            metadata,
        }
    }

    /// Pretty-printed JSON, whole document in one write.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Every node in the tree, not just the roots.
    pub fn total_nodes(&self) -> usize {
        self.categories.iter().map(CategoryNode::count).sum()
    }

    /// Deepest nesting level across all roots. A document of leaves is 0.
    pub fn max_depth(&self) -> usize {
        self.categories
            .iter()
            .map(CategoryNode::depth)
            .max()
            .unwrap_or(0)
    }
}
