use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Id of the root node of every generated tree.
pub const ROOT_ID: &str = "treemap-root";

/// Metadata key holding a node's hover text.
pub const TOOLTIP_KEY: &str = "tooltip";

/// Per-node payload. Keys serialize under the names the client widget reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Metric value the tile is sized by. Absent on the root.
    #[serde(rename = "$area", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Whole-percent change against the past period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution: Option<i64>,
    /// Allow-listed row metadata plus the tooltip
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<CompactString, serde_json::Value>,
    /// Sub-table to fetch when the node is drilled into
    #[serde(rename = "idSubtable", default, skip_serializing_if = "Option::is_none")]
    pub sub_table_id: Option<u64>,
    /// Absolute offset of the last row folded into an aggregate node
    #[serde(rename = "aggregate_offset", default, skip_serializing_if = "Option::is_none")]
    pub aggregate_offset: Option<u64>,
}

/// One tile of the treemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: CompactString,
    pub data: NodeData,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: String, name: &str, data: NodeData) -> Self {
        Self {
            id,
            name: CompactString::new(name),
            data,
            children: Vec::new(),
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.data.metadata.get(TOOLTIP_KEY).and_then(|v| v.as_str())
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// Pre-order walk over this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator over a subtree in pre-order.
pub struct Descendants<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<&'a TreeNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
