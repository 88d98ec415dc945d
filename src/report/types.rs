use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Label given to the synthetic row that folds every truncated row.
pub const AGGREGATE_LABEL: &str = "Others";

/// Whether a row is a real report line or the synthetic "others" row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    #[default]
    Normal,
    /// Summarizes all rows beyond the truncation point
    Aggregate,
}

/// One line of an analytics report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Display label as produced by the reporting backend
    pub label: CompactString,
    /// Metric columns by name. `null` values read as 0.
    #[serde(default)]
    pub columns: BTreeMap<CompactString, Option<f64>>,
    /// Extra attributes (icon URL, page URL, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<CompactString, serde_json::Value>,
    /// Link to a nested report reachable by drilling into this row
    #[serde(default, rename = "idSubtable", skip_serializing_if = "Option::is_none")]
    pub sub_table_id: Option<u64>,
    #[serde(default)]
    pub kind: RowKind,
}

impl ReportRow {
    pub fn new(label: &str) -> Self {
        Self {
            label: CompactString::new(label),
            ..Self::default()
        }
    }

    /// Builder-style setter for a metric column.
    pub fn with_metric(mut self, column: &str, value: f64) -> Self {
        self.columns.insert(CompactString::new(column), Some(value));
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(CompactString::new(key), value.into());
        self
    }

    pub fn with_sub_table(mut self, id: u64) -> Self {
        self.sub_table_id = Some(id);
        self
    }

    /// Value of `column`, with missing or null columns coerced to 0.
    pub fn metric(&self, column: &str) -> f64 {
        self.columns.get(column).copied().flatten().unwrap_or(0.0)
    }

    pub fn is_aggregate(&self) -> bool {
        self.kind == RowKind::Aggregate
    }
}
