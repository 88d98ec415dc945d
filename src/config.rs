use std::collections::BTreeMap;
use std::path::Path;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::AvailableSpace;
use crate::report::metric::{metric_to_graph, translate_metric};
use crate::tree::label::LabelFormatter;

/// Metric graphed when nothing else is requested.
pub const DEFAULT_METRIC: &str = "nb_visits";

/// Tooltip wording for the past period when the past table carries no period name.
pub const DEFAULT_PAST_PERIOD_LABEL: &str = "previous period";

/// Everything a generator needs to turn one report into one tree.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Column whose values size the nodes
    pub metric_column: CompactString,
    /// Display name of the metric, used in tooltips
    pub metric_translation: CompactString,
    pub root_name: String,
    /// Sub-table id namespacing node ids ("" for top-level reports)
    pub table_id: String,
    /// Absolute offset of the first row, for paginated sub-table exploration
    pub initial_offset: u64,
    /// `None` skips area-based truncation
    pub available_space: Option<AvailableSpace>,
    pub show_evolution: bool,
    pub past_period_label: String,
    pub label_formatter: LabelFormatter,
}

impl GeneratorConfig {
    pub fn new(metric_column: &str, metric_translation: &str) -> Self {
        Self {
            metric_column: CompactString::new(metric_column),
            metric_translation: CompactString::new(metric_translation),
            root_name: String::new(),
            table_id: String::new(),
            initial_offset: 0,
            available_space: None,
            show_evolution: false,
            past_period_label: DEFAULT_PAST_PERIOD_LABEL.to_string(),
            label_formatter: LabelFormatter::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_METRIC, translate_metric(DEFAULT_METRIC))
    }
}

/// Visualization defaults supplied by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
    /// Color nodes by evolution; requests a past period alongside the current one
    pub show_evolution_values: bool,
    pub columns_to_display: Vec<String>,
    /// Metric name → display name overrides
    pub translations: BTreeMap<String, String>,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            show_evolution_values: true,
            columns_to_display: vec![DEFAULT_METRIC.to_string()],
            translations: BTreeMap::new(),
        }
    }
}

impl TreemapConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// First displayed column other than the label.
    pub fn metric_to_graph(&self) -> &str {
        metric_to_graph(&self.columns_to_display).unwrap_or(DEFAULT_METRIC)
    }

    /// Display name for `metric`: configured override, then built-in name.
    pub fn translation_for<'a>(&'a self, metric: &'a str) -> &'a str {
        self.translations
            .get(metric)
            .map(String::as_str)
            .unwrap_or_else(|| translate_metric(metric))
    }
}

/// Read a pixel dimension supplied by the host as a number or a numeric string.
/// Anything else (blank, text, negative, non-finite) is treated as absent.
pub fn parse_dimension(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}
