//! Host-facing entry point: request parameters in, treemap tree out.
//!
//! Fetching the report is the host's job; the request only describes how
//! the already-fetched input should be converted.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{parse_dimension, TreemapConfig, DEFAULT_METRIC};
use crate::error::Result;
use crate::generator::Generator;
use crate::report::metric::first_requested_column;
use crate::report::ReportInput;
use crate::tree::label::LabelFormatter;
use crate::tree::node::TreeNode;

/// Period name for which evolution cannot be computed.
pub const RANGE_PERIOD: &str = "range";

/// Parameters of one treemap data request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapRequest {
    /// Report method, e.g. `Actions.getPageUrls`
    pub api_method: String,
    /// Comma-separated metric columns; only the first is graphed
    pub column: String,
    /// `day`, `week`, `month`, `year` or `range`
    pub period: String,
    /// Pixels, as a number or numeric string
    pub available_width: Option<serde_json::Value>,
    pub available_height: Option<serde_json::Value>,
    pub show_evolution_values: bool,
    /// Absolute offset of the first row (aggregate-row exploration)
    pub filter_offset: u64,
    /// Set when a sub-table is being loaded. Hosts send it as a number or a string.
    #[serde(rename = "idSubtable", deserialize_with = "sub_table_id")]
    pub id_subtable: Option<String>,
    pub root_name: String,
}

impl TreemapRequest {
    pub fn metric_column(&self) -> &str {
        match first_requested_column(&self.column) {
            "" => DEFAULT_METRIC,
            column => column,
        }
    }

    /// Display `translation` for the metric this request graphs.
    pub fn override_translation(&self, config: &mut TreemapConfig, translation: &str) {
        config
            .translations
            .insert(self.metric_column().to_string(), translation.to_string());
    }

    fn loads_sub_table(&self) -> bool {
        self.id_subtable.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Evolution needs a comparable previous period: never for ranges or
    /// sub-table loads.
    pub fn evolution_allowed(&self) -> bool {
        self.show_evolution_values && self.period != RANGE_PERIOD && !self.loads_sub_table()
    }

    /// A configured generator for this request.
    pub fn generator(&self, config: &TreemapConfig) -> Result<Generator> {
        let metric = self.metric_column();
        let mut generator = Generator::new(metric, config.translation_for(metric));

        generator.set_root_node_name(&self.root_name)?;
        generator.set_initial_row_offset(self.filter_offset)?;
        generator.set_table_id(self.id_subtable.as_deref().unwrap_or(""))?;
        generator.set_available_dimensions(
            self.available_width.as_ref().and_then(parse_dimension),
            self.available_height.as_ref().and_then(parse_dimension),
        )?;
        if self.evolution_allowed() {
            generator.enable_evolution()?;
        }
        if let Some(formatter) = LabelFormatter::for_api_method(&self.api_method) {
            generator.set_label_formatter(formatter)?;
        }

        Ok(generator)
    }

    /// Truncate the current period to the available space and build the tree.
    pub fn generate(&self, config: &TreemapConfig, input: ReportInput) -> Result<TreeNode> {
        let mut generator = self.generator(config)?;
        tracing::debug!(
            "Treemap request: method='{}' metric='{}' offset={} evolution={}",
            self.api_method,
            generator.config().metric_column,
            self.filter_offset,
            generator.config().show_evolution
        );

        let input = generator.truncate_input(input);
        generator.generate(input)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubTableId {
    Number(u64),
    Text(String),
}

fn sub_table_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawSubTableId>::deserialize(deserializer)?.map(|id| match id {
        RawSubTableId::Number(n) => n.to_string(),
        RawSubTableId::Text(text) => text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::ReportRow;
    use crate::report::ReportTable;
    use serde_json::json;

    #[test]
    fn evolution_blocked_for_ranges_and_sub_tables() {
        let mut request = TreemapRequest {
            show_evolution_values: true,
            period: "day".to_string(),
            ..TreemapRequest::default()
        };
        assert!(request.evolution_allowed());

        request.period = RANGE_PERIOD.to_string();
        assert!(!request.evolution_allowed());

        request.period = "week".to_string();
        request.id_subtable = Some("12".to_string());
        assert!(!request.evolution_allowed());

        request.id_subtable = Some(String::new());
        assert!(request.evolution_allowed());
    }

    #[test]
    fn sub_table_id_accepts_number_or_string() {
        let numeric: TreemapRequest = serde_json::from_value(json!({
            "idSubtable": 12,
            "show_evolution_values": true
        }))
        .unwrap();
        assert_eq!(numeric.id_subtable.as_deref(), Some("12"));
        assert!(!numeric.evolution_allowed());

        let text: TreemapRequest = serde_json::from_value(json!({"idSubtable": "12"})).unwrap();
        assert_eq!(text.id_subtable, numeric.id_subtable);

        let null: TreemapRequest = serde_json::from_value(json!({"idSubtable": null})).unwrap();
        assert_eq!(null.id_subtable, None);
        assert_eq!(TreemapRequest::default().id_subtable, None);
    }

    #[test]
    fn translation_override_follows_graphed_metric() {
        let mut config = TreemapConfig::default();
        let request = TreemapRequest::default();
        request.override_translation(&mut config, "Sessions");

        let generator = request.generator(&config).unwrap();
        assert_eq!(generator.config().metric_column, "nb_visits");
        assert_eq!(generator.config().metric_translation, "Sessions");

        let request = TreemapRequest {
            column: " nb_hits , nb_visits".to_string(),
            ..TreemapRequest::default()
        };
        request.override_translation(&mut config, "Hits");
        let generator = request.generator(&config).unwrap();
        assert_eq!(generator.config().metric_translation, "Hits");
    }

    #[test]
    fn metric_column_defaults_and_splits() {
        let mut request = TreemapRequest::default();
        assert_eq!(request.metric_column(), "nb_visits");
        request.column = "nb_hits,nb_visits".to_string();
        assert_eq!(request.metric_column(), "nb_hits");
    }

    #[test]
    fn generator_reflects_request() {
        let request: TreemapRequest = serde_json::from_value(json!({
            "api_method": "Actions.getPageUrls",
            "column": "nb_hits",
            "period": "day",
            "available_width": "640",
            "available_height": 480,
            "show_evolution_values": true,
            "filter_offset": 7,
            "root_name": "Pages"
        }))
        .unwrap();

        let generator = request.generator(&TreemapConfig::default()).unwrap();
        let config = generator.config();

        assert_eq!(config.metric_column, "nb_hits");
        assert_eq!(config.metric_translation, "Pageviews");
        assert_eq!(config.initial_offset, 7);
        assert_eq!(config.available_space.map(|s| s.area()), Some(640.0 * 480.0));
        assert!(config.show_evolution);
        assert_eq!(config.root_name, "Pages");

        let dir = ReportRow::new("blog").with_sub_table(3);
        assert_eq!(config.label_formatter.format(&dir, "blog"), "blog/");
    }

    #[test]
    fn generate_truncates_and_namespaces_ids() {
        let request = TreemapRequest {
            column: "nb_visits".to_string(),
            available_width: Some(json!(100)),
            available_height: Some(json!(100)),
            id_subtable: Some("9".to_string()),
            ..TreemapRequest::default()
        };
        let table = ReportTable::new(
            [5000.0, 3000.0, 1500.0, 400.0, 100.0]
                .iter()
                .enumerate()
                .map(|(i, &v)| ReportRow::new(&format!("r{i}")).with_metric("nb_visits", v))
                .collect(),
        );

        let root = request
            .generate(&TreemapConfig::default(), ReportInput::Single(table))
            .unwrap();

        let ids: Vec<&str> = root.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["9_0", "9_1", "9_2", "9_3", "9_0_-1"]);
        assert_eq!(root.children[4].data.aggregate_offset, Some(4));
    }
}
