pub mod evolution;
pub mod label;
pub mod node;
pub mod tooltip;

use std::collections::HashMap;

use compact_str::CompactString;

use self::evolution::{evolution, NEW_ROW_EVOLUTION};
use self::node::{NodeData, TreeNode, ROOT_ID, TOOLTIP_KEY};
use self::tooltip::build_tooltip;
use crate::config::GeneratorConfig;
use crate::report::types::ReportRow;
use crate::report::ReportTable;

/// Row metadata copied into nodes when present.
pub const METADATA_TO_COPY: &[&str] = &["logo", "url"];

/// Row id used for the aggregate row in node ids.
pub const AGGREGATE_ROW_MARKER: i64 = -1;

/// Converts a report (and optionally its past period) into a treemap tree.
pub struct TreeBuilder<'a> {
    config: &'a GeneratorConfig,
    past_period_label: &'a str,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig, past_period_label: &'a str) -> Self {
        Self {
            config,
            past_period_label,
        }
    }

    /// Build the root node with one child per non-zero row of `current`,
    /// in table order.
    ///
    /// Evolution values are attached only when the config asks for them and
    /// `past` is given; asking without a past table silently builds without them.
    pub fn build(&self, current: &ReportTable, past: Option<&ReportTable>) -> TreeNode {
        let past = match (self.config.show_evolution, past) {
            (true, None) => {
                tracing::warn!("Evolution requested without a past-period table, skipping it");
                None
            }
            (true, past) => past,
            (false, _) => None,
        };
        let past_index = past.map(ReportTable::label_index);

        let mut root = TreeNode::new(
            ROOT_ID.to_string(),
            &self.config.root_name,
            NodeData::default(),
        );

        let mut next_row_id = self.config.initial_offset;
        for row in &current.rows {
            match self.make_node_from_row(row, current.len(), past_index.as_ref(), &mut next_row_id) {
                Some(child) => root.children.push(child),
                None => tracing::debug!("Dropping zero-valued row '{}'", row.label),
            }
        }

        tracing::info!(
            "Built treemap '{}' with {} nodes from {} rows (evolution={})",
            self.config.root_name,
            root.children.len(),
            current.len(),
            past_index.is_some()
        );

        root
    }

    /// Node for one row, or `None` when the row's metric value is zero.
    /// `next_row_id` advances once per emitted normal row.
    fn make_node_from_row(
        &self,
        row: &ReportRow,
        row_count: usize,
        past_index: Option<&HashMap<&str, &ReportRow>>,
        next_row_id: &mut u64,
    ) -> Option<TreeNode> {
        let value = row.metric(&self.config.metric_column);
        if value == 0.0 {
            return None;
        }

        let mut data = NodeData {
            area: Some(value),
            ..NodeData::default()
        };

        let (id, name) = if row.is_aggregate() {
            let offset = self.config.initial_offset;
            data.aggregate_offset = Some(offset + (row_count as u64).saturating_sub(1));
            let id = format!("{}_{}_{}", self.config.table_id, offset, AGGREGATE_ROW_MARKER);
            (id, row.label.to_string())
        } else {
            for &key in METADATA_TO_COPY {
                if let Some(value) = row.metadata.get(key) {
                    data.metadata.insert(CompactString::new(key), value.clone());
                }
            }

            if let Some(index) = past_index {
                data.evolution = Some(match index.get(row.label.as_str()) {
                    Some(past_row) => {
                        evolution(value, past_row.metric(&self.config.metric_column))
                    }
                    None => NEW_ROW_EVOLUTION,
                });
            }

            data.sub_table_id = row.sub_table_id;

            let id = format!("{}_{}", self.config.table_id, next_row_id);
            *next_row_id += 1;
            (id, self.config.label_formatter.format(row, &row.label))
        };

        let tooltip = build_tooltip(
            value,
            &self.config.metric_translation,
            data.evolution,
            self.past_period_label,
        );
        data.metadata
            .insert(CompactString::new(TOOLTIP_KEY), tooltip.into());

        Some(TreeNode::new(id, &name, data))
    }
}
