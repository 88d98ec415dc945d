use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::layout::{AvailableSpace, RowAreaTruncator, Truncated};
use crate::report::{ReportInput, ReportTable};
use crate::tree::label::LabelFormatter;
use crate::tree::node::TreeNode;
use crate::tree::TreeBuilder;

/// Generator lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorPhase {
    /// Setters may still be called
    Configuring,
    /// `generate` ran; the instance is spent
    Generated,
}

/// Turns one report into one treemap tree.
///
/// Configure with the setters, optionally truncate the report, then call
/// [`Generator::generate`] exactly once. Setters and `generate` fail with
/// [`Error::AlreadyGenerated`] afterwards.
#[derive(Debug)]
pub struct Generator {
    phase: GeneratorPhase,
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(metric_column: &str, metric_translation: &str) -> Self {
        Self {
            phase: GeneratorPhase::Configuring,
            config: GeneratorConfig::new(metric_column, metric_translation),
        }
    }

    pub fn phase(&self) -> GeneratorPhase {
        self.phase
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn configure(&mut self) -> Result<&mut GeneratorConfig> {
        match self.phase {
            GeneratorPhase::Configuring => Ok(&mut self.config),
            GeneratorPhase::Generated => Err(Error::AlreadyGenerated),
        }
    }

    pub fn set_root_node_name(&mut self, name: &str) -> Result<()> {
        self.configure()?.root_name = name.to_string();
        Ok(())
    }

    /// Absolute offset of the first row of the table being converted. Needed
    /// when exploring an aggregate row, whose table starts past row 0.
    pub fn set_initial_row_offset(&mut self, offset: u64) -> Result<()> {
        self.configure()?.initial_offset = offset;
        Ok(())
    }

    pub fn set_table_id(&mut self, table_id: &str) -> Result<()> {
        self.configure()?.table_id = table_id.to_string();
        Ok(())
    }

    /// Available screen size in pixels. A missing or unusable dimension
    /// disables area-based truncation in favor of the default row cap.
    pub fn set_available_dimensions(&mut self, width: Option<f64>, height: Option<f64>) -> Result<()> {
        let space = width.zip(height).and_then(|(w, h)| AvailableSpace::new(w, h));
        self.configure()?.available_space = space;
        Ok(())
    }

    pub fn enable_evolution(&mut self) -> Result<()> {
        self.configure()?.show_evolution = true;
        Ok(())
    }

    /// Fallback tooltip name for the past period, used when the past table has none.
    pub fn set_past_period_label(&mut self, label: &str) -> Result<()> {
        self.configure()?.past_period_label = label.to_string();
        Ok(())
    }

    pub fn set_label_formatter(&mut self, formatter: LabelFormatter) -> Result<()> {
        self.configure()?.label_formatter = formatter;
        Ok(())
    }

    pub fn truncator(&self) -> RowAreaTruncator {
        RowAreaTruncator::new(&self.config.metric_column, self.config.available_space)
    }

    /// Fold the rows too small to be legible into one aggregate row.
    /// `table` must be sorted by the configured metric.
    pub fn truncate_based_on_available_space(&self, table: ReportTable) -> Truncated {
        self.truncator().truncate(table)
    }

    /// Truncate the current-period table of `input`. The past table stays
    /// whole so rows folded now can still be matched by label.
    pub fn truncate_input(&self, input: ReportInput) -> ReportInput {
        match input {
            ReportInput::Single(table) => {
                ReportInput::Single(self.truncate_based_on_available_space(table).table)
            }
            ReportInput::Paired { past, current } => ReportInput::Paired {
                past,
                current: self.truncate_based_on_available_space(current).table,
            },
        }
    }

    /// Produce the tree. Evolution is dropped for this call when `input`
    /// is not a past/current pair.
    pub fn generate(&mut self, input: ReportInput) -> Result<TreeNode> {
        if self.phase == GeneratorPhase::Generated {
            return Err(Error::AlreadyGenerated);
        }

        if self.config.show_evolution && matches!(input, ReportInput::Single(_)) {
            tracing::warn!("Evolution enabled but input has a single period, disabling it");
            self.config.show_evolution = false;
        }

        let (past, current) = input.into_parts();
        let past = past.filter(|_| self.config.show_evolution);
        let past_period_label = past
            .as_ref()
            .and_then(|table| table.period.as_deref())
            .unwrap_or(self.config.past_period_label.as_str());

        let root = TreeBuilder::new(&self.config, past_period_label).build(&current, past.as_ref());

        self.phase = GeneratorPhase::Generated;
        Ok(root)
    }
}
