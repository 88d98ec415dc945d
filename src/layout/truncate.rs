use compact_str::CompactString;

use crate::report::aggregate::fold_rows;
use crate::report::ReportTable;

/// Row cap used when no usable dimensions or metric total are available.
pub const DEFAULT_MAX_ELEMENTS: usize = 10;

/// Smallest legible node: 20px * 20px.
pub const MIN_NODE_AREA: f64 = 400.0;

/// Screen space the treemap will be drawn into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableSpace {
    pub width: f64,
    pub height: f64,
}

impl AvailableSpace {
    /// `None` unless both dimensions are finite and non-negative.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let usable = |v: f64| v.is_finite() && v >= 0.0;
        (usable(width) && usable(height)).then_some(Self { width, height })
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Relative slack on the area comparison. Folding rows into an aggregate
/// changes the f64 summation order, so the same row's share can move by a
/// few ulps between passes.
const AREA_TOLERANCE: f64 = 1e-9;

/// Outcome of truncating one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncated {
    pub table: ReportTable,
    /// Zero-based index of the last row kept as-is
    pub keep_through: usize,
    /// Number of rows folded into the aggregate row (0 when nothing was cut)
    pub folded: usize,
}

/// Decides how many leading rows of a sorted report are worth laying out.
#[derive(Debug, Clone)]
pub struct RowAreaTruncator {
    metric_column: CompactString,
    space: Option<AvailableSpace>,
}

impl RowAreaTruncator {
    pub fn new(metric_column: &str, space: Option<AvailableSpace>) -> Self {
        Self {
            metric_column: CompactString::new(metric_column),
            space,
        }
    }

    fn default_keep_through(&self) -> usize {
        DEFAULT_MAX_ELEMENTS - 1
    }

    /// Index of the last row to keep.
    ///
    /// Rows are scanned in table order and counted while their proportional
    /// share of the available area stays at or above the minimum node area;
    /// the index is that count minus one, so row 0 always survives.
    pub fn keep_through_index(&self, table: &ReportTable) -> usize {
        let Some(space) = self.space else {
            tracing::debug!(
                "No usable dimensions, keeping through row {}",
                self.default_keep_through()
            );
            return self.default_keep_through();
        };

        let total_area = space.area();
        let values = table.metric_values(&self.metric_column);
        let metric_sum: f64 = values.iter().sum();

        if metric_sum == 0.0 {
            tracing::debug!(
                "Metric '{}' sums to zero over {} rows, using default cap",
                self.metric_column,
                values.len()
            );
            return self.default_keep_through();
        }

        let min_area = MIN_NODE_AREA * (1.0 - AREA_TOLERANCE);
        let large_enough = values
            .iter()
            .take_while(|&&value| total_area * value / metric_sum >= min_area)
            .count();

        tracing::debug!(
            "{} of {} rows reach {:.0}px² in {:.0}x{:.0}",
            large_enough,
            values.len(),
            MIN_NODE_AREA,
            space.width,
            space.height
        );

        large_enough.saturating_sub(1)
    }

    /// Keep rows `0..=keep_through` and fold the rest into one aggregate row.
    pub fn truncate(&self, table: ReportTable) -> Truncated {
        let keep_through = self.keep_through_index(&table);
        let (table, folded) = truncate_after(table, keep_through);
        Truncated {
            table,
            keep_through,
            folded,
        }
    }
}

/// Replace every row after `keep_through` with a single aggregate row.
/// Returns the new table and the number of rows folded.
///
/// A table that ends in exactly one aggregate row past the cut is returned
/// unchanged, which makes repeated truncation a no-op.
pub fn truncate_after(mut table: ReportTable, keep_through: usize) -> (ReportTable, usize) {
    let keep = keep_through.saturating_add(1);
    if table.rows.len() <= keep {
        return (table, 0);
    }

    let trailing = table.rows.split_off(keep);
    if let [only] = trailing.as_slice() {
        if only.is_aggregate() {
            table.rows.extend(trailing);
            return (table, 0);
        }
    }

    let folded = trailing.len();
    table.rows.push(fold_rows(&trailing));
    (table, folded)
}
