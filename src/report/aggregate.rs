use compact_str::CompactString;

use super::types::{ReportRow, RowKind, AGGREGATE_LABEL};

/// Fold `rows` into a single aggregate row.
/// Every numeric column of the result is the sum of that column across `rows`;
/// metadata and sub-table links are not carried over.
pub fn fold_rows(rows: &[ReportRow]) -> ReportRow {
    let mut folded = ReportRow {
        label: CompactString::new(AGGREGATE_LABEL),
        kind: RowKind::Aggregate,
        ..ReportRow::default()
    };

    for row in rows {
        for (column, value) in &row.columns {
            let total = folded.columns.entry(column.clone()).or_insert(Some(0.0));
            *total = Some(total.unwrap_or(0.0) + value.unwrap_or(0.0));
        }
    }

    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_every_column() {
        let rows = vec![
            ReportRow::new("a")
                .with_metric("nb_visits", 3.0)
                .with_metric("nb_actions", 10.0),
            ReportRow::new("b").with_metric("nb_visits", 2.0),
        ];

        let folded = fold_rows(&rows);

        assert!(folded.is_aggregate());
        assert_eq!(folded.label, AGGREGATE_LABEL);
        assert_eq!(folded.metric("nb_visits"), 5.0);
        assert_eq!(folded.metric("nb_actions"), 10.0);
    }

    #[test]
    fn drops_metadata_and_sub_tables() {
        let rows = vec![ReportRow::new("a")
            .with_metric("nb_visits", 1.0)
            .with_metadata("logo", "a.png")
            .with_sub_table(7)];

        let folded = fold_rows(&rows);

        assert!(folded.metadata.is_empty());
        assert_eq!(folded.sub_table_id, None);
    }

    #[test]
    fn folding_an_aggregate_keeps_its_totals() {
        let previous = fold_rows(&[ReportRow::new("x").with_metric("nb_visits", 40.0)]);
        let folded = fold_rows(&[previous, ReportRow::new("y").with_metric("nb_visits", 2.0)]);
        assert_eq!(folded.metric("nb_visits"), 42.0);
    }
}
