pub mod aggregate;
pub mod metric;
pub mod types;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::types::ReportRow;
use crate::error::{Error, Result};

/// An ordered report, sorted descending by the metric being graphed.
///
/// Sorting is a precondition: the truncation and node id rules assume it and
/// do not check it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    #[serde(default)]
    pub rows: Vec<ReportRow>,
    /// Localized short name of the period this table covers (e.g. "Oct 16, 2026")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl ReportTable {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows, period: None }
    }

    pub fn with_period(mut self, period: &str) -> Self {
        self.period = Some(period.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of `column` for every row, in table order.
    pub fn metric_values(&self, column: &str) -> Vec<f64> {
        self.rows.iter().map(|row| row.metric(column)).collect()
    }

    /// Label → row lookup for repeated matching. The first row wins on duplicate labels.
    pub fn label_index(&self) -> HashMap<&str, &ReportRow> {
        let mut index = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            index.entry(row.label.as_str()).or_insert(row);
        }
        index
    }
}

/// Report data handed to the generator: one table, or a past/current pair
/// when evolution values are wanted.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportInput {
    Single(ReportTable),
    Paired {
        past: ReportTable,
        current: ReportTable,
    },
}

impl ReportInput {
    /// Build from a list of period tables ordered oldest first.
    pub fn from_periods(mut tables: Vec<ReportTable>) -> Result<Self> {
        match tables.len() {
            0 => Err(Error::NoPeriods),
            1 => Ok(Self::Single(tables.remove(0))),
            2 => {
                let current = tables.remove(1);
                let past = tables.remove(0);
                Ok(Self::Paired { past, current })
            }
            n => Err(Error::TooManyPeriods(n)),
        }
    }

    /// Parse either a single table object or an array of one or two tables.
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<RawInput>(json)? {
            RawInput::Periods(tables) => Self::from_periods(tables),
            RawInput::Table(table) => Ok(Self::Single(table)),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The table the tree is drawn from.
    pub fn current(&self) -> &ReportTable {
        match self {
            Self::Single(table) => table,
            Self::Paired { current, .. } => current,
        }
    }

    pub fn past(&self) -> Option<&ReportTable> {
        match self {
            Self::Single(_) => None,
            Self::Paired { past, .. } => Some(past),
        }
    }

    /// Whether the current period has any rows to draw.
    pub fn has_data(&self) -> bool {
        !self.current().is_empty()
    }

    pub fn into_parts(self) -> (Option<ReportTable>, ReportTable) {
        match self {
            Self::Single(table) => (None, table),
            Self::Paired { past, current } => (Some(past), current),
        }
    }
}

impl From<ReportTable> for ReportInput {
    fn from(table: ReportTable) -> Self {
        Self::Single(table)
    }
}

// Arrays are tried first: a derived struct would also accept a sequence.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Periods(Vec<ReportTable>),
    Table(ReportTable),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(labels: &[&str]) -> ReportTable {
        ReportTable::new(labels.iter().map(|l| ReportRow::new(l)).collect())
    }

    #[test]
    fn period_list_becomes_single_or_pair() {
        let single = ReportInput::from_periods(vec![table(&["a"])]).unwrap();
        assert!(matches!(single, ReportInput::Single(_)));

        let paired = ReportInput::from_periods(vec![table(&["old"]), table(&["new"])]).unwrap();
        assert_eq!(paired.past().unwrap().rows[0].label, "old");
        assert_eq!(paired.current().rows[0].label, "new");
    }

    #[test]
    fn rejects_empty_and_oversized_period_lists() {
        assert!(matches!(ReportInput::from_periods(vec![]), Err(Error::NoPeriods)));
        assert!(matches!(
            ReportInput::from_periods(vec![table(&[]), table(&[]), table(&[])]),
            Err(Error::TooManyPeriods(3))
        ));
    }

    #[test]
    fn parses_object_and_array_json() {
        let single = ReportInput::from_json_str(
            r#"{"rows":[{"label":"a","columns":{"nb_visits":3}}]}"#,
        )
        .unwrap();
        assert_eq!(single.current().rows[0].metric("nb_visits"), 3.0);
        assert!(single.past().is_none());

        let paired = ReportInput::from_json_str(
            r#"[{"rows":[],"period":"Oct 15, 2026"},{"rows":[{"label":"a"}]}]"#,
        )
        .unwrap();
        assert_eq!(paired.past().unwrap().period.as_deref(), Some("Oct 15, 2026"));
        assert!(paired.has_data());
    }

    #[test]
    fn label_index_keeps_first_duplicate() {
        let mut t = table(&["a", "b"]);
        t.rows.push(ReportRow::new("a").with_metric("nb_visits", 9.0));

        let index = t.label_index();
        assert_eq!(index.len(), 2);
        assert_eq!(index["a"].metric("nb_visits"), 0.0);
        assert_eq!(index["b"].label, "b");
    }
}
