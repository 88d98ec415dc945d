use std::fmt;
use std::sync::Arc;

use crate::report::types::ReportRow;

type FormatFn = dyn Fn(&ReportRow, &str) -> String + Send + Sync;

/// Actions reports whose rows are URL path segments.
const URL_PATH_REPORTS: &[&str] = &["getPageUrls", "getEntryPageUrls", "getExitPageUrls"];

/// Rewrites a row's label before it becomes a node name.
/// The default formatter returns labels unchanged.
#[derive(Clone, Default)]
pub struct LabelFormatter {
    format: Option<Arc<FormatFn>>,
}

impl LabelFormatter {
    pub fn new(format: impl Fn(&ReportRow, &str) -> String + Send + Sync + 'static) -> Self {
        Self {
            format: Some(Arc::new(format)),
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    /// Appends `/` to rows that link to a sub-table, marking them as
    /// directories that can be drilled into. Leaf labels are untouched.
    pub fn path_segments() -> Self {
        Self::new(|row, label| {
            if row.sub_table_id.is_some() {
                format!("{label}/")
            } else {
                label.to_string()
            }
        })
    }

    /// Formatter implied by an API method such as `Actions.getPageUrls`.
    pub fn for_api_method(api_method: &str) -> Option<Self> {
        match api_method.split_once('.') {
            Some(("Actions", method)) if URL_PATH_REPORTS.contains(&method) => {
                Some(Self::path_segments())
            }
            _ => None,
        }
    }

    pub fn format(&self, row: &ReportRow, label: &str) -> String {
        match &self.format {
            Some(format) => format(row, label),
            None => label.to_string(),
        }
    }
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFormatter")
            .field("custom", &self.format.is_some())
            .finish()
    }
}
