//! Choosing the metric to graph and its display name.

/// Column holding the row label; never a metric.
pub const LABEL_COLUMN: &str = "label";

/// Default English names of the standard analytics metrics.
const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("nb_visits", "Visits"),
    ("nb_uniq_visitors", "Unique visitors"),
    ("nb_users", "Users"),
    ("nb_actions", "Actions"),
    ("nb_hits", "Pageviews"),
    ("max_actions", "Maximum actions in one visit"),
    ("sum_visit_length", "Total time spent by visitors (in seconds)"),
    ("bounce_count", "Bounces"),
    ("nb_visits_converted", "Visits converted"),
    ("nb_conversions", "Conversions"),
    ("revenue", "Revenue"),
    ("conversion_rate", "Conversion Rate"),
    ("bounce_rate", "Bounce Rate"),
    ("nb_actions_per_visit", "Actions per Visit"),
    ("avg_time_on_site", "Avg. Time on Website"),
];

/// First displayed column that is not the label column.
pub fn metric_to_graph<S: AsRef<str>>(columns_to_display: &[S]) -> Option<&str> {
    columns_to_display
        .iter()
        .map(AsRef::as_ref)
        .find(|column| *column != LABEL_COLUMN)
}

/// First entry of a comma-separated column list; the rest is discarded.
pub fn first_requested_column(column: &str) -> &str {
    column.split(',').next().unwrap_or("").trim()
}

/// Display name of `metric`, or the metric name itself when unknown.
pub fn translate_metric(metric: &str) -> &str {
    DEFAULT_TRANSLATIONS
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|(_, translation)| *translation)
        .unwrap_or(metric)
}
