/// Build the hover text for a node: the metric value with its display name,
/// followed by the change against the past period when evolution is known.
pub fn build_tooltip(
    value: f64,
    metric_translation: &str,
    evolution: Option<i64>,
    past_period: &str,
) -> String {
    let base = format!("\n{} {}", format_metric_value(value), metric_translation);
    match evolution {
        Some(change) => format!(
            "{}\n{} compared to {}",
            base,
            format_evolution(change),
            past_period
        ),
        None => base,
    }
}

/// Whole numbers print without a fractional part.
pub fn format_metric_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Signed percentage, e.g. `+20%` or `-7%`. Zero is shown as growth.
pub fn format_evolution(change: i64) -> String {
    let sign = if change >= 0 { '+' } else { '-' };
    format!("{}{}%", sign, change.unsigned_abs())
}
