/// Evolution given to a current-period row with no past-period counterpart.
pub const NEW_ROW_EVOLUTION: i64 = 100;

/// Percentage change from `past` to `current`, rounded to a whole percent
/// (halves away from zero). Negative on decrease.
///
/// No change is 0%; growth from a past value of zero is reported as 100%.
pub fn evolution(current: f64, past: f64) -> i64 {
    let change = current - past;
    let percent = if change == 0.0 {
        0.0
    } else if past == 0.0 {
        100.0
    } else {
        change / past * 100.0
    };
    percent.round() as i64
}
