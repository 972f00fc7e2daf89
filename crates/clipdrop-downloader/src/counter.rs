use serde_json::Value;

/// Formats a raw engagement counter for display.
///
/// Values of a million or more become `"{:.1}M"`, values of a thousand or
/// more become `"{:.1}K"`, smaller values are printed as is. Integers are
/// taken exactly over the whole `i64`/`u64` range, floats are truncated
/// (clamping at the `i128` bounds), numeric strings are parsed, anything else
/// formats to `"0"`.
pub fn format_count(raw: &Value) -> String {
    match as_integer(raw) {
        Some(n) => format_number(n),
        None => "0".to_string(),
    }
}

pub fn format_number(n: i128) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn as_integer(raw: &Value) -> Option<i128> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i128)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
