/// Parses a raw text cell as a finite number.
///
/// Surrounding whitespace is ignored. Empty, unparsable and non-finite values
/// (`NaN`, `inf`) are `None`.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerces a JSON value to a finite number.
///
/// Numbers and numeric strings are accepted; booleans, nulls, arrays and
/// objects are not.
pub fn coerce_json_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => coerce_number(s),
        _ => None,
    }
}
