use super::contract::FieldValue;

/// Coerce a raw amount field to a finite, non-negative euro value.
///
/// Absent, unparseable, non-finite and negative inputs all become `0.0`.
pub fn coerce_amount(value: Option<&FieldValue>) -> f64 {
    let parsed = match value {
        Some(FieldValue::Number(n)) => Some(*n),
        Some(FieldValue::Text(s)) => parse_amount_text(s),
        Some(FieldValue::Bool(_)) | Some(FieldValue::Other(_)) | None => None,
    };
    clamp_amount(parsed.unwrap_or(0.0))
}

/// The signed numeric reading of an amount field, before clamping.
///
/// Strict: text must be a number as a whole, so `"123abc"` is `None` here
/// even though [`coerce_amount`] reads it as 123.
pub(crate) fn raw_amount(value: Option<&FieldValue>) -> Option<f64> {
    match value {
        Some(FieldValue::Number(n)) if n.is_finite() => Some(*n),
        Some(FieldValue::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Parse a textual amount.
///
/// The whole (trimmed) string is tried first; failing that, the longest
/// leading numeric prefix is used, so `"1500.50 EUR"` reads as `1500.5`.
pub fn parse_amount_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        // `f64::from_str` accepts "inf" and "NaN"
        return n.is_finite().then_some(n);
    }
    leading_number(trimmed)
}

fn clamp_amount(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
