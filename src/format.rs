//! Italian-locale display strings for amounts.

/// `€` + Italian digit grouping, at most two decimals, trailing zeros
/// dropped: `1234567.5` -> `€1.234.567,5`.
pub fn format_euro(value: f64) -> String {
    if !value.is_finite() {
        return "€0".to_string();
    }
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut out = String::from("€");
    if negative && cents > 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if fraction > 0 {
        let digits = format!("{fraction:02}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Amount in millions with one decimal: `1234567.0` -> `€1.2M`.
pub fn format_millions(value: f64) -> String {
    format!("€{:.1}M", value / 1_000_000.0)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
