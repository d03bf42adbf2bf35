//! Display rules shared by the content builder and the CLI.
//!
//! Currency: `$` prefix, comma thousands separators, two decimals.
//! Market-cap figures outside the ranked table carry an `M` suffix.
//! Percentages: one decimal and a trailing `%`.

/// Format `value` with `decimals` places and comma-grouped integer digits.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int, frac) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int.len() / 3 + 1);
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `$1,234.50`
pub fn money(value: f64) -> String {
    format!("${}", with_thousands(value, 2))
}

/// `$1,234.50M`: a market-cap figure in millions.
pub fn market_cap_millions(value: f64) -> String {
    format!("{}M", money(value))
}

/// `12,345`
pub fn count(n: usize) -> String {
    with_thousands(n as f64, 0)
}

/// `60.0%`: `value` is already a percentage, not a fraction.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// First `max_chars` characters of `name`, never splitting a code point.
pub fn truncate_chars(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}
