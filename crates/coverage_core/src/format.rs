//! en-US dollar formatting with no fraction digits.
//!
//! `300000` → `$300,000`, `1234.5` → `$1,235`, `-5000` → `-$5,000`.
//! Halves round away from zero.

/// Format an amount as whole US dollars with thousands separators.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let negative = amount < 0.0;
    let sign = if negative { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}$∞");
    }

    let rounded = amount.abs().round();
    if rounded == 0.0 {
        return "$0".to_string();
    }
    // f64 prints integers above 2^53 exactly enough for display.
    let digits = format!("{rounded:.0}");
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
