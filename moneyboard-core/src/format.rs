//! Number and label formatting shared by both panels.

use chrono::Month;

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// Compares the exact fractional part so values just below a half, such as
/// `0.49999999999999994`, round down.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Fixed-point with exactly two decimals, never scientific notation.
///
/// Exact ties round away from zero (`0.125 -> "0.13"`). `{:.2}` alone rounds
/// them to even. An f64 sits exactly on a tie only at an odd multiple of 1/8.
pub fn fixed2(value: f64) -> String {
    let eighths = value.abs() * 8.0;
    if eighths < 1e15 && eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (value.abs() * 100.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:02}", cents / 100, cents % 100);
    }
    format!("{value:.2}")
}

/// Fixed-point with `decimals` digits and `,` thousands separators.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // "-0.00" is printed as "0.00"
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `symbol` followed by [`format_number`], e.g. `$1,530`.
pub fn format_currency(symbol: &str, value: f64, decimals: usize) -> String {
    let n = format_number(value, decimals);
    match n.strip_prefix('-') {
        Some(abs) => format!("-{symbol}{abs}"),
        None => format!("{symbol}{n}"),
    }
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}
