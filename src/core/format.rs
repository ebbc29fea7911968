//! Number formatting for display (en-US grouping)

/// Round half away from zero to `decimals` fraction digits
fn round_to(num: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (num.abs() * factor + 0.5).floor() / factor;
    if num.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Insert `,` every three digits of an unsigned integer string
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed `decimals` fraction digits with thousands separators
///
/// `format_with_commas(1234567.891, 1)` → `"1,234,567.9"`
pub fn format_with_commas(num: f64, decimals: usize) -> String {
    if !num.is_finite() {
        return if num.is_nan() {
            "NaN".to_string()
        } else if num > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }

    let rounded = round_to(num, decimals);
    let text = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Compact magnitude: `1.5B`, `2.3M`, `4.0K`, else a grouped integer
pub fn format_compact(num: f64) -> String {
    const SCALES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (threshold, suffix) in SCALES {
        if num >= threshold {
            return format!("{}{}", format_with_commas(num / threshold, 1), suffix);
        }
    }
    format_with_commas((num + 0.5).floor(), 0)
}

/// Up to two fraction digits, trailing zeros dropped; `None` for NaN
pub fn add_commas(num: f64) -> Option<String> {
    if num.is_nan() {
        return None;
    }
    let text = format_with_commas(num, 2);
    let trimmed = match text.split_once('.') {
        Some((int_part, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int_part.to_string()
            } else {
                format!("{}.{}", int_part, frac)
            }
        }
        None => text,
    };
    Some(trimmed)
}
