//! Display helpers for amounts, percentages and table cells

/// Insert thousands separators into a run of digits
fn group_digits(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an integer with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    match s.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits)),
        None => group_digits(&s),
    }
}

/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn format_money(val: f64) -> String {
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let sign = if val < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_digits(int_part), dec_part)
}

/// Format a share with one decimal: 12.5%
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format a period-over-period change, "n/a" when there is nothing to compare
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) if pct > 0.0 => format!("+{:.1}%", pct),
        Some(pct) => format!("{:.1}%", pct),
        None => "n/a".to_string(),
    }
}

/// Cut a cell to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}
