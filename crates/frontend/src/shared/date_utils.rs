/// Utilities for date, time and money formatting
///
/// Provides consistent display formatting across the application
use chrono::NaiveDate;
use contracts::domain::common::parse_timestamp;

/// Format a record timestamp as `Oct 14, 2024`.
/// Unparseable input is returned as is.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Format a record timestamp as `Oct 14, 2024 15:42`.
pub fn format_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Chart label for a month: `Jan 24`
pub fn month_label(month_start: NaiveDate) -> String {
    month_start.format("%b %y").to_string()
}

/// `$1,234.50`; negative amounts as `-$12.00`
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Compact axis value: `12.5K`, `1.2M`
pub fn format_compact(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", amount / 1_000.0)
    } else {
        format!("{:.0}", amount)
    }
}
