use chrono::{DateTime, Utc};

/// "$12.50" from a price in cents
pub fn format_price(cents: u64) -> String {
    if cents == 0 {
        return "Free".to_string();
    }
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// "Mar 5, 2026"
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

pub fn format_count(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}
