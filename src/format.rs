//! Display helpers for listings: Indian currency notation, areas and
//! relative timestamps.

use chrono::{DateTime, Utc};

/// Rupees in crore / lakh / thousand shorthand, e.g. `₹1.25 Cr`, `₹45.00 L`, `₹75K`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "₹0".to_string();
    }

    if amount >= 10_000_000.0 {
        format!("₹{:.2} Cr", amount / 10_000_000.0)
    } else if amount >= 100_000.0 {
        format!("₹{:.2} L", amount / 100_000.0)
    } else if amount >= 1_000.0 {
        format!("₹{:.0}K", amount / 1_000.0)
    } else {
        format!("₹{}", group_indian(amount.round() as u64))
    }
}

/// `1,500 sqft`, grouping digits the Indian way
pub fn format_area(size: f64, unit: &str) -> String {
    if !size.is_finite() || size <= 0.0 {
        return format!("0 {}", unit);
    }
    let hundredths = (size * 100.0).round() as u64;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;
    if fraction == 0 {
        format!("{} {}", group_indian(whole), unit)
    } else {
        let decimals = format!("{:02}", fraction);
        format!("{}.{} {}", group_indian(whole), decimals.trim_end_matches('0'), unit)
    }
}

/// 12,34,567: last three digits, then pairs
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn price_per_unit(price: f64, area: f64) -> u64 {
    if !price.is_finite() || !area.is_finite() || price <= 0.0 || area <= 0.0 {
        return 0;
    }
    (price / area).round() as u64
}

pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;
    let years = days / 365;

    fn ago(n: i64, unit: &str) -> String {
        format!("{} {}{} ago", n, unit, if n > 1 { "s" } else { "" })
    }

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 30 {
        ago(days, "day")
    } else if months < 12 {
        ago(months, "month")
    } else {
        ago(years, "year")
    }
}

/// Cut to `max_chars` characters and append `...`
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// `+91 98765 43210` for 10-digit (or 91-prefixed) Indian numbers; anything else unchanged
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => format!("+91 {} {}", &digits[..5], &digits[5..]),
        12 if digits.starts_with("91") => format!("+91 {} {}", &digits[2..7], &digits[7..]),
        _ => phone.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn currency_shorthand() {
        assert_eq!(format_currency(0.0), "₹0");
        assert_eq!(format_currency(950.0), "₹950");
        assert_eq!(format_currency(75_000.0), "₹75K");
        assert_eq!(format_currency(500_000.0), "₹5.00 L");
        assert_eq!(format_currency(12_500_000.0), "₹1.25 Cr");
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1_500), "1,500");
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(123_456_789), "12,34,56,789");
    }

    #[test]
    fn areas() {
        assert_eq!(format_area(1500.0, "sqft"), "1,500 sqft");
        assert_eq!(format_area(2.5, "acres"), "2.5 acres");
        assert_eq!(format_area(0.0, "sqm"), "0 sqm");
        assert_eq!(format_area(2.999, "acres"), "3 acres");
        assert_eq!(format_area(9.996, "acres"), "10 acres");
        assert_eq!(format_area(1.05, "acres"), "1.05 acres");
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "Just now");
        assert_eq!(format_relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative_time(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_relative_time(now - Duration::days(45), now), "1 month ago");
        assert_eq!(format_relative_time(now - Duration::days(800), now), "2 years ago");
    }

    #[test]
    fn misc() {
        assert_eq!(price_per_unit(5_000_000.0, 1_000.0), 5_000);
        assert_eq!(price_per_unit(5_000_000.0, 0.0), 0);
        assert_eq!(truncate("Sunny corner flat", 5), "Sunny...");
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(format_phone("9876543210"), "+91 98765 43210");
        assert_eq!(format_phone("91 98765 43210"), "+91 98765 43210");
        assert_eq!(format_phone("12345"), "12345");
    }
}
