//! Display helpers for terminal output.

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(default).to_string()
}

/// Format an ISO timestamp as a short date
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Ñandú runner", 6), "Ñan...");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-02-01T10:00:00.000Z"), "Feb 01, 2024");
        assert_eq!(format_date("2024-02-01 garbage"), "2024-02-01");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_small_helpers() {
        assert_eq!(format_optional(None, "-"), "-");
        assert_eq!(format_optional(Some(""), "-"), "-");
        assert_eq!(format_optional(Some("x"), "-"), "x");
        assert_eq!(format_money(24850.754), "$24850.75");
        assert_eq!(yes_no(true), "yes");
    }
}
