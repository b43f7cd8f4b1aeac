//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Datelike, Utc};

/// Calendar-month bucket key for a timestamp, e.g. "2025-03"
pub fn month_key(timestamp: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", timestamp.year(), timestamp.month())
}

/// Mask a card number for logging, keeping only the last four digits
pub fn mask_card_number(card_number: &str) -> String {
    let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return "****".to_string();
    }
    format!("**** **** **** {}", &digits[digits.len() - 4..])
}

/// Strip whitespace from a card number before validation
pub fn normalize_card_number(card_number: &str) -> String {
    card_number.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_key() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(month_key(ts), "2025-03");
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(
            mask_card_number("4242 4242 4242 4242"),
            "**** **** **** 4242"
        );
        assert_eq!(mask_card_number("123"), "****");
    }

    #[test]
    fn test_normalize_card_number() {
        assert_eq!(normalize_card_number("4242 4242 4242 4242"), "4242424242424242");
        assert_eq!(normalize_card_number("4242424242424242"), "4242424242424242");
    }
}
