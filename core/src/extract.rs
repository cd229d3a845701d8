//! Notification text classification and amount extraction
//!
//! Decides whether free-form notification text announces an incoming
//! payment, and pulls the first monetary amount out of it. Pure functions;
//! the sequencer never sees raw notification text.

use std::sync::OnceLock;

use regex::Regex;

/// Keywords that mark a notification as a "money received" event.
const PAYMENT_KEYWORDS: [&str; 2] = ["received", "credited"];

/// Amount extracted from notification text.
///
/// `value` is whole rupees; any fractional part in the source text is
/// truncated, never rounded. `None` means the text classified as a payment
/// but carried no readable numeral (announced with the fallback phrase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAmount {
    pub value: Option<u64>,
}

/// Grouped-thousands numeral with an optional decimal suffix.
///
/// Capture 1 is the integer part (commas included); the `[.,]\d+` suffix is
/// matched so it cannot bleed into a later scan, then discarded.
fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:,\d{3})*|\d+)(?:[.,]\d+)?").expect("amount pattern is valid")
    })
}

/// Classify notification text and extract the payment amount.
///
/// Returns `None` when the text does not denote a received payment (no
/// announcement). Returns `Some` with `value: None` when it does but no
/// numeral was found, which degrades to the generic fallback phrase.
pub fn classify_and_extract(text: &str, extra_lines: &[String]) -> Option<ParsedAmount> {
    let effective = effective_text(text, extra_lines);

    let lowered = effective.to_lowercase();
    if !PAYMENT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return None;
    }

    let value = amount_pattern().captures(&effective).and_then(|caps| {
        let digits: String = caps[1].chars().filter(|c| *c != ',').collect();
        digits.parse::<u64>().ok()
    });

    Some(ParsedAmount { value })
}

/// Join the primary text with auxiliary lines when the primary text is empty
/// or auxiliary lines are present.
fn effective_text(text: &str, extra_lines: &[String]) -> String {
    if extra_lines.is_empty() {
        return text.to_string();
    }

    let mut parts: Vec<&str> = Vec::with_capacity(extra_lines.len() + 1);
    if !text.is_empty() {
        parts.push(text);
    }
    parts.extend(extra_lines.iter().map(String::as_str));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::{classify_and_extract, ParsedAmount};

    #[test]
    fn extracts_comma_grouped_amount() {
        let parsed = classify_and_extract("You received Rs. 1,500 in your account", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(1_500) }));
    }

    #[test]
    fn non_payment_text_is_not_applicable() {
        assert_eq!(classify_and_extract("Balance check requested", &[]), None);
    }

    #[test]
    fn keywords_without_numeral_degrade_to_no_amount() {
        let parsed = classify_and_extract("Payment received", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: None }));
    }

    #[test]
    fn credited_keyword_classifies() {
        let parsed = classify_and_extract("NPR 250 credited to your wallet", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(250) }));
    }

    #[test]
    fn classification_is_case_insensitive() {
        let parsed = classify_and_extract("RECEIVED Rs 75", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(75) }));
    }

    #[test]
    fn decimal_fraction_is_truncated() {
        let parsed = classify_and_extract("You received Rs. 1,500.75 today", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(1_500) }));

        let parsed = classify_and_extract("received 99.99", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(99) }));
    }

    #[test]
    fn first_numeral_wins() {
        let parsed = classify_and_extract("received 20 rupees, balance 9,000", &[]);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(20) }));
    }

    #[test]
    fn extra_lines_join_into_effective_text() {
        let lines = vec!["Rs. 840 received from Ram".to_string()];
        let parsed = classify_and_extract("", &lines);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(840) }));
    }

    #[test]
    fn extra_lines_append_to_primary_text() {
        let lines = vec!["credited".to_string(), "amount 55".to_string()];
        let parsed = classify_and_extract("Wallet update", &lines);
        assert_eq!(parsed, Some(ParsedAmount { value: Some(55) }));
    }

    #[test]
    fn deterministic_for_identical_input() {
        let text = "You received Rs. 1,500 in your account";
        assert_eq!(
            classify_and_extract(text, &[]),
            classify_and_extract(text, &[])
        );
    }
}
