//! Text normalization helpers shared by the normalizer and the formatter.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of whitespace, collapsed to a single space.
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Separators between attendee email addresses.
static ATTENDEE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\n;]+").expect("Invalid attendee separator regex"));

/// Collapses internal whitespace runs to one space and trims the ends.
pub fn normalize_text(raw: &str) -> String {
    WHITESPACE_REGEX.replace_all(raw, " ").trim().to_string()
}

/// Derives an attendee count from a raw attendee field.
///
/// - blank: `0`
/// - all ASCII digits: that number (saturating)
/// - contains `@`: the number of non-empty pieces separated by `,` `;` or newlines
/// - anything else: `0`
pub fn parse_attendee_count(raw: &str) -> u64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().unwrap_or(u64::MAX);
    }

    if s.contains('@') {
        return ATTENDEE_SEPARATOR_REGEX
            .split(s)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .count() as u64;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_trims() {
        assert_eq!(normalize_text("  Team \t\n Sync  "), "Team Sync");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n "), "");
    }

    mod attendees {
        use super::*;

        #[test]
        fn blank_is_zero() {
            assert_eq!(parse_attendee_count(""), 0);
            assert_eq!(parse_attendee_count("   "), 0);
        }

        #[test]
        fn digits_are_a_count() {
            assert_eq!(parse_attendee_count("3"), 3);
            assert_eq!(parse_attendee_count(" 12 "), 12);
            assert_eq!(parse_attendee_count("007"), 7);
        }

        #[test]
        fn huge_count_saturates() {
            assert_eq!(parse_attendee_count("99999999999999999999999"), u64::MAX);
        }

        #[test]
        fn emails_are_counted() {
            assert_eq!(parse_attendee_count("a@x.com, b@y.com"), 2);
            assert_eq!(parse_attendee_count("a@x.com;b@y.com\nc@z.com"), 3);
            assert_eq!(parse_attendee_count("a@x.com,, ;\n"), 1);
        }

        #[test]
        fn other_text_is_zero() {
            assert_eq!(parse_attendee_count("three people"), 0);
            assert_eq!(parse_attendee_count("-2"), 0);
            assert_eq!(parse_attendee_count("3.5"), 0);
        }
    }
}
