//! Record Types
//! Raw → parsed → normalized stages of a payout row.

use chrono::{Datelike, NaiveDate};

use super::parse::{extract_country, parse_currency, parse_date, year_month};

/// One source row after column-name normalization. Missing columns show
/// up as `None` in every row.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub date: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub payout: Option<String>,
}

/// One row with per-field parse results made explicit, before the
/// completeness filter runs.
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub date: Option<NaiveDate>,
    pub name: String,
    pub location: String,
    pub payout: String,
    pub payout_value: Option<f64>,
    pub country: String,
}

impl ParsedRecord {
    /// Parse every field of a raw row. Failures become `None`; nothing
    /// here aborts the load.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let date = raw.date.as_deref().and_then(parse_date);
        let payout = raw.payout.clone().unwrap_or_default();
        let payout_value = raw.payout.as_deref().and_then(parse_currency);
        let country = extract_country(raw.location.as_deref());

        Self {
            date,
            name: raw.name.clone().unwrap_or_default(),
            location: raw.location.clone().unwrap_or_default(),
            payout,
            payout_value,
            country,
        }
    }

    /// The completeness filter: rows without a date or an amount are
    /// excluded from the normalized table.
    pub fn into_normalized(self) -> Option<PayoutRecord> {
        let date = self.date?;
        let payout_value = self.payout_value?;
        Some(PayoutRecord {
            year_month: year_month(date),
            date,
            name: self.name,
            location: self.location,
            payout: self.payout,
            payout_value,
            country: self.country,
        })
    }
}

/// A fully normalized payout record. Date and amount are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutRecord {
    pub date: NaiveDate,
    pub name: String,
    pub location: String,
    /// Original textual amount as it appeared in the source.
    pub payout: String,
    pub payout_value: f64,
    pub country: String,
    /// `YYYY-MM` monthly aggregation key derived from `date`.
    pub year_month: String,
}

impl PayoutRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, payout: &str) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            name: Some("Alice".to_string()),
            location: Some("Springfield, USA".to_string()),
            payout: Some(payout.to_string()),
        }
    }

    #[test]
    fn test_full_row_normalizes() {
        let rec = ParsedRecord::from_raw(&raw("Jan 5, 2023", "$1,234.56"))
            .into_normalized()
            .unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(rec.payout, "$1,234.56");
        assert!((rec.payout_value - 1234.56).abs() < 1e-9);
        assert_eq!(rec.country, "USA");
        assert_eq!(rec.year_month, "2023-01");
        assert_eq!(rec.year(), 2023);
    }

    #[test]
    fn test_bad_date_is_dropped() {
        let parsed = ParsedRecord::from_raw(&raw("someday", "$10"));
        assert!(parsed.date.is_none());
        assert!(parsed.into_normalized().is_none());
    }

    #[test]
    fn test_bad_amount_is_dropped() {
        let parsed = ParsedRecord::from_raw(&raw("2023-01-05", "N/A"));
        assert!(parsed.payout_value.is_none());
        assert!(parsed.into_normalized().is_none());
    }

    #[test]
    fn test_missing_columns_default_empty() {
        let parsed = ParsedRecord::from_raw(&RawRecord::default());
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.country, "Unknown");
        assert!(parsed.into_normalized().is_none());
    }
}
