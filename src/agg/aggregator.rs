//! Payout Aggregator
//! Year filtering, grouped sums and summary metrics over the normalized
//! table. Views only; the table itself is never mutated.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::data::PayoutRecord;

/// Number of countries shown in the bar chart. Tables and totals always
/// cover the full aggregation.
pub const TOP_COUNTRIES: usize = 25;

/// Headline metrics over the filtered table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub total_payout: f64,
    pub total_records: usize,
}

/// Stateless helpers that derive filtered and grouped views.
pub struct Aggregator;

impl Aggregator {
    /// All distinct years present in the table, ascending.
    pub fn years_present(records: &[PayoutRecord]) -> Vec<i32> {
        let years: HashSet<i32> = records.iter().map(|r| r.year()).collect();
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years
    }

    /// Records whose year is in `years`. An empty selection applies no
    /// filter at all (every year retained).
    pub fn filter_by_years<'a>(
        records: &'a [PayoutRecord],
        years: &HashSet<i32>,
    ) -> Vec<&'a PayoutRecord> {
        records
            .iter()
            .filter(|r| years.is_empty() || years.contains(&r.year()))
            .collect()
    }

    /// Payout sums grouped by country, sorted descending by sum. The
    /// sort is stable, so ties keep first-seen grouping order.
    pub fn sum_by_country(records: &[&PayoutRecord]) -> Vec<(String, f64)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut sums: Vec<(String, f64)> = Vec::new();

        for record in records {
            match index.get(record.country.as_str()) {
                Some(&i) => sums[i].1 += record.payout_value,
                None => {
                    index.insert(record.country.as_str(), sums.len());
                    sums.push((record.country.clone(), record.payout_value));
                }
            }
        }

        sums.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        sums
    }

    /// Payout sums grouped by `YYYY-MM` key, ascending. Lexicographic
    /// key order is chronological because the key is zero-padded.
    pub fn sum_by_month(records: &[&PayoutRecord]) -> Vec<(String, f64)> {
        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for record in records {
            *sums.entry(record.year_month.clone()).or_insert(0.0) += record.payout_value;
        }
        sums.into_iter().collect()
    }

    /// Total payout and record count over the filtered set.
    pub fn summary(records: &[&PayoutRecord]) -> Summary {
        Summary {
            total_payout: records.iter().map(|r| r.payout_value).sum(),
            total_records: records.len(),
        }
    }

    /// The filtered table sorted descending by date, for the raw view.
    pub fn sorted_by_date_desc<'a>(records: &[&'a PayoutRecord]) -> Vec<&'a PayoutRecord> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, name: &str, country: &str, value: f64) -> PayoutRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        PayoutRecord {
            year_month: date.format("%Y-%m").to_string(),
            date,
            name: name.to_string(),
            location: country.to_string(),
            payout: format!("${}", value),
            payout_value: value,
            country: country.to_string(),
        }
    }

    fn fixture() -> Vec<PayoutRecord> {
        vec![
            record("2023-01-01", "Alice", "USA", 100.0),
            record("2023-02-02", "Bob", "UK", 200.0),
        ]
    }

    // ── filter_by_years ───────────────────────────────────────────────────────

    #[test]
    fn test_empty_year_selection_keeps_everything() {
        let records = fixture();
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_year_filter_applies() {
        let mut records = fixture();
        records.push(record("2024-03-03", "Carol", "France", 50.0));

        let filtered = Aggregator::filter_by_years(&records, &HashSet::from([2024]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Carol");
    }

    #[test]
    fn test_years_present_sorted_unique() {
        let mut records = fixture();
        records.push(record("2021-06-01", "Dave", "USA", 10.0));
        records.push(record("2023-07-01", "Erin", "USA", 10.0));
        assert_eq!(Aggregator::years_present(&records), vec![2021, 2023]);
    }

    // ── sum_by_country ────────────────────────────────────────────────────────

    #[test]
    fn test_country_sums_sorted_descending() {
        let records = fixture();
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        let agg = Aggregator::sum_by_country(&filtered);
        assert_eq!(
            agg,
            vec![("UK".to_string(), 200.0), ("USA".to_string(), 100.0)]
        );
    }

    #[test]
    fn test_country_ties_keep_first_seen_order() {
        let records = vec![
            record("2023-01-01", "a", "Mars", 50.0),
            record("2023-01-02", "b", "Venus", 50.0),
            record("2023-01-03", "c", "Pluto", 99.0),
        ];
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        let agg = Aggregator::sum_by_country(&filtered);
        let names: Vec<&str> = agg.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Pluto", "Mars", "Venus"]);
    }

    #[test]
    fn test_country_groups_accumulate() {
        let records = vec![
            record("2023-01-01", "a", "USA", 10.0),
            record("2023-05-01", "b", "USA", 15.0),
        ];
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        let agg = Aggregator::sum_by_country(&filtered);
        assert_eq!(agg, vec![("USA".to_string(), 25.0)]);
    }

    // ── sum_by_month ──────────────────────────────────────────────────────────

    #[test]
    fn test_month_sums_ascending() {
        let records = fixture();
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        let agg = Aggregator::sum_by_month(&filtered);
        assert_eq!(
            agg,
            vec![
                ("2023-01".to_string(), 100.0),
                ("2023-02".to_string(), 200.0)
            ]
        );
    }

    // ── summary ───────────────────────────────────────────────────────────────

    #[test]
    fn test_summary_totals() {
        let records = fixture();
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        let summary = Aggregator::summary(&filtered);
        assert!((summary.total_payout - 300.0).abs() < 1e-9);
        assert_eq!(summary.total_records, 2);
    }

    #[test]
    fn test_country_sums_match_total() {
        let mut records = fixture();
        records.push(record("2024-03-03", "Carol", "France", -25.5));
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());

        let by_country: f64 = Aggregator::sum_by_country(&filtered)
            .iter()
            .map(|(_, v)| v)
            .sum();
        let summary = Aggregator::summary(&filtered);
        assert!((by_country - summary.total_payout).abs() < 1e-9);
    }

    #[test]
    fn test_empty_table_is_valid() {
        let filtered = Aggregator::filter_by_years(&[], &HashSet::new());
        assert!(Aggregator::sum_by_country(&filtered).is_empty());
        assert!(Aggregator::sum_by_month(&filtered).is_empty());
        assert_eq!(Aggregator::summary(&filtered), Summary::default());
        assert!(Aggregator::years_present(&[]).is_empty());
    }

    // ── sorted_by_date_desc ───────────────────────────────────────────────────

    #[test]
    fn test_raw_view_sorted_newest_first() {
        let records = vec![
            record("2023-01-01", "old", "USA", 1.0),
            record("2023-06-01", "new", "USA", 2.0),
            record("2023-03-01", "mid", "USA", 3.0),
        ];
        let filtered = Aggregator::filter_by_years(&records, &HashSet::new());
        let sorted = Aggregator::sorted_by_date_desc(&filtered);
        let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }
}
