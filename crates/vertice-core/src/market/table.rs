//! Keyed time series storage.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{VerticeError, VerticeResult};
use crate::types::Date;

/// Date-indexed price histories keyed by series name (ticker or FX pair).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    series: HashMap<String, BTreeMap<Date, f64>>,
}

impl PriceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or overwrites) one observation.
    pub fn insert(&mut self, name: impl Into<String>, date: Date, value: f64) {
        self.series.entry(name.into()).or_default().insert(date, value);
    }

    /// Inserts a whole history for one series.
    pub fn extend(&mut self, name: impl Into<String>, points: impl IntoIterator<Item = (Date, f64)>) {
        self.series.entry(name.into()).or_default().extend(points);
    }

    /// Returns true if the series exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Series names in lexical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.series.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Full history of one series.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&BTreeMap<Date, f64>> {
        self.series.get(name)
    }

    /// Latest observation on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::MissingMarketData` if the series is unknown or
    /// has no observation on or before `date`.
    pub fn latest_on_or_before(&self, name: &str, date: Date) -> VerticeResult<f64> {
        self.series
            .get(name)
            .and_then(|s| s.range(..=date).next_back())
            .map(|(_, v)| *v)
            .ok_or_else(|| {
                VerticeError::missing_market_data(name, format!("no observation on or before {date}"))
            })
    }

    /// Chronological history up to and including `date`.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::MissingMarketData` if the series is unknown.
    pub fn history_until(&self, name: &str, date: Date) -> VerticeResult<Vec<(Date, f64)>> {
        let series = self
            .series
            .get(name)
            .ok_or_else(|| VerticeError::missing_market_data(name, "unknown series"))?;
        Ok(series.range(..=date).map(|(d, v)| (*d, *v)).collect())
    }
}

/// Rate curve snapshots: one row per date, one column per tenor key.
///
/// The DI curve is keyed by business days (`u32`); the treasury curve by
/// tenor label (`String`).
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTable<K: Ord> {
    rows: BTreeMap<Date, BTreeMap<K, f64>>,
}

impl<K: Ord> Default for CurveTable<K> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> CurveTable<K> {
    /// Creates an empty curve table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or overwrites) the rate of `tenor` on `date`.
    pub fn insert(&mut self, date: Date, tenor: K, rate: f64) {
        self.rows.entry(date).or_default().insert(tenor, rate);
    }

    /// Returns true when no observation has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All tenors observed on any date, in key order.
    #[must_use]
    pub fn tenors(&self) -> BTreeSet<K> {
        self.rows.values().flat_map(|row| row.keys().cloned()).collect()
    }

    /// The curve row of a single date.
    #[must_use]
    pub fn row(&self, date: Date) -> Option<&BTreeMap<K, f64>> {
        self.rows.get(&date)
    }

    /// Rows on or before `date`, chronological.
    pub fn rows_until(&self, date: Date) -> impl DoubleEndedIterator<Item = (&Date, &BTreeMap<K, f64>)> {
        self.rows.range(..=date)
    }

    /// History of a single tenor up to and including `date`.
    #[must_use]
    pub fn history(&self, tenor: &K, date: Date) -> Vec<(Date, f64)> {
        self.rows_until(date)
            .filter_map(|(d, row)| row.get(tenor).map(|r| (*d, *r)))
            .collect()
    }

    /// Latest observation of `tenor` on or before `date`.
    #[must_use]
    pub fn latest_on_or_before(&self, tenor: &K, date: Date) -> Option<f64> {
        self.rows_until(date)
            .rev()
            .find_map(|(_, row)| row.get(tenor).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2025, 5, day).unwrap()
    }

    #[test]
    fn test_latest_on_or_before() {
        let mut table = PriceTable::new();
        table.extend("PETR4", [(d(20), 31.0), (d(22), 32.0), (d(27), 33.0)]);

        assert_eq!(table.latest_on_or_before("PETR4", d(26)).unwrap(), 32.0);
        assert_eq!(table.latest_on_or_before("PETR4", d(22)).unwrap(), 32.0);
        assert!(table.latest_on_or_before("PETR4", d(19)).is_err());
        assert!(table.latest_on_or_before("VALE3", d(26)).is_err());
        assert_eq!(table.history_until("PETR4", d(26)).unwrap().len(), 2);
    }

    #[test]
    fn test_curve_history() {
        let mut curve: CurveTable<u32> = CurveTable::new();
        curve.insert(d(20), 21, 14.50);
        curve.insert(d(20), 252, 14.10);
        curve.insert(d(21), 252, 14.20);
        curve.insert(d(28), 252, 14.90);

        assert_eq!(curve.tenors().into_iter().collect::<Vec<_>>(), vec![21, 252]);
        assert_eq!(curve.history(&252, d(26)), vec![(d(20), 14.10), (d(21), 14.20)]);
        assert_eq!(curve.latest_on_or_before(&21, d(26)), Some(14.50));
        assert_eq!(curve.latest_on_or_before(&63, d(26)), None);
    }
}
