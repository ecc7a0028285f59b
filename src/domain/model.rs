use crate::utils::error::{GreensError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for a next required date.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SegmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SegmentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Effort dates in non-decreasing calendar order, possibly spanning years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortedEffortSequence(Vec<NaiveDate>);

impl SortedEffortSequence {
    /// Wraps dates that the caller claims are already ascending.
    ///
    /// Duplicates are accepted; a date earlier than its predecessor is rejected.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self> {
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(GreensError::InvalidInput {
                message: format!(
                    "effort dates out of order: {} follows {}",
                    pair[1], pair[0]
                ),
            });
        }
        Ok(Self(dates))
    }

    /// Sorts and deduplicates dates gathered in any order.
    pub fn from_unsorted(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        Self(dates)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "date", rename_all = "snake_case")]
pub enum GridVerdict {
    /// Every (month, day) cell of a leap year has an effort.
    Complete,
    /// The next date that still needs an effort.
    NextRequiredDate(#[serde(with = "us_date")] NaiveDate),
}

impl GridVerdict {
    pub fn is_complete(&self) -> bool {
        matches!(self, GridVerdict::Complete)
    }

    pub fn next_required_date(&self) -> Option<NaiveDate> {
        match self {
            GridVerdict::Complete => None,
            GridVerdict::NextRequiredDate(date) => Some(*date),
        }
    }
}

impl fmt::Display for GridVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridVerdict::Complete => f.write_str("complete"),
            GridVerdict::NextRequiredDate(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// Result of one tracker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreensSummary {
    pub total_efforts: u64,
    pub covered_days: u16,
    pub verdict: GridVerdict,
}

mod us_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_sequence_rejects_out_of_order_dates() {
        let err = SortedEffortSequence::new(vec![d(2024, 3, 16), d(2024, 3, 15)]).unwrap_err();
        assert!(matches!(err, GreensError::InvalidInput { .. }));
        assert!(err.to_string().contains("2024-03-15"));
    }

    #[test]
    fn test_sequence_accepts_duplicates() {
        let seq = SortedEffortSequence::new(vec![d(2024, 3, 15), d(2024, 3, 15)]).unwrap();
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_from_unsorted_sorts_and_dedups_across_years() {
        let seq = SortedEffortSequence::from_unsorted(vec![
            d(2024, 1, 2),
            d(2023, 12, 31),
            d(2024, 1, 2),
        ]);
        assert_eq!(seq.dates(), &[d(2023, 12, 31), d(2024, 1, 2)]);
    }

    #[test]
    fn test_verdict_display_uses_us_format() {
        assert_eq!(GridVerdict::NextRequiredDate(d(2024, 3, 8)).to_string(), "03/08/2024");
        assert_eq!(GridVerdict::Complete.to_string(), "complete");
    }

    #[test]
    fn test_verdict_json_shape() {
        let json = serde_json::to_value(GridVerdict::NextRequiredDate(d(2024, 2, 29))).unwrap();
        assert_eq!(json, serde_json::json!({"status": "next_required_date", "date": "02/29/2024"}));

        let json = serde_json::to_value(GridVerdict::Complete).unwrap();
        assert_eq!(json, serde_json::json!({"status": "complete"}));
    }
}
