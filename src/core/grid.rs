use chrono::{Datelike, NaiveDate};

/// Number of (month, day) cells in a leap year.
pub const GRID_DAYS: u16 = 366;

const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Year-agnostic day grid: one bit per (month, day), Feb 29 included.
///
/// Each month is a `u32` bit array where bit `day - 1` marks the day as covered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayGrid {
    months: [u32; 12],
    covered: u16,
}

impl DayGrid {
    pub const fn new() -> Self {
        Self {
            months: [0; 12],
            covered: 0,
        }
    }

    /// Marks the cell of `date`. Returns `true` if the cell was not covered yet.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        let (month, mask) = Self::cell(date);
        if self.months[month] & mask != 0 {
            return false;
        }
        self.months[month] |= mask;
        self.covered += 1;
        true
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (month, mask) = Self::cell(date);
        self.months[month] & mask != 0
    }

    pub fn covered(&self) -> u16 {
        self.covered
    }

    pub fn is_complete(&self) -> bool {
        self.covered == GRID_DAYS
    }

    /// Cells still missing, as (month, day) pairs in calendar order.
    pub fn missing(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        DAYS_IN_MONTH
            .iter()
            .enumerate()
            .flat_map(move |(idx, &days)| {
                (1..=days)
                    .filter(move |day| self.months[idx] & (1 << (day - 1)) == 0)
                    .map(move |day| (idx as u32 + 1, day))
            })
    }

    fn cell(date: NaiveDate) -> (usize, u32) {
        (date.month0() as usize, 1 << date.day0())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_same_month_day_in_different_years_is_one_cell() {
        let mut grid = DayGrid::new();
        assert!(grid.insert(d(2023, 7, 4)));
        assert!(!grid.insert(d(2024, 7, 4)));
        assert_eq!(grid.covered(), 1);
        assert!(grid.contains(d(2031, 7, 4)));
    }

    #[test]
    fn test_full_leap_year_completes_grid() {
        let mut grid = DayGrid::new();
        let mut date = d(2024, 1, 1);
        while date.year() == 2024 {
            grid.insert(date);
            date = date.succ_opt().unwrap();
        }
        assert!(grid.is_complete());
        assert_eq!(grid.missing().count(), 0);
    }

    #[test]
    fn test_common_year_leaves_feb_29_missing() {
        let mut grid = DayGrid::new();
        let mut date = d(2023, 1, 1);
        while date.year() == 2023 {
            grid.insert(date);
            date = date.succ_opt().unwrap();
        }
        assert_eq!(grid.covered(), 365);
        assert!(!grid.is_complete());
        assert_eq!(grid.missing().collect::<Vec<_>>(), vec![(2, 29)]);
    }
}
