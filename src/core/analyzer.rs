//! Day-grid streak analysis.
//!
//! Dates are classified against `today` by month and day only, so an effort
//! from an earlier year on a later month/day still extends the forward chain.
//! Gap arithmetic uses the full date.

use crate::core::grid::DayGrid;
use crate::domain::model::{GridVerdict, SortedEffortSequence};
use crate::utils::error::{GreensError, Result};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// State of a single pass over the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridScan {
    pub verdict: GridVerdict,
    /// A scanned date fell before today's month/day.
    pub efforts_before_today: bool,
    /// A scanned date matched today's month/day.
    pub efforts_today: bool,
    /// End of the chain of efforts starting at today or later.
    pub last_onward: Option<NaiveDate>,
    /// Day after the chain end, set when a gap stopped the scan.
    pub next_grid_day: Option<NaiveDate>,
    /// Dates visited before the scan ended.
    pub scanned: usize,
    pub grid: DayGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayClass {
    Past,
    Today,
    Onward,
}

fn classify(date: NaiveDate, today: NaiveDate) -> DayClass {
    match date.month().cmp(&today.month()) {
        Ordering::Less => DayClass::Past,
        Ordering::Greater => DayClass::Onward,
        Ordering::Equal => match date.day().cmp(&today.day()) {
            Ordering::Less => DayClass::Past,
            Ordering::Equal => DayClass::Today,
            Ordering::Greater => DayClass::Onward,
        },
    }
}

fn day_after(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt().ok_or_else(|| GreensError::InvalidInput {
        message: format!("no calendar day after {}", date),
    })
}

/// Next date that still needs an effort, or `Complete` once all 366 cells are covered.
pub fn analyze(dates: &SortedEffortSequence, today: NaiveDate) -> Result<GridVerdict> {
    scan(dates, today).map(|scan| scan.verdict)
}

/// Runs the analysis and keeps the intermediate state for diagnostics.
pub fn scan(dates: &SortedEffortSequence, today: NaiveDate) -> Result<GridScan> {
    let mut grid = DayGrid::new();
    let mut efforts_before_today = false;
    let mut efforts_today = false;
    let mut last_onward: Option<NaiveDate> = None;
    let mut next_grid_day: Option<NaiveDate> = None;
    let mut scanned = 0;

    for &date in dates.iter() {
        scanned += 1;
        grid.insert(date);

        match classify(date, today) {
            DayClass::Past => efforts_before_today = true,
            DayClass::Today => {
                efforts_today = true;
                last_onward = Some(date);
            }
            DayClass::Onward => match last_onward {
                Some(last) if (date - last).num_days() > 1 => {
                    next_grid_day = Some(day_after(last)?);
                }
                _ => last_onward = Some(date),
            },
        }

        if grid.is_complete() {
            tracing::debug!(scanned, "day grid complete");
            return Ok(GridScan {
                verdict: GridVerdict::Complete,
                efforts_before_today,
                efforts_today,
                last_onward,
                next_grid_day,
                scanned,
                grid,
            });
        }

        if next_grid_day.is_some() {
            break;
        }
    }

    // A gap only yields the day after the chain when today itself has an
    // effort; otherwise today is still the open day. An unbroken chain always
    // yields the day after its end. The before-today flag never matters.
    let next = match (next_grid_day, last_onward) {
        (Some(next), _) if efforts_today => next,
        (Some(_), _) => today,
        (None, Some(last)) => day_after(last)?,
        (None, None) => today,
    };

    tracing::debug!(
        scanned,
        efforts_before_today,
        efforts_today,
        ?last_onward,
        ?next_grid_day,
        next = %next,
        "day grid scan finished"
    );

    Ok(GridScan {
        verdict: GridVerdict::NextRequiredDate(next),
        efforts_before_today,
        efforts_today,
        last_onward,
        next_grid_day,
        scanned,
        grid,
    })
}
