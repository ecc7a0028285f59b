use chrono::{Datelike, Days, NaiveDate};
use greens_grid::{analyze, GreensError, GridVerdict, SortedEffortSequence};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn next(dates: Vec<NaiveDate>, today: NaiveDate) -> String {
    let sequence = SortedEffortSequence::new(dates).unwrap();
    analyze(&sequence, today).unwrap().to_string()
}

#[test]
fn test_streak_continues_after_three_days() {
    let today = d(2024, 3, 15);
    assert_eq!(
        next(vec![d(2024, 3, 15), d(2024, 3, 16), d(2024, 3, 17)], today),
        "03/18/2024"
    );
}

#[test]
fn test_gap_after_today() {
    let today = d(2024, 3, 15);
    assert_eq!(next(vec![d(2024, 3, 15), d(2024, 3, 18)], today), "03/16/2024");
}

#[test]
fn test_no_efforts_on_new_year() {
    assert_eq!(next(vec![], d(2024, 1, 1)), "01/01/2024");
}

#[test]
fn test_relative_to_today() {
    let today = d(2025, 8, 30);
    assert_eq!(next(vec![today], today), (today + Days::new(1)).format("%m/%d/%Y").to_string());
    assert_eq!(
        next(vec![today, today + Days::new(1)], today),
        (today + Days::new(2)).format("%m/%d/%Y").to_string()
    );
    assert_eq!(
        next(vec![today, today + Days::new(3)], today),
        (today + Days::new(1)).format("%m/%d/%Y").to_string()
    );
}

#[test]
fn test_multi_year_history_completes_grid() {
    // Two years of daily efforts, 2023 then 2024, must complete on 2024-02-29.
    let mut dates = Vec::new();
    let mut date = d(2023, 1, 1);
    while date.year() < 2025 {
        dates.push(date);
        date = date.succ_opt().unwrap();
    }

    let sequence = SortedEffortSequence::new(dates).unwrap();
    assert_eq!(analyze(&sequence, d(2024, 10, 1)).unwrap(), GridVerdict::Complete);
}

#[test]
fn test_unsorted_input_is_rejected() {
    let err = SortedEffortSequence::new(vec![d(2024, 3, 17), d(2024, 3, 15)]).unwrap_err();
    assert!(matches!(err, GreensError::InvalidInput { .. }));

    // The collector path sorts instead.
    let sequence = SortedEffortSequence::from_unsorted(vec![d(2024, 3, 16), d(2024, 3, 15)]);
    assert_eq!(analyze(&sequence, d(2024, 3, 15)).unwrap().to_string(), "03/17/2024");
}
