use crate::core::analyzer;
use crate::core::collector::DateCollector;
use crate::core::grid::DayGrid;
use crate::core::EffortLookup;
use crate::domain::model::{GreensSummary, SegmentId};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Collects efforts for the configured segments and analyzes the day grid.
pub struct GreensTracker<L: EffortLookup + 'static> {
    collector: DateCollector<L>,
    segments: Vec<SegmentId>,
}

impl<L: EffortLookup + 'static> GreensTracker<L> {
    pub fn new(collector: DateCollector<L>, segments: Vec<SegmentId>) -> Self {
        Self { collector, segments }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<GreensSummary> {
        tracing::info!("Collecting efforts for {} segments", self.segments.len());
        let dates = self.collector.collect(&self.segments).await?;

        tracing::info!("Counting efforts...");
        let total_efforts = self.collector.total_efforts(&self.segments).await?;

        // Coverage spans the whole history; the analyzer's own grid stops at
        // the first gap.
        let mut coverage = DayGrid::new();
        for &date in dates.iter() {
            coverage.insert(date);
        }
        if tracing::enabled!(tracing::Level::DEBUG) {
            let missing: Vec<String> = coverage
                .missing()
                .take(10)
                .map(|(month, day)| format!("{:02}/{:02}", month, day))
                .collect();
            tracing::debug!(
                "Grid covers {} days, first missing: {}",
                coverage.covered(),
                missing.join(", ")
            );
        }

        tracing::info!("Analyzing day grid relative to {}", today);
        let verdict = analyzer::analyze(&dates, today)?;
        tracing::info!("Verdict: {}", verdict);

        Ok(GreensSummary {
            total_efforts,
            covered_days: coverage.covered(),
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GridVerdict, SortedEffortSequence};
    use async_trait::async_trait;

    struct FixedLookup(Vec<NaiveDate>);

    #[async_trait]
    impl EffortLookup for FixedLookup {
        async fn fetch_effort_dates(&self, _segment: &SegmentId) -> Result<Vec<NaiveDate>> {
            Ok(self.0.clone())
        }

        async fn fetch_effort_count(&self, _segment: &SegmentId) -> Result<u64> {
            Ok(self.0.len() as u64)
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_run_combines_segments() {
        let lookup = FixedLookup(vec![d(2024, 3, 15), d(2024, 3, 16), d(2024, 3, 17)]);
        let tracker = GreensTracker::new(
            DateCollector::new(lookup, 2),
            vec![SegmentId::from("1"), SegmentId::from("2")],
        );

        let summary = tracker.run(d(2024, 3, 15)).await.unwrap();

        // Both segments report the same three efforts.
        assert_eq!(summary.total_efforts, 6);
        assert_eq!(summary.covered_days, 3);
        assert_eq!(summary.verdict, GridVerdict::NextRequiredDate(d(2024, 3, 18)));
    }

    #[tokio::test]
    async fn test_covered_days_include_efforts_after_a_gap() {
        let dates = vec![d(2024, 3, 15), d(2024, 3, 20), d(2024, 3, 21)];
        let lookup = FixedLookup(dates.clone());
        let tracker = GreensTracker::new(DateCollector::new(lookup, 1), vec![SegmentId::from("1")]);

        let summary = tracker.run(d(2024, 3, 15)).await.unwrap();

        let scan = analyzer::scan(&SortedEffortSequence::new(dates).unwrap(), d(2024, 3, 15)).unwrap();
        assert_eq!(scan.grid.covered(), 2);
        assert_eq!(summary.covered_days, 3);
        assert_eq!(summary.verdict, GridVerdict::NextRequiredDate(d(2024, 3, 16)));
    }
}
