use crate::domain::model::{SegmentId, SortedEffortSequence};
use crate::domain::ports::EffortLookup;
use crate::utils::error::{GreensError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Gathers effort dates for several segments into one sorted, deduplicated sequence.
pub struct DateCollector<L: EffortLookup + 'static> {
    lookup: Arc<L>,
    concurrent_requests: usize,
}

impl<L: EffortLookup + 'static> DateCollector<L> {
    pub fn new(lookup: L, concurrent_requests: usize) -> Self {
        Self::from_shared(Arc::new(lookup), concurrent_requests)
    }

    pub fn from_shared(lookup: Arc<L>, concurrent_requests: usize) -> Self {
        Self {
            lookup,
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    /// Fails as a whole if any segment lookup fails.
    pub async fn collect(&self, segments: &[SegmentId]) -> Result<SortedEffortSequence> {
        ensure_segments(segments)?;

        let per_segment = self
            .run_per_segment(segments, |lookup, segment| async move {
                lookup.fetch_effort_dates(&segment).await
            })
            .await?;

        let mut dates = Vec::new();
        for (segment, segment_dates) in per_segment {
            tracing::debug!("Segment {}: {} efforts", segment, segment_dates.len());
            dates.extend(segment_dates);
        }

        let sequence = SortedEffortSequence::from_unsorted(dates);
        tracing::info!(
            "Collected {} distinct effort days across {} segments",
            sequence.len(),
            segments.len()
        );
        Ok(sequence)
    }

    /// Sum of the effort counts reported for each segment.
    pub async fn total_efforts(&self, segments: &[SegmentId]) -> Result<u64> {
        ensure_segments(segments)?;

        let per_segment = self
            .run_per_segment(segments, |lookup, segment| async move {
                lookup.fetch_effort_count(&segment).await
            })
            .await?;

        Ok(per_segment.into_iter().map(|(_, count)| count).sum())
    }

    async fn run_per_segment<T, F, Fut>(
        &self,
        segments: &[SegmentId],
        call: F,
    ) -> Result<Vec<(SegmentId, T)>>
    where
        T: Send + 'static,
        F: Fn(Arc<L>, SegmentId) -> Fut,
        Fut: std::future::Future<Output = Result<T>> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.concurrent_requests));
        let mut join_set = JoinSet::new();

        for segment in segments {
            let permits = permits.clone();
            let task = call(self.lookup.clone(), segment.clone());
            let segment = segment.clone();

            join_set.spawn(async move {
                let _permit = permits.acquire_owned().await.map_err(|e| {
                    GreensError::LookupError {
                        segment: segment.to_string(),
                        message: format!("lookup pool closed: {}", e),
                    }
                })?;
                task.await.map(|value| (segment, value))
            });
        }

        let mut results = Vec::with_capacity(segments.len());
        while let Some(joined) = join_set.join_next().await {
            let outcome = joined.map_err(|e| GreensError::LookupError {
                segment: "unknown".to_string(),
                message: format!("lookup task failed: {}", e),
            })?;

            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!("Effort lookup failed, discarding partial results: {}", e);
                    join_set.abort_all();
                    return Err(e);
                }
            }
        }

        Ok(results)
    }
}

fn ensure_segments(segments: &[SegmentId]) -> Result<()> {
    if segments.is_empty() {
        return Err(GreensError::InvalidConfigValueError {
            field: "segments".to_string(),
            value: String::new(),
            reason: "At least one segment id is required".to_string(),
        });
    }
    Ok(())
}
