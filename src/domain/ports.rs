use crate::domain::model::SegmentId;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of a user's efforts on segments.
///
/// Implementations fail the whole call on any authorization or transport
/// problem instead of returning a partial list.
#[async_trait]
pub trait EffortLookup: Send + Sync {
    /// Local calendar dates of every effort on the segment, in any order.
    async fn fetch_effort_dates(&self, segment: &SegmentId) -> Result<Vec<NaiveDate>>;

    /// Total number of efforts on the segment.
    async fn fetch_effort_count(&self, segment: &SegmentId) -> Result<u64>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn segments(&self) -> &[String];
    fn concurrent_requests(&self) -> usize;
    fn page_size(&self) -> usize;
    fn timeout_seconds(&self) -> u64;
    fn effort_log(&self) -> Option<&str>;
}
