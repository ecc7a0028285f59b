use crate::adapters::parse_effort_date;
use crate::domain::model::SegmentId;
use crate::domain::ports::EffortLookup;
use crate::utils::error::{GreensError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_PAGE_SIZE: usize = 200;

#[derive(Debug, Deserialize)]
struct SegmentEffort {
    start_date_local: String,
}

#[derive(Debug, Deserialize)]
struct DetailedSegment {
    athlete_segment_stats: Option<AthleteSegmentStats>,
}

#[derive(Debug, Deserialize)]
struct AthleteSegmentStats {
    #[serde(default)]
    effort_count: u64,
}

/// Strava v3 REST client authenticated with an already issued access token.
#[derive(Debug, Clone)]
pub struct StravaClient {
    client: Client,
    api_base: String,
    access_token: String,
    page_size: usize,
}

impl StravaClient {
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    async fn check_status(segment: &SegmentId, response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("Segment {}: API response status {}", segment, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GreensError::AuthorizationError {
                    segment: segment.to_string(),
                    message: format!("{}: {}", status, body),
                })
            }
            _ => Err(GreensError::LookupError {
                segment: segment.to_string(),
                message: format!("{}: {}", status, body),
            }),
        }
    }

    async fn fetch_effort_page(&self, segment: &SegmentId, page: usize) -> Result<Vec<SegmentEffort>> {
        let endpoint = format!("{}/segment_efforts", self.api_base);
        tracing::debug!("Segment {}: requesting page {} from {}", segment, page, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(&self.access_token)
            .query(&[
                ("segment_id", segment.to_string()),
                ("per_page", self.page_size.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let response = Self::check_status(segment, response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl EffortLookup for StravaClient {
    async fn fetch_effort_dates(&self, segment: &SegmentId) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        let mut page = 1;

        loop {
            let efforts = self.fetch_effort_page(segment, page).await?;
            let received = efforts.len();

            for effort in efforts {
                dates.push(parse_effort_date(&effort.start_date_local)?);
            }

            if received < self.page_size {
                break;
            }
            page += 1;
        }

        tracing::debug!("Segment {}: {} efforts over {} pages", segment, dates.len(), page);
        Ok(dates)
    }

    async fn fetch_effort_count(&self, segment: &SegmentId) -> Result<u64> {
        let endpoint = format!("{}/segments/{}", self.api_base, segment);
        tracing::debug!("Segment {}: requesting stats from {}", segment, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let detail: DetailedSegment = Self::check_status(segment, response).await?.json().await?;
        Ok(detail
            .athlete_segment_stats
            .map(|stats| stats.effort_count)
            .unwrap_or(0))
    }
}
