pub mod toml_config;

use crate::adapters::strava::{DEFAULT_API_BASE, DEFAULT_PAGE_SIZE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

/// The four greens tracked by default.
pub const DEFAULT_SEGMENTS: [&str; 4] = ["30545810", "30546062", "30546055", "7492562"];
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Strava caps `per_page` at 200.
pub const MAX_PAGE_SIZE: usize = 200;

/// Checks shared by every configuration source.
pub fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validation::validate_segment_ids("segments", config.segments())?;
    validation::validate_positive_number("concurrent_requests", config.concurrent_requests(), 1)?;
    validation::validate_range("page_size", config.page_size(), 1, MAX_PAGE_SIZE)?;
    validation::validate_range("timeout_seconds", config.timeout_seconds(), 1, 600)?;

    match config.effort_log() {
        Some(path) => validation::validate_path("effort_log", path),
        None => {
            validation::validate_url("api_base", config.api_base())?;
            let token = config.access_token().map(str::to_string);
            let token = validation::validate_required_field("access_token", &token)?;
            validation::validate_non_empty_string("access_token", token)
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "greens")]
#[command(about = "Find the next day your greens grid still needs an effort")]
pub struct CliConfig {
    /// TOML configuration file; replaces the source flags below when given
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SEGMENTS.map(String::from))]
    pub segments: Vec<String>,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "STRAVA_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Read efforts from a CSV log instead of the API
    #[arg(long)]
    pub effort_log: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    pub today: Option<chrono::NaiveDate>,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn segments(&self) -> &[String] {
        &self.segments
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn effort_log(&self) -> Option<&str> {
        self.effort_log.as_deref()
    }
}

#[cfg(feature = "cli")]
impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
