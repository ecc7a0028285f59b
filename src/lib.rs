pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{effort_log::CsvEffortLog, strava::StravaClient};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{
    analyzer::analyze, collector::DateCollector, grid::DayGrid, tracker::GreensTracker,
};
pub use crate::domain::model::{GreensSummary, GridVerdict, SegmentId, SortedEffortSequence};
pub use crate::utils::error::{GreensError, Result};
