pub mod analyzer;
pub mod collector;
pub mod grid;
pub mod tracker;

pub use crate::domain::model::{GreensSummary, GridVerdict, SegmentId, SortedEffortSequence};
pub use crate::domain::ports::{ConfigProvider, EffortLookup};
pub use crate::utils::error::Result;
