pub mod etl;
pub mod export;
pub mod extract;
pub mod pipeline;

pub use crate::domain::model::{ExportOutcome, MunicipalityRecord, RunSummary, TurnoutCounts};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
