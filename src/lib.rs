pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{http::HttpFetcher, storage::LocalStorage};
pub use crate::config::ScrapeConfig;
pub use crate::core::{etl::EtlEngine, pipeline::ElectionPipeline};
pub use crate::domain::model::{ExportOutcome, MunicipalityRecord, OutputFormat, RunSummary};
pub use crate::utils::error::{Result, ScrapeError};
