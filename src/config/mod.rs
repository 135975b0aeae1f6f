#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::extract::DEFAULT_DETAIL_URL_TEMPLATE;
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_placeholders, validate_url, Validate};
use self::toml_config::Settings;

pub const TEMPLATE_PLACEHOLDERS: [&str; 3] = ["{kraj}", "{code}", "{nuts}"];

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    pub index_url: String,
    pub output_path: String,
    pub detail_url_template: String,
    pub output_format: OutputFormat,
}

impl ScrapeConfig {
    pub fn new(index_url: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
            output_path: output_path.into(),
            detail_url_template: DEFAULT_DETAIL_URL_TEMPLATE.to_string(),
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let Some(template) = &settings.source.detail_url_template {
            self.detail_url_template = template.clone();
        }
        if let Some(format) = settings.output.format {
            self.output_format = format;
        }
        self
    }

    pub fn with_detail_url_template(mut self, template: impl Into<String>) -> Self {
        self.detail_url_template = template.into();
        self
    }
}

impl ConfigProvider for ScrapeConfig {
    fn index_url(&self) -> &str {
        &self.index_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn detail_url_template(&self) -> &str {
        &self.detail_url_template
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        validate_url("index_url", &self.index_url)?;
        validate_path("output", &self.output_path)?;
        validate_placeholders(
            "detail_url_template",
            &self.detail_url_template,
            &TEMPLATE_PLACEHOLDERS,
        )
    }
}
