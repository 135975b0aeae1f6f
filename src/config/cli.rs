use crate::config::toml_config::Settings;
use crate::config::ScrapeConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "volby-scrape")]
#[command(about = "Download Czech election results of one region into a CSV file")]
pub struct CliConfig {
    /// Regional listing URL (must carry xkraj and xnumnuts)
    #[arg(value_name = "INDEX_URL")]
    pub index_url: String,

    /// Destination file
    #[arg(value_name = "OUTPUT")]
    pub output_path: String,

    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Detail page URL with {kraj}, {code} and {nuts} placeholders
    #[arg(long)]
    pub detail_url_template: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the settings file, then command line flags.
    pub fn resolve(&self) -> Result<ScrapeConfig> {
        let mut config = ScrapeConfig::new(&self.index_url, &self.output_path);

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from {}", path);
            config = config.with_settings(&Settings::from_file(path)?);
        }

        if let Some(template) = &self.detail_url_template {
            config = config.with_detail_url_template(template);
        }

        Ok(config)
    }
}
