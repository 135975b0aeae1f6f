use crate::domain::model::OutputFormat;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Optional settings file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub detail_url_template: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: Option<OutputFormat>,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| ScrapeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_settings() {
        let toml_content = r#"
[source]
detail_url_template = "https://www.volby.cz/pls/ps2021/ps311?xjazyk=CZ&xkraj={kraj}&xobec={code}&xvyber={nuts}"

[output]
format = "tsv"
"#;

        let settings = Settings::from_toml_str(toml_content).unwrap();

        assert_eq!(
            settings.source.detail_url_template.as_deref(),
            Some("https://www.volby.cz/pls/ps2021/ps311?xjazyk=CZ&xkraj={kraj}&xobec={code}&xvyber={nuts}")
        );
        assert_eq!(settings.output.format, Some(OutputFormat::Tsv));
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Settings::from_toml_str("[output]\nformat = \"xlsx\"\n");
        assert!(matches!(result, Err(ScrapeError::ConfigError { .. })));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VOLBY_SCRAPE_TEST_HOST", "http://localhost:9000");

        let toml_content = r#"
[source]
detail_url_template = "${VOLBY_SCRAPE_TEST_HOST}/ps311?xkraj={kraj}&xobec={code}&xvyber={nuts}"
"#;
        let settings = Settings::from_toml_str(toml_content).unwrap();
        assert_eq!(
            settings.source.detail_url_template.as_deref(),
            Some("http://localhost:9000/ps311?xkraj={kraj}&xobec={code}&xvyber={nuts}")
        );

        std::env::remove_var("VOLBY_SCRAPE_TEST_HOST");
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[output]\nformat = \"csv\"\n").unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.output.format, Some(OutputFormat::Csv));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Settings::from_file("/nonexistent/volby-scrape.toml");
        assert!(matches!(result, Err(ScrapeError::Io(_))));
    }
}
