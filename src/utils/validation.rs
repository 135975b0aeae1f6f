use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                &format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            &format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

/// Every placeholder must appear at least once in `template`.
pub fn validate_placeholders(field_name: &str, template: &str, placeholders: &[&str]) -> Result<()> {
    let missing: Vec<&str> = placeholders
        .iter()
        .copied()
        .filter(|p| !template.contains(p))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(invalid(
            field_name,
            template,
            &format!("Missing placeholders: {}", missing.join(", ")),
        ))
    }
}

fn invalid(field_name: &str, value: &str, reason: &str) -> ScrapeError {
    ScrapeError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
