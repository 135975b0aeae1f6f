use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index page layout mismatch: found {names} municipality names but {codes} codes")]
    StructureMismatch { names: usize, codes: usize },

    #[error("Index URL is missing the '{parameter}' parameter")]
    MissingUrlParameter { parameter: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ScrapeError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::Http(_) => "Check the URL and your network connection, then try again",
            ScrapeError::Csv(_) | ScrapeError::Io(_) => {
                "Make sure the output path is writable and its parent is not a file"
            }
            ScrapeError::StructureMismatch { .. } => {
                "The page does not look like a regional municipality listing; check the URL"
            }
            ScrapeError::MissingUrlParameter { .. } => {
                "Use a regional listing URL containing numeric xkraj and xnumnuts parameters"
            }
            ScrapeError::ConfigError { .. } | ScrapeError::InvalidConfigValue { .. } => {
                "Fix the command line arguments or the settings file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
