use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a single `wx` invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The `.env` file was missing or unreadable.
    #[error(".env file couldn't be loaded")]
    EnvFile(#[source] dotenvy::Error),

    #[error("Failed to read config file: {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file: {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "No API key configured.\n\
         Hint: set API_KEY in .env or in the environment."
    )]
    MissingApiKey,

    /// The request could not be built, sent, or its body read.
    ///
    /// The request URL is stripped, it contains the API key.
    #[error(transparent)]
    Network(reqwest::Error),

    /// Any status other than 200.
    #[error("Weather API not available (HTTP {status})")]
    Unavailable { status: StatusCode },

    #[error("Failed to parse forecast JSON")]
    Malformed(#[from] serde_json::Error),

    #[error("Forecast response contained no forecastday data")]
    NoForecastDays,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.without_url())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
