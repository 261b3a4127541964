//! WeChat API error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the WeChat CMS client
#[derive(Debug, Error)]
pub enum Error {
    /// The platform answered with an `errcode`/`errmsg` body.
    #[error("WeChat API error {errcode}: {errmsg}")]
    Api { errcode: i64, errmsg: String },

    #[error("HTTP transport error")]
    Http(#[from] reqwest::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Token cache parsing error")]
    TokenCacheRead(#[from] toml::de::Error),

    #[error("Token cache serialization error")]
    TokenCacheWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::Api`] from optional envelope fields.
    pub(crate) fn api(errcode: Option<i64>, errmsg: Option<String>) -> Self {
        Self::Api {
            errcode: errcode.unwrap_or(-1),
            errmsg: errmsg.unwrap_or_else(|| "unknown error".to_string()),
        }
    }
}
