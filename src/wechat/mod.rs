//! WeChat Official Account CMS client.
//!
//! Thin, sequential, blocking wrappers around the draft-box and material
//! endpoints. Every call is a single attempt: no retry, no backoff. The
//! access token is cached on disk and refreshed by a simple expiry check.
//!
//! # Modules
//!
//! - [`token`]: access-token fetch + disk cache
//! - [`material`]: permanent material upload and listing
//! - [`draft`]: draft-box management and publishing

mod draft;
mod error;
mod material;
mod token;
mod types;

use std::path::PathBuf;
use std::time::Duration;

pub use error::{Error, Result};
pub use types::{Article, DraftItem, MaterialItem, MaterialType, PermanentMaterial};

use crate::config::{Config, Credentials};

pub(crate) const API_BASE: &str = "https://api.weixin.qq.com/cgi-bin";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the WeChat CMS API.
///
/// Holds the credentials read once at construction; nothing re-reads the
/// environment per call.
pub struct WechatClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
    token_cache_path: PathBuf,
}

impl WechatClient {
    pub fn new(credentials: Credentials, token_cache_path: PathBuf) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            credentials,
            token_cache_path,
        })
    }

    /// Client with credentials from the environment and paths from `config`.
    pub fn from_env(config: &Config) -> Result<Self> {
        Self::new(Credentials::from_env()?, config.token_cache_path())
    }

    /// Current access token: disk cache first, fetch-and-persist fallback.
    pub fn access_token(&self) -> Result<String> {
        token::cached_or_fetch(&self.http, &self.credentials, &self.token_cache_path)
    }

    /// Endpoint URL with the access token attached.
    fn endpoint(&self, path: &str) -> Result<String> {
        Ok(format!(
            "{API_BASE}/{path}?access_token={}",
            self.access_token()?
        ))
    }
}
