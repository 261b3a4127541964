//! Access-token fetch and disk cache.
//!
//! Tokens live 7200s server-side. The cache refreshes 200s early so a
//! token handed out near expiry still survives a slow upload.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::types::TokenResponse;
use crate::config::Credentials;

const TOKEN_TTL_SECS: f64 = 7200.0;
const TTL_MARGIN_SECS: f64 = 200.0;

/// Persisted token with its write time (unix seconds).
#[derive(Debug, Serialize, Deserialize)]
struct CachedToken {
    time: f64,
    token: String,
}

/// Return the cached token when still valid, else fetch and persist.
///
/// A failure to persist is logged and ignored: the freshly fetched token
/// is still good for this process.
pub(crate) fn cached_or_fetch(
    http: &reqwest::blocking::Client,
    credentials: &Credentials,
    cache_path: &Path,
) -> Result<String> {
    if let Some(token) = read_cache(cache_path) {
        log::debug!("access token cache hit");
        return Ok(token);
    }

    let token = fetch(http, credentials)?;
    if let Err(err) = write_cache(cache_path, &token) {
        log::warn!(
            "failed to persist access token to {}: {err}",
            cache_path.display()
        );
    }
    Ok(token)
}

/// Read a still-valid token from the cache file.
///
/// Any problem (missing file, parse failure, expired or future-dated
/// entry) yields `None` and falls through to a fresh fetch.
fn read_cache(cache_path: &Path) -> Option<String> {
    let text = fs::read_to_string(cache_path).ok()?;
    let cached: CachedToken = toml::from_str(&text).ok()?;

    let age = unix_now() - cached.time;
    (age > 0.0 && age < TOKEN_TTL_SECS - TTL_MARGIN_SECS).then_some(cached.token)
}

fn write_cache(cache_path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Io(parent.to_path_buf(), e))?;
    }
    let cached = CachedToken {
        time: unix_now(),
        token: token.to_string(),
    };
    let text = toml::to_string(&cached)?;
    fs::write(cache_path, text).map_err(|e| Error::Io(cache_path.to_path_buf(), e))
}

/// Fetch a fresh token from the platform.
fn fetch(http: &reqwest::blocking::Client, credentials: &Credentials) -> Result<String> {
    let url = format!(
        "{}/token?grant_type=client_credential&appid={}&secret={}",
        super::API_BASE,
        credentials.app_id,
        credentials.app_secret
    );
    let response: TokenResponse = http.get(&url).send()?.json()?;

    match response.access_token {
        Some(token) => {
            log::debug!(
                "fetched access token {}****",
                token.get(..14).unwrap_or(token.as_str())
            );
            Ok(token)
        }
        None => Err(Error::api(response.status.errcode, response.status.errmsg)),
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
