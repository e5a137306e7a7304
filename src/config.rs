//! Runtime configuration.
//!
//! The API token lives in a file rather than the environment so it can be
//! mounted as a container secret. It is read once at startup and handed to
//! [`SnipeClient`](crate::SnipeClient) by value.

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Result, SnipeError};

/// Default Snipe-IT web root, used for asset links.
pub const DEFAULT_BASE_URL: &str = "https://snipeit.app.eff.org/";

/// Default location of the API key file.
pub const DEFAULT_API_KEY_FILE: &str = "/secrets/api_key.txt";

/// Path of the REST API relative to the web root.
const API_PATH: &str = "api/v1/";

/// Connection settings for a Snipe-IT instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Web root, e.g. `https://snipeit.example.org/`.
    pub base_url: Url,
    /// REST API root, e.g. `https://snipeit.example.org/api/v1/`.
    pub api_url: Url,
    /// File holding the bearer token.
    pub api_key_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        // DEFAULT_BASE_URL is an absolute URL ending in '/'.
        Self::new(DEFAULT_BASE_URL, None, DEFAULT_API_KEY_FILE)
            .expect("DEFAULT_BASE_URL is a valid absolute URL")
    }
}

impl Config {
    /// Build a config from a web root, deriving the API root when not given.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL cannot be parsed.
    pub fn new(
        base_url: &str,
        api_url: Option<&str>,
        api_key_file: impl Into<PathBuf>,
    ) -> Result<Self> {
        let base_url = parse_dir_url(base_url)?;
        let api_url = match api_url {
            Some(api) => parse_dir_url(api)?,
            None => base_url.join(API_PATH)?,
        };

        Ok(Self {
            base_url,
            api_url,
            api_key_file: api_key_file.into(),
        })
    }

    /// Read the API token from [`Config::api_key_file`].
    ///
    /// # Errors
    ///
    /// Returns [`SnipeError::ConfigMissing`] if the file is absent or empty.
    pub fn load_api_key(&self) -> Result<String> {
        load_api_key(&self.api_key_file)
    }

    /// Web link for an asset in the Snipe-IT UI.
    pub fn asset_url(&self, id: &str) -> String {
        asset_url(&self.base_url, id)
    }
}

/// Read a bearer token from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`SnipeError::ConfigMissing`] if the file is absent or empty, and
/// [`SnipeError::Io`] for any other read failure.
pub fn load_api_key(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SnipeError::ConfigMissing(format!(
            "missing API key file {}",
            path.display()
        )));
    }

    let token = fs::read_to_string(path)?.trim().to_string();
    if token.is_empty() {
        return Err(SnipeError::ConfigMissing(format!(
            "API key file {} is empty",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), "loaded API key");
    Ok(token)
}

pub(crate) fn asset_url(base_url: &Url, id: &str) -> String {
    format!("{}hardware/{}", base_url, id)
}

/// Parse a URL that is used as a directory root, so `join` keeps its path.
fn parse_dir_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}
