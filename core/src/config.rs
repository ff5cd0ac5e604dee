//! Client configuration and the process-wide default key.
//!
//! # Design
//! `ApiConfig` is the explicit path: the caller owns the key and base URL and
//! hands them to `Api::with_config`. The process-wide default key exists for
//! callers that set a key once at startup and construct clients elsewhere.
//! It sits behind an `RwLock`, which keeps access memory-safe, but ordering
//! between a concurrent `set_default_key` and client construction is up to
//! the caller.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Base URL of the public service.
pub const DEFAULT_BASE_URL: &str = "http://api.dienas.lv/";

static DEFAULT_KEY: RwLock<Option<String>> = RwLock::new(None);

/// Store `key` as the fallback for clients constructed without one.
///
/// Last write wins. Clients that already exist keep their key.
pub fn set_default_key(key: impl Into<String>) {
    *DEFAULT_KEY.write().unwrap_or_else(PoisonError::into_inner) = Some(key.into());
}

/// Remove the process-wide fallback key.
pub fn clear_default_key() {
    *DEFAULT_KEY.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Current process-wide fallback key, if one is set.
pub fn default_key() -> Option<String> {
    DEFAULT_KEY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Key and endpoint for an `Api` client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            base_url: default_base_url(),
        }
    }

    /// Resolve a config from an optional explicit key, falling back to the
    /// process-wide default.
    pub fn resolve(key: Option<&str>) -> ApiResult<Self> {
        match key.filter(|k| !k.is_empty()) {
            Some(key) => Ok(Self::new(key)),
            None => default_key()
                .filter(|k| !k.is_empty())
                .map(Self::new)
                .ok_or_else(|| ApiError::configuration("no API key available")),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.key.is_empty() {
            return Err(ApiError::configuration("API key cannot be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::configuration(
                "base_url must start with http:// or https://",
            ));
        }
        Ok(())
    }

    /// Base URL guaranteed to end with `/`, ready for a resource name.
    pub(crate) fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}
