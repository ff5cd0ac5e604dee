//! A single configured call against one resource.
//!
//! # Design
//! A `Request` is built by an `Api` resource method and holds everything a
//! fetch needs: resource, ordered parameters with the key injected first,
//! base URL and the shared transport. Every format method performs its own
//! fetch. Nothing is cached, so calling `as_json` and then `as_xml` makes two
//! round trips.
//!
//! Parameters whose value is `None` are dropped from the query string
//! entirely. They never appear as `name=`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::HttpTransport;
use crate::types::{Format, Resource};

/// Name of the query parameter carrying the API key.
pub const KEY_PARAM: &str = "key";

/// One call against a resource, ready to be fetched in any format.
#[derive(Clone)]
pub struct Request {
    resource: Resource,
    params: Vec<(&'static str, Option<String>)>,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("resource", &self.resource)
            .field("params", &self.params)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Request {
    pub(crate) fn new(
        resource: Resource,
        key: &str,
        params: Vec<(&'static str, Option<String>)>,
        base_url: String,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push((KEY_PARAM, Some(key.to_string())));
        all.extend(params);
        debug!(%resource, params = all.len(), "built request");
        Self {
            resource,
            params: all,
            base_url,
            transport,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// All parameters including the key, in the order they are encoded.
    pub fn params(&self) -> &[(&'static str, Option<String>)] {
        &self.params
    }

    /// Value of a parameter, or `None` when absent or null.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Form-encoded query with null parameters omitted.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            if let Some(value) = value {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }

    /// The exact URL a fetch in `format` would request.
    pub fn url(&self, format: Format) -> String {
        format!(
            "{}{}.{}?{}",
            self.base_url,
            self.resource,
            format.suffix(),
            self.query_string()
        )
    }

    /// Perform one GET for `format` and return the body unchanged.
    pub fn fetch(&self, format: Format) -> ApiResult<String> {
        let url = self.url(format);
        let request_id = Uuid::new_v4();
        debug!(%request_id, resource = %self.resource, %format, "fetching");

        match self.transport.get(&url) {
            Ok(body) if body.is_empty() => {
                warn!(%request_id, resource = %self.resource, "empty response body");
                Err(ApiError::Network {
                    url,
                    reason: "empty response body".to_string(),
                })
            }
            Ok(body) => {
                debug!(%request_id, bytes = body.len(), "fetched");
                Ok(body)
            }
            Err(e) => {
                warn!(%request_id, resource = %self.resource, error = %e, "fetch failed");
                Err(ApiError::Network {
                    url,
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn as_json(&self) -> ApiResult<String> {
        self.fetch(Format::Json)
    }

    pub fn as_xml(&self) -> ApiResult<String> {
        self.fetch(Format::Xml)
    }

    /// Fetch as JSON and decode into a generic value.
    pub fn as_parsed(&self) -> ApiResult<serde_json::Value> {
        let body = self.as_json()?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(resource = %self.resource, error = %e, "response is not valid JSON");
            ApiError::Parse(e)
        })
    }
}
