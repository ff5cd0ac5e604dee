//! HTTP transport seam.
//!
//! # Design
//! The client only ever needs "GET this URL, give me the body or fail", so the
//! transport is a one-method trait. `UreqTransport` is the production
//! implementation; any `Fn(&str) -> Result<String, TransportError>` closure
//! also implements the trait, which is how tests stub out the network.
//!
//! Status interpretation is left to the transport. ureq reports non-2xx
//! responses as errors by default and that default is kept.

use thiserror::Error;

/// A failed GET, reduced to a message.
///
/// The caller wraps this into `ApiError::Network` together with the URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Performs a single blocking HTTP GET.
pub trait HttpTransport: Send + Sync {
    /// Fetch `url` and return the response body as text.
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

impl<F> HttpTransport for F
where
    F: Fn(&str) -> Result<String, TransportError> + Send + Sync,
{
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self(url)
    }
}

/// Transport backed by a `ureq::Agent` with default configuration.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_agent(ureq::Agent::config_builder().build().new_agent())
    }

    /// Use a caller-configured agent (timeouts, proxies, TLS).
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| TransportError::new(e.to_string()))?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))
    }
}
