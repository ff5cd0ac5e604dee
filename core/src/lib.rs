//! Synchronous client for the Dienas API.
//!
//! # Overview
//! The service offers read-only resources (name days, banks, countries,
//! currency rates). `Api` resolves an API key and builds a `Request` per
//! resource; a `Request` performs one HTTP GET per format call and returns
//! the body as JSON text, XML text or a decoded `serde_json::Value`.
//!
//! # Design
//! - `Api` is immutable after construction. The key comes from an explicit
//!   argument, an `ApiConfig`, or the process-wide default key.
//! - Resource methods are pure builders; I/O happens only in `Request`'s
//!   format methods.
//! - The network sits behind `HttpTransport`, implemented by
//!   `UreqTransport` and by plain closures, so tests run without a server.
//! - Failures map to distinct `ApiError` variants.
//!
//! ```no_run
//! use dienas_core::Api;
//!
//! let api = Api::new(Some("my-key"))?;
//! let names = api.namedays_for_date(12, 31).as_parsed()?;
//! println!("{names}");
//! # Ok::<(), dienas_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod types;

pub use client::Api;
pub use config::{clear_default_key, default_key, set_default_key, ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use http::{HttpTransport, TransportError, UreqTransport};
pub use request::Request;
pub use types::{Format, Resource};
