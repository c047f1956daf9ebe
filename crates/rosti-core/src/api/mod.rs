//! Remote catalog access
//!
//! The resolvers only ever need three read-only listings from the API.
//! [`CatalogSource`] is the seam between them and the HTTP transport, so
//! commands can be driven by [`RostiClient`] in production and by in-memory
//! catalogs in tests.

pub mod client;

pub use client::RostiClient;

use thiserror::Error;

use crate::types::{Company, Plan, Runtime};

/// Read-only access to the companies, plans and runtimes catalogs.
///
/// Every call returns a full, fresh snapshot.
pub trait CatalogSource {
    fn companies(&self) -> Result<Vec<Company>, ApiError>;
    fn plans(&self) -> Result<Vec<Plan>, ApiError>;
    fn runtimes(&self) -> Result<Vec<Runtime>, ApiError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn companies(&self) -> Result<Vec<Company>, ApiError> {
        (**self).companies()
    }

    fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        (**self).plans()
    }

    fn runtimes(&self) -> Result<Vec<Runtime>, ApiError> {
        (**self).runtimes()
    }
}

/// Errors raised while talking to the API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid base URL or endpoint path
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Connection or transport failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("API returned HTTP {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The blocking runtime or HTTP client could not be created
    #[error("failed to initialise HTTP client: {0}")]
    Init(String),
}
