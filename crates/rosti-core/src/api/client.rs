//! HTTP client for the Rosti administration API.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ApiError, CatalogSource};
use crate::types::{Company, Plan, Runtime};

/// Error payload the API sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Blocking catalog client.
///
/// Requests go through async `reqwest` on a private tokio runtime, so each
/// call blocks until the response is decoded.
#[derive(Debug)]
pub struct RostiClient {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl RostiClient {
    /// Create a client for the given API root, e.g. `https://admin.rosti.cz/api/v1/`.
    pub fn new(mut base_url: Url, token: Option<String>) -> Result<Self, ApiError> {
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("rosti/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Init(e.to_string()))?;
        let runtime = tokio::runtime::Runtime::new().map_err(|e| ApiError::Init(e.to_string()))?;

        Ok(Self {
            base_url,
            token,
            http,
            runtime,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint below the API root
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "fetching catalog");
        self.runtime.block_on(self.fetch(url))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let mut request = self.http.get(url.clone());
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Token {}", token));
        }

        let response = request.send().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl CatalogSource for RostiClient {
    fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get_json("companies/")
    }

    fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.get_json("plans/")
    }

    fn runtimes(&self) -> Result<Vec<Runtime>, ApiError> {
        self.get_json("runtimes/")
    }
}
