//! HTTP client for the cost and metrics API
//!
//! Every request is a single attempt: no retries, and no timeout unless
//! `api.timeout_seconds` is configured.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{CostReport, MetricsReport, WelcomeMessage};

pub const COSTS_PATH: &str = "/costs/compiled";
pub const METRICS_PATH: &str = "/metrics/compiled-metrics";

/// Parameters of one cost calculation, taken verbatim from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    pub users: String,
    pub instance_capacity: String,
}

/// Parameters of one metrics lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsQuery {
    pub instance_id: String,
}

/// Client for the dashboard backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    region: Option<String>,
}

impl ApiClient {
    /// Create a client from the `[api]` configuration section
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.normalized_base_url().to_string(),
            region: config.region.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /costs/compiled?users=..&instance_capacity=..`
    ///
    /// The request has no body. `region` is only sent when configured.
    pub async fn compute_costs(&self, query: &CostQuery) -> Result<CostReport, ApiError> {
        let mut params = vec![
            ("users", query.users.as_str()),
            ("instance_capacity", query.instance_capacity.as_str()),
        ];
        if let Some(region) = &self.region {
            params.push(("region", region.as_str()));
        }

        let request = self
            .client
            .request(Method::POST, self.url(COSTS_PATH))
            .query(&params);
        self.send_json(COSTS_PATH, request).await
    }

    /// `GET /metrics/compiled-metrics?instance_id=..`
    pub async fn fetch_metrics(&self, query: &MetricsQuery) -> Result<MetricsReport, ApiError> {
        self.get_json(METRICS_PATH, &[("instance_id", query.instance_id.as_str())])
            .await
    }

    /// `GET /`, the backend's welcome message
    pub async fn ping(&self) -> Result<WelcomeMessage, ApiError> {
        self.get_json("/", &[]).await
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path)).query(params);
        self.send_json(path, request).await
    }

    /// Send a prepared request and decode the JSON body
    ///
    /// # Errors
    /// - the request cannot be sent or the body cannot be read
    /// - the response status is not 2xx
    /// - the body is not valid JSON for `T`
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(endpoint = endpoint, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = endpoint, error = %e, "Request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(endpoint = endpoint, status = %status, "Backend returned an error status");
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let decoded = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(endpoint = endpoint, error = %e, "Failed to decode response body");
            ApiError::from(e)
        })?;

        debug!(endpoint = endpoint, status = %status, bytes = bytes.len(), "Response decoded");
        Ok(decoded)
    }
}
