//! HTTP client for the services directory REST API.
//!
//! Wraps `reqwest` with typed errors, retry on transient failures, and typed
//! response deserialization. The client only moves data; filtering happens in
//! `newcomer-catalog`.

use std::time::Duration;

use newcomer_catalog::OptionsRequest;
use newcomer_core::{AppConfig, Location, SaveAction, SavedLocation, Service};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::types::{LocationsResponse, SaveRequest, ServicesResponse};

/// Client for the services directory API.
///
/// Use [`DirectoryClient::from_config`] in the application or
/// [`DirectoryClient::with_base_url`] to point at a mock server in tests.
pub struct DirectoryClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl DirectoryClient {
    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if the configured URL is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Builds a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse or
    /// cannot carry path segments.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            retry: RetryPolicy {
                max_retries,
                backoff_base_ms,
            },
        })
    }

    /// `GET /services`
    ///
    /// Entries that do not decode are logged and skipped; the rest are kept.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure after retries.
    /// - [`ClientError::UnexpectedStatus`] / [`ClientError::NotFound`] on non-2xx.
    /// - [`ClientError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_services(&self) -> Result<Vec<Service>, ClientError> {
        let url = self.endpoint(&["services"], &[])?;
        let envelope: ServicesResponse = self.get_json(&url).await?;
        let services = decode_entries(envelope.services, "service");
        tracing::debug!(count = services.len(), "fetched services");
        Ok(services)
    }

    /// `GET /locations`
    ///
    /// Entries that do not decode are logged and skipped; the rest are kept.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryClient::fetch_services`].
    pub async fn fetch_locations(&self) -> Result<Vec<Location>, ClientError> {
        let url = self.endpoint(&["locations"], &[])?;
        let envelope: LocationsResponse = self.get_json(&url).await?;
        let locations = decode_entries(envelope.locations, "location");
        tracing::debug!(count = locations.len(), "fetched locations");
        Ok(locations)
    }

    /// `GET /locations/provinces?serviceId=`
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryClient::fetch_services`].
    pub async fn fetch_provinces(&self, service_id: &str) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["locations", "provinces"], &[("serviceId", service_id)])?;
        self.get_json(&url).await
    }

    /// `GET /locations/cities?serviceId=&province=`
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryClient::fetch_services`].
    pub async fn fetch_cities(
        &self,
        service_id: &str,
        province: &str,
    ) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(
            &["locations", "cities"],
            &[("serviceId", service_id), ("province", province)],
        )?;
        self.get_json(&url).await
    }

    /// Runs whichever option fetch `request` describes.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryClient::fetch_services`].
    pub async fn fetch_options(&self, request: &OptionsRequest) -> Result<Vec<String>, ClientError> {
        match request {
            OptionsRequest::Provinces { service_id, .. } => self.fetch_provinces(service_id).await,
            OptionsRequest::Cities {
                service_id,
                province,
                ..
            } => self.fetch_cities(service_id, province).await,
        }
    }

    /// `GET /locations/:id`, a single location with its service embedded.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] for an unknown id, otherwise the same as
    /// [`DirectoryClient::fetch_services`].
    pub async fn fetch_location(&self, id: &str) -> Result<Location, ClientError> {
        let url = self.endpoint(&["locations", id], &[])?;
        self.get_json(&url).await
    }

    /// `GET /locations/save`, the signed-in user's saved locations.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryClient::fetch_services`].
    pub async fn fetch_saved_locations(&self) -> Result<Vec<SavedLocation>, ClientError> {
        let url = self.endpoint(&["locations", "save"], &[])?;
        self.get_json(&url).await
    }

    /// `POST` or `DELETE /locations/save` depending on `action`.
    ///
    /// Sent once: a timed-out write may already have been applied, so it is
    /// never retried.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnexpectedStatus`] if the backend rejects the change,
    /// [`ClientError::Http`] on network failure.
    pub async fn save_location(
        &self,
        location_id: &str,
        action: SaveAction,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["locations", "save"], &[])?;
        let method = match action {
            SaveAction::Save => Method::POST,
            SaveAction::Unsave => Method::DELETE,
        };

        let response = self
            .client
            .request(method, url.clone())
            .json(&SaveRequest { location_id })
            .send()
            .await?;
        read_body(response, &url).await?;

        tracing::info!(location_id, ?action, "updated saved locations");
        Ok(())
    }

    /// Appends `segments` to the base path and `query` as encoded pairs.
    pub(crate) fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET with retry, asserts a 2xx status, and parses the body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ClientError> {
        let body = self
            .retry
            .run(move || async move {
                let response = self.client.get(url.clone()).send().await?;
                read_body(response, url).await
            })
            .await?;

        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Decodes each raw entry on its own so one malformed record does not take
/// the rest of the list down.
fn decode_entries<T: DeserializeOwned>(entries: Vec<Value>, kind: &str) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let id = entry.get("id").and_then(Value::as_str).map(str::to_owned);
            serde_json::from_value(entry)
                .inspect_err(|e| {
                    tracing::warn!(kind, index, id = ?id, error = %e, "skipping malformed entry");
                })
                .ok()
        })
        .collect()
}

/// Maps non-2xx statuses to typed errors and returns the body text.
async fn read_body(response: reqwest::Response, url: &Url) -> Result<String, ClientError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
