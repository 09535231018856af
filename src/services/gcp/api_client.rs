use crate::services::gcp::auth_service::GoogleAuthService;
use reqwest::StatusCode;
use reqwest::blocking::ClientBuilder;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum GoogleApiClientError {
    #[error("Cannot instantiate Google API client: {raw_error_message:?}")]
    CannotInstantiateClient { raw_error_message: String },
    #[error("Cannot authenticate call to `{url}`: {raw_error_message:?}")]
    CannotAuthenticate { url: String, raw_error_message: String },
    #[error("Call to `{url}` failed: {raw_error_message:?}")]
    TransportError { url: String, raw_error_message: String },
    #[error("Call to `{url}` was denied with status {status}: {raw_error_message:?}")]
    PermissionDenied {
        url: String,
        status: u16,
        raw_error_message: String,
    },
    #[error("Call to `{url}` returned unexpected status {status}: {raw_error_message:?}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        raw_error_message: String,
    },
    #[error("Cannot decode response from `{url}`: {raw_error_message:?}")]
    CannotDecodeResponse { url: String, raw_error_message: String },
}

/// Authenticated read-only JSON client shared by GCP REST services.
pub struct GoogleApiClient {
    http_client: reqwest::blocking::Client,
    auth_service: Arc<GoogleAuthService>,
}

impl GoogleApiClient {
    pub fn new(auth_service: Arc<GoogleAuthService>) -> Result<Self, GoogleApiClientError> {
        Self::new_with_client_builder(auth_service, reqwest::blocking::Client::builder())
    }

    fn new_with_client_builder(
        auth_service: Arc<GoogleAuthService>,
        client_builder: ClientBuilder,
    ) -> Result<Self, GoogleApiClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = client_builder
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("gke-compliance/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GoogleApiClientError::CannotInstantiateClient {
                raw_error_message: format!("Cannot create http client: {e}"),
            })?;

        Ok(GoogleApiClient {
            http_client,
            auth_service,
        })
    }

    /// GET `url` and decode its JSON body. A 404 is returned as `Ok(None)`.
    pub fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>, GoogleApiClientError> {
        let token = self
            .auth_service
            .access_token()
            .map_err(|e| GoogleApiClientError::CannotAuthenticate {
                url: url.to_string(),
                raw_error_message: e.to_string(),
            })?;

        let response = self
            .http_client
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .map_err(|e| GoogleApiClientError::TransportError {
                url: url.to_string(),
                raw_error_message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GoogleApiClientError::PermissionDenied {
                    url: url.to_string(),
                    status: status.as_u16(),
                    raw_error_message: body,
                },
                _ => GoogleApiClientError::UnexpectedStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                    raw_error_message: body,
                },
            });
        }

        response
            .json::<T>()
            .map(Some)
            .map_err(|e| GoogleApiClientError::CannotDecodeResponse {
                url: url.to_string(),
                raw_error_message: e.to_string(),
            })
    }
}

/// Appends `path` to `endpoint`, `endpoint` being treated as a directory.
pub fn build_api_url(endpoint: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path_with_slash = format!("{}/", base.path());
        base.set_path(&path_with_slash);
    }

    base.join(path.trim_start_matches('/'))
}
