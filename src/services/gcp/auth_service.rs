use crate::models::gcp::JsonCredentials;
use crate::runtime::block_on;
use crate::services::gcp::google_cloud_sdk_types::new_gcp_credentials_file_from_credentials;
use google_cloud_auth::project::{Config, create_token_source, create_token_source_from_credentials};
use google_cloud_auth::token_source::TokenSource;
use thiserror::Error;

/// Read access to GKE and Compute Engine resources is covered by this scope.
pub const CLOUD_PLATFORM_SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/cloud-platform"];

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum AuthServiceError {
    #[error("Cannot create token source for `{principal}`, error: `{raw_error_message}`")]
    CannotCreateTokenSource {
        principal: String,
        raw_error_message: String,
    },
    #[error("Cannot get access token for `{principal}`, error: `{raw_error_message}`")]
    CannotGetAccessToken {
        principal: String,
        raw_error_message: String,
    },
}

#[cfg_attr(test, faux::create)]
pub struct GoogleAuthService {
    principal: String,
    token_source: Box<dyn TokenSource>,
}

#[cfg_attr(test, faux::methods)]
impl GoogleAuthService {
    /// Uses the given service account key, or Application Default Credentials when `None`.
    pub fn new(google_credentials: Option<JsonCredentials>) -> Result<Self, AuthServiceError> {
        let config = Config::default().with_scopes(&CLOUD_PLATFORM_SCOPES);

        match google_credentials {
            Some(credentials) => {
                let principal = credentials.client_email.to_string();
                let credentials_file = new_gcp_credentials_file_from_credentials(credentials).map_err(|e| {
                    AuthServiceError::CannotCreateTokenSource {
                        principal: principal.to_string(),
                        raw_error_message: e.to_string(),
                    }
                })?;
                let token_source = block_on(create_token_source_from_credentials(&credentials_file, &config))
                    .map_err(|e| AuthServiceError::CannotCreateTokenSource {
                        principal: principal.to_string(),
                        raw_error_message: e.to_string(),
                    })?;

                Ok(Self {
                    principal,
                    token_source,
                })
            }
            None => {
                let principal = "application default credentials".to_string();
                let token_source =
                    block_on(create_token_source(config)).map_err(|e| AuthServiceError::CannotCreateTokenSource {
                        principal: principal.to_string(),
                        raw_error_message: e.to_string(),
                    })?;

                Ok(Self {
                    principal,
                    token_source,
                })
            }
        }
    }

    /// Returns a bearer token, refreshed by the underlying token source when expired.
    pub fn access_token(&self) -> Result<String, AuthServiceError> {
        block_on(self.token_source.token())
            .map(|token| token.access_token)
            .map_err(|e| AuthServiceError::CannotGetAccessToken {
                principal: self.principal.to_string(),
                raw_error_message: e.to_string(),
            })
    }
}
