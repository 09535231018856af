pub mod io;

use chrono::{DateTime, Utc};
use derivative::Derivative;
use serde_derive::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use url::Url;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Cannot create credentials: {raw_error_message:?}.")]
    CannotCreateCredentials { raw_error_message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonCredentialsType {
    ServiceAccount,
}

impl Display for JsonCredentialsType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            JsonCredentialsType::ServiceAccount => "service_account",
        })
    }
}

/// Service account key as downloaded from the GCP console.
/// `private_key` is never printed by `Debug`.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct JsonCredentials {
    pub r#type: JsonCredentialsType,
    pub client_email: String,
    pub client_id: String,
    pub private_key_id: String,
    #[derivative(Debug = "ignore")]
    pub private_key: String,
    pub auth_uri: Url,
    pub token_uri: Url,
    pub auth_provider_x509_cert_url: Url,
    pub client_x509_cert_url: Url,
    pub project_id: String,
    pub universe_domain: String,
}

impl JsonCredentials {
    pub fn try_new_from_json_str(json: &str) -> Result<Self, CredentialsError> {
        let io_credentials = io::JsonCredentials::try_new_from_json_str(json)?;
        JsonCredentials::try_from(io_credentials)
            .map_err(|e| CredentialsError::CannotCreateCredentials { raw_error_message: e })
    }

    pub fn to_json_string(&self) -> Result<String, CredentialsError> {
        serde_json::to_string(&io::JsonCredentials::from(self.clone())).map_err(|e| {
            CredentialsError::CannotCreateCredentials {
                raw_error_message: format!("Cannot serialize credentials to JSON: {e}"),
            }
        })
    }
}

/// Snapshot of a GKE cluster, only the fields the compliance checks read.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClusterDescriptor {
    pub name: String,
    pub status: String,
    /// Cluster location, either a zone or a region.
    pub zone: Option<String>,
    pub network: Option<String>,
    pub subnetwork: Option<String>,
    pub initial_node_count: Option<i64>,
    pub disk_size_gb: Option<i64>,
    pub image_type: Option<String>,
    pub node_pools_count: i64,
    pub enable_private_nodes: Option<bool>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodePoolDescriptor {
    pub name: String,
    pub status: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescriptor {
    pub name: String,
    pub subnetworks_count: i64,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub routing_mode: Option<String>,
}
