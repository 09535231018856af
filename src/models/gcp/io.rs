use crate::models::gcp::{
    ClusterDescriptor, CredentialsError, JsonCredentials as GkeJsonCredentials,
    JsonCredentialsType as GkeJsonCredentialsType, NetworkDescriptor, NodePoolDescriptor,
};
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum JsonCredentialsType {
    #[serde(rename = "service_account")]
    ServiceAccount,
}

impl From<JsonCredentialsType> for GkeJsonCredentialsType {
    fn from(value: JsonCredentialsType) -> Self {
        match value {
            JsonCredentialsType::ServiceAccount => GkeJsonCredentialsType::ServiceAccount,
        }
    }
}

impl From<GkeJsonCredentialsType> for JsonCredentialsType {
    fn from(value: GkeJsonCredentialsType) -> Self {
        match value {
            GkeJsonCredentialsType::ServiceAccount => JsonCredentialsType::ServiceAccount,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct JsonCredentials {
    pub r#type: JsonCredentialsType,
    // Service account fields
    pub client_email: String,
    pub client_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: String,
    pub client_x509_cert_url: String,
    pub project_id: String,
    #[serde(default = "default_universe_domain")]
    pub universe_domain: String,
}

fn default_universe_domain() -> String {
    "googleapis.com".to_string()
}

impl JsonCredentials {
    pub fn try_new_from_json_str(json: &str) -> Result<Self, CredentialsError> {
        serde_json::from_str(json).map_err(|e| CredentialsError::CannotCreateCredentials {
            raw_error_message: format!("Cannot parse JSON credentials: {e}"),
        })
    }
}

impl TryFrom<JsonCredentials> for GkeJsonCredentials {
    type Error = String;

    fn try_from(value: JsonCredentials) -> Result<Self, Self::Error> {
        Ok(GkeJsonCredentials {
            r#type: GkeJsonCredentialsType::from(value.r#type),
            client_email: value.client_email,
            client_id: value.client_id,
            private_key: value.private_key,
            private_key_id: value.private_key_id,
            auth_uri: Url::from_str(&value.auth_uri).map_err(|_e| "Cannot parse auth_uri to URL")?,
            token_uri: Url::from_str(&value.token_uri).map_err(|_e| "Cannot parse token_uri to URL")?,
            auth_provider_x509_cert_url: Url::from_str(&value.auth_provider_x509_cert_url)
                .map_err(|_e| "Cannot parse auth_provider_x509_cert_url to URL")?,
            client_x509_cert_url: Url::from_str(&value.client_x509_cert_url)
                .map_err(|_e| "Cannot parse client_x509_cert_url to URL")?,
            project_id: value.project_id,
            universe_domain: value.universe_domain,
        })
    }
}

impl From<GkeJsonCredentials> for JsonCredentials {
    fn from(value: GkeJsonCredentials) -> Self {
        JsonCredentials {
            r#type: JsonCredentialsType::from(value.r#type),
            client_email: value.client_email,
            client_id: value.client_id,
            private_key: value.private_key,
            private_key_id: value.private_key_id,
            auth_uri: value.auth_uri.to_string(),
            token_uri: value.token_uri.to_string(),
            auth_provider_x509_cert_url: value.auth_provider_x509_cert_url.to_string(),
            client_x509_cert_url: value.client_x509_cert_url.to_string(),
            project_id: value.project_id,
            universe_domain: value.universe_domain,
        }
    }
}

// GKE REST payloads, https://cloud.google.com/kubernetes-engine/docs/reference/rest/v1/projects.locations.clusters

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    #[serde(default)]
    pub status: String,
    pub location: Option<String>,
    pub zone: Option<String>,
    pub network: Option<String>,
    pub subnetwork: Option<String>,
    pub initial_node_count: Option<i64>,
    pub node_config: Option<NodeConfig>,
    #[serde(default)]
    pub node_pools: Vec<NodePool>,
    pub private_cluster_config: Option<PrivateClusterConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub disk_size_gb: Option<i64>,
    pub image_type: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateClusterConfig {
    pub enable_private_nodes: Option<bool>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodePool {
    pub name: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListNodePoolsResponse {
    #[serde(default)]
    pub node_pools: Vec<NodePool>,
}

impl From<Cluster> for ClusterDescriptor {
    fn from(value: Cluster) -> Self {
        let (disk_size_gb, image_type) = match value.node_config {
            Some(node_config) => (node_config.disk_size_gb, node_config.image_type),
            None => (None, None),
        };

        ClusterDescriptor {
            name: value.name,
            status: value.status,
            // `zone` is deprecated in favor of `location` but still filled for zonal clusters
            zone: value.location.or(value.zone),
            network: value.network,
            subnetwork: value.subnetwork,
            initial_node_count: value.initial_node_count,
            disk_size_gb,
            image_type,
            node_pools_count: value.node_pools.len() as i64,
            enable_private_nodes: value.private_cluster_config.and_then(|c| c.enable_private_nodes),
        }
    }
}

impl From<NodePool> for NodePoolDescriptor {
    fn from(value: NodePool) -> Self {
        NodePoolDescriptor {
            name: value.name,
            status: value.status,
        }
    }
}

// Compute REST payloads, https://cloud.google.com/compute/docs/reference/rest/v1/networks

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,
    #[serde(default)]
    pub subnetworks: Vec<String>,
    pub creation_timestamp: Option<String>,
    pub routing_config: Option<RoutingConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    pub routing_mode: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkList {
    #[serde(default)]
    pub items: Vec<Network>,
    pub next_page_token: Option<String>,
}

impl TryFrom<Network> for NetworkDescriptor {
    type Error = String;

    fn try_from(value: Network) -> Result<Self, Self::Error> {
        let creation_timestamp = match value.creation_timestamp {
            None => None,
            Some(t) => Some(
                DateTime::parse_from_rfc3339(&t)
                    .map_err(|e| format!("Cannot parse network creation timestamp `{t}`: {e}"))?
                    .with_timezone(&Utc),
            ),
        };

        Ok(NetworkDescriptor {
            name: value.name,
            subnetworks_count: value.subnetworks.len() as i64,
            creation_timestamp,
            routing_mode: value.routing_config.and_then(|c| c.routing_mode),
        })
    }
}
