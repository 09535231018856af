use crate::errors::CheckerError;
use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Legacy projects may be scoped to a domain, e.g. `example.com:my-project`
static PROJECT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z0-9.-]+:)?[a-z][a-z0-9-]{4,28}[a-z0-9]$").unwrap_or_else(|e| panic!("invalid regex: {e}"))
});
static CLUSTER_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]([a-z0-9-]{0,38}[a-z0-9])?$").unwrap_or_else(|e| panic!("invalid regex: {e}")));

pub const PROJECT_ID_PARAMETER: &str = "gcp_project_id";
pub const CLUSTER_NAME_PARAMETER: &str = "cluster_name";
pub const LOCATION_PARAMETER: &str = "gcp_location";

/// Identifies the cluster under check. Validated at construction, immutable afterwards.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckerParameters {
    project_id: String,
    cluster_name: String,
    location: String,
}

impl CheckerParameters {
    pub fn new(project_id: &str, cluster_name: &str, location: &str) -> Result<Self, CheckerError> {
        let project_id = non_empty(PROJECT_ID_PARAMETER, project_id)?;
        if !PROJECT_ID_REGEX.is_match(&project_id) {
            return Err(CheckerError::InvalidParameter {
                parameter: PROJECT_ID_PARAMETER.to_string(),
                raw_error_message: format!(
                    "`{project_id}` is not a valid project id, expected 6 to 30 lowercase letters, digits or hyphens starting with a letter"
                ),
            });
        }

        let cluster_name = non_empty(CLUSTER_NAME_PARAMETER, cluster_name)?;
        if !CLUSTER_NAME_REGEX.is_match(&cluster_name) {
            return Err(CheckerError::InvalidParameter {
                parameter: CLUSTER_NAME_PARAMETER.to_string(),
                raw_error_message: format!(
                    "`{cluster_name}` is not a valid cluster name, expected at most 40 lowercase letters, digits or hyphens starting with a letter"
                ),
            });
        }

        // location is matched against the cluster zone as a pattern
        let location = non_empty(LOCATION_PARAMETER, location)?;
        if let Err(e) = Regex::new(&location) {
            return Err(CheckerError::InvalidParameter {
                parameter: LOCATION_PARAMETER.to_string(),
                raw_error_message: format!("`{location}` is not a valid location pattern: {e}"),
            });
        }

        Ok(CheckerParameters {
            project_id,
            cluster_name,
            location,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

fn non_empty(parameter: &str, value: &str) -> Result<String, CheckerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CheckerError::InvalidParameter {
            parameter: parameter.to_string(),
            raw_error_message: "parameter is required and cannot be empty".to_string(),
        });
    }

    Ok(value.to_string())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterExpectations {
    pub status: String,
    pub network: String,
    pub subnetwork: String,
    pub initial_node_count: i64,
    pub disk_size_gb: i64,
    pub image_type: String,
    pub node_pools_count: i64,
    pub enable_private_nodes: bool,
}

impl Default for ClusterExpectations {
    fn default() -> Self {
        ClusterExpectations {
            status: "RUNNING".to_string(),
            network: "vpc-network".to_string(),
            subnetwork: "vpc-subnetwork".to_string(),
            initial_node_count: 1,
            disk_size_gb: 100,
            image_type: "COS".to_string(),
            node_pools_count: 2,
            enable_private_nodes: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NodePoolExpectations {
    pub status: String,
}

impl Default for NodePoolExpectations {
    fn default() -> Self {
        NodePoolExpectations {
            status: "RUNNING".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkExpectations {
    /// Exclusive upper bound on the number of subnetworks.
    pub max_subnetworks: i64,
    /// A network created exactly `max_age_days` ago is too old.
    pub max_age_days: i64,
    pub routing_mode: String,
}

impl NetworkExpectations {
    /// Networks created at or before this instant are too old, `None` when it isn't representable.
    pub fn oldest_creation_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        TimeDelta::try_days(self.max_age_days).and_then(|max_age| now.checked_sub_signed(max_age))
    }

    fn validate(&self) -> Result<(), CheckerError> {
        if self.max_subnetworks < 0 {
            return Err(CheckerError::InvalidPolicy {
                raw_error_message: format!(
                    "network.max_subnetworks must not be negative, got {}",
                    self.max_subnetworks
                ),
            });
        }

        if self.max_age_days <= 0 || self.oldest_creation_date(Utc::now()).is_none() {
            return Err(CheckerError::InvalidPolicy {
                raw_error_message: format!(
                    "network.max_age_days must be a positive number of days within the supported date range, got {}",
                    self.max_age_days
                ),
            });
        }

        Ok(())
    }
}

impl Default for NetworkExpectations {
    fn default() -> Self {
        NetworkExpectations {
            max_subnetworks: 30,
            max_age_days: 3650,
            routing_mode: "REGIONAL".to_string(),
        }
    }
}

/// Expected values of every check. Each section and field falls back to its default when omitted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompliancePolicy {
    pub cluster: ClusterExpectations,
    pub node_pool: NodePoolExpectations,
    pub network: NetworkExpectations,
}

impl CompliancePolicy {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CheckerError> {
        if yaml.trim().is_empty() {
            return Ok(CompliancePolicy::default());
        }

        let policy: CompliancePolicy = serde_yaml::from_str(yaml).map_err(|e| CheckerError::InvalidPolicy {
            raw_error_message: format!("Cannot parse policy: {e}"),
        })?;
        policy.network.validate()?;

        Ok(policy)
    }

    pub fn from_file(path: &Path) -> Result<Self, CheckerError> {
        let content = fs::read_to_string(path).map_err(|e| CheckerError::InvalidPolicy {
            raw_error_message: format!("Cannot read policy file `{}`: {e}", path.display()),
        })?;

        CompliancePolicy::from_yaml_str(&content)
    }
}
