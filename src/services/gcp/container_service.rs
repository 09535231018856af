use crate::models::gcp::io::{Cluster, ListNodePoolsResponse, NodePool};
use crate::models::gcp::{ClusterDescriptor, NodePoolDescriptor};
use crate::services::gcp::api_client::{GoogleApiClient, build_api_url};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

pub const GKE_API_ENDPOINT: &str = "https://container.googleapis.com/v1/";

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum ContainerServiceError {
    #[error("Cannot create container service: {raw_error_message:?}")]
    CannotCreateService { raw_error_message: String },
    #[error("Cannot get cluster `{cluster_name}`: {raw_error_message:?}")]
    CannotGetCluster {
        cluster_name: String,
        raw_error_message: String,
    },
    #[error("Cannot list node pools of cluster `{cluster_name}`: {raw_error_message:?}")]
    CannotListNodePools {
        cluster_name: String,
        raw_error_message: String,
    },
    #[error("Cannot get node pool `{node_pool_name}` of cluster `{cluster_name}`: {raw_error_message:?}")]
    CannotGetNodePool {
        cluster_name: String,
        node_pool_name: String,
        raw_error_message: String,
    },
}

/// Read-only access to GKE clusters and node pools.
#[cfg_attr(test, faux::create)]
pub struct ContainerService {
    client: Arc<GoogleApiClient>,
    endpoint: Url,
}

#[cfg_attr(test, faux::methods)]
impl ContainerService {
    pub fn new(client: Arc<GoogleApiClient>, endpoint: Option<Url>) -> Result<Self, ContainerServiceError> {
        let endpoint = match endpoint {
            Some(endpoint) => endpoint,
            None => Url::parse(GKE_API_ENDPOINT).map_err(|e| ContainerServiceError::CannotCreateService {
                raw_error_message: e.to_string(),
            })?,
        };

        Ok(ContainerService { client, endpoint })
    }

    /// Returns `None` when the cluster doesn't exist.
    pub fn get_cluster(
        &self,
        project_id: &str,
        location: &str,
        cluster_name: &str,
    ) -> Result<Option<ClusterDescriptor>, ContainerServiceError> {
        let to_error = |raw_error_message: String| ContainerServiceError::CannotGetCluster {
            cluster_name: cluster_name.to_string(),
            raw_error_message,
        };

        let url = build_api_url(
            &self.endpoint,
            &format!("projects/{project_id}/locations/{location}/clusters/{cluster_name}"),
        )
        .map_err(|e| to_error(e.to_string()))?;

        let cluster: Option<Cluster> = self.client.get_json(&url).map_err(|e| to_error(e.to_string()))?;

        Ok(cluster.map(ClusterDescriptor::from))
    }

    /// Node pool names in API order, empty when the cluster doesn't exist.
    pub fn list_node_pool_names(
        &self,
        project_id: &str,
        location: &str,
        cluster_name: &str,
    ) -> Result<Vec<String>, ContainerServiceError> {
        let to_error = |raw_error_message: String| ContainerServiceError::CannotListNodePools {
            cluster_name: cluster_name.to_string(),
            raw_error_message,
        };

        let url = build_api_url(
            &self.endpoint,
            &format!("projects/{project_id}/locations/{location}/clusters/{cluster_name}/nodePools"),
        )
        .map_err(|e| to_error(e.to_string()))?;

        let response: Option<ListNodePoolsResponse> =
            self.client.get_json(&url).map_err(|e| to_error(e.to_string()))?;

        Ok(response
            .unwrap_or_default()
            .node_pools
            .into_iter()
            .map(|node_pool| node_pool.name)
            .collect())
    }

    /// Returns `None` when the node pool doesn't exist.
    pub fn get_node_pool(
        &self,
        project_id: &str,
        location: &str,
        cluster_name: &str,
        node_pool_name: &str,
    ) -> Result<Option<NodePoolDescriptor>, ContainerServiceError> {
        let to_error = |raw_error_message: String| ContainerServiceError::CannotGetNodePool {
            cluster_name: cluster_name.to_string(),
            node_pool_name: node_pool_name.to_string(),
            raw_error_message,
        };

        let url = build_api_url(
            &self.endpoint,
            &format!("projects/{project_id}/locations/{location}/clusters/{cluster_name}/nodePools/{node_pool_name}"),
        )
        .map_err(|e| to_error(e.to_string()))?;

        let node_pool: Option<NodePool> = self.client.get_json(&url).map_err(|e| to_error(e.to_string()))?;

        Ok(node_pool.map(NodePoolDescriptor::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gcp::api_client::tests::{serve, stub_api_client};

    const PROJECT_ID: &str = "my-project-123";
    const LOCATION: &str = "us-central1-a";
    const CLUSTER_NAME: &str = "demo-cluster";

    #[test]
    fn test_get_cluster() {
        // setup:
        let (endpoint, server) = serve(vec![
            (
                200,
                r#"{"name": "demo-cluster", "status": "RUNNING", "location": "us-central1-a", "nodePools": [{"name": "standard"}]}"#,
            ),
            (404, "{}"),
        ]);
        let service = ContainerService::new(stub_api_client(), Some(endpoint)).expect("cannot create service");

        // execute:
        let existing = service.get_cluster(PROJECT_ID, LOCATION, CLUSTER_NAME);
        let missing = service.get_cluster(PROJECT_ID, LOCATION, "unknown");

        // verify:
        let existing = existing.expect("cluster should be fetched").expect("cluster should exist");
        assert_eq!("demo-cluster", existing.name);
        assert_eq!(Some("us-central1-a".to_string()), existing.zone);
        assert_eq!(1, existing.node_pools_count);
        assert_eq!(Ok(None), missing);
        assert_eq!(
            vec![
                "/projects/my-project-123/locations/us-central1-a/clusters/demo-cluster".to_string(),
                "/projects/my-project-123/locations/us-central1-a/clusters/unknown".to_string(),
            ],
            server
                .join()
                .expect("stub server panicked")
                .into_iter()
                .map(|r| r.path)
                .collect::<Vec<String>>()
        );
    }

    #[test]
    fn test_get_cluster_permission_denied_is_an_error() {
        // setup:
        let (endpoint, server) = serve(vec![(403, "forbidden")]);
        let service = ContainerService::new(stub_api_client(), Some(endpoint)).expect("cannot create service");

        // execute:
        let result = service.get_cluster(PROJECT_ID, LOCATION, CLUSTER_NAME);

        // verify:
        assert!(
            matches!(&result, Err(ContainerServiceError::CannotGetCluster { cluster_name, raw_error_message })
                if cluster_name == CLUSTER_NAME && raw_error_message.contains("403")),
            "unexpected result {result:?}"
        );
        server.join().expect("stub server panicked");
    }

    #[test]
    fn test_list_node_pool_names() {
        // setup:
        let (endpoint, server) = serve(vec![
            (
                200,
                r#"{"nodePools": [{"name": "standard", "status": "RUNNING"}, {"name": "highmem", "status": "ERROR"}]}"#,
            ),
            (404, "{}"),
        ]);
        let service = ContainerService::new(stub_api_client(), Some(endpoint)).expect("cannot create service");

        // execute:
        let node_pool_names = service.list_node_pool_names(PROJECT_ID, LOCATION, CLUSTER_NAME);
        let unknown_cluster_node_pool_names = service.list_node_pool_names(PROJECT_ID, LOCATION, "unknown");

        // verify:
        assert_eq!(
            Ok(vec!["standard".to_string(), "highmem".to_string()]),
            node_pool_names
        );
        assert_eq!(Ok(vec![]), unknown_cluster_node_pool_names);
        assert_eq!(
            "/projects/my-project-123/locations/us-central1-a/clusters/demo-cluster/nodePools",
            server.join().expect("stub server panicked")[0].path
        );
    }

    #[test]
    fn test_get_node_pool() {
        // setup:
        let (endpoint, server) = serve(vec![(200, r#"{"name": "standard", "status": "RUNNING"}"#), (404, "{}")]);
        let service = ContainerService::new(stub_api_client(), Some(endpoint)).expect("cannot create service");

        // execute:
        let existing = service.get_node_pool(PROJECT_ID, LOCATION, CLUSTER_NAME, "standard");
        let missing = service.get_node_pool(PROJECT_ID, LOCATION, CLUSTER_NAME, "vanished");

        // verify:
        assert_eq!(
            Ok(Some(NodePoolDescriptor {
                name: "standard".to_string(),
                status: "RUNNING".to_string(),
            })),
            existing
        );
        assert_eq!(Ok(None), missing);
        assert_eq!(
            "/projects/my-project-123/locations/us-central1-a/clusters/demo-cluster/nodePools/vanished",
            server.join().expect("stub server panicked")[1].path
        );
    }
}
