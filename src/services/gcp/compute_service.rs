use crate::models::gcp::NetworkDescriptor;
use crate::models::gcp::io::{Network, NetworkList};
use crate::services::gcp::api_client::{GoogleApiClient, build_api_url};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

pub const COMPUTE_API_ENDPOINT: &str = "https://compute.googleapis.com/compute/v1/";

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum ComputeServiceError {
    #[error("Cannot create compute service: {raw_error_message:?}")]
    CannotCreateService { raw_error_message: String },
    #[error("Cannot list networks of project `{project_id}`: {raw_error_message:?}")]
    CannotListNetworks {
        project_id: String,
        raw_error_message: String,
    },
    #[error("Cannot get network `{network_name}`: {raw_error_message:?}")]
    CannotGetNetwork {
        network_name: String,
        raw_error_message: String,
    },
}

/// Read-only access to Compute Engine VPC networks.
#[cfg_attr(test, faux::create)]
pub struct ComputeService {
    client: Arc<GoogleApiClient>,
    endpoint: Url,
}

#[cfg_attr(test, faux::methods)]
impl ComputeService {
    pub fn new(client: Arc<GoogleApiClient>, endpoint: Option<Url>) -> Result<Self, ComputeServiceError> {
        let endpoint = match endpoint {
            Some(endpoint) => endpoint,
            None => Url::parse(COMPUTE_API_ENDPOINT).map_err(|e| ComputeServiceError::CannotCreateService {
                raw_error_message: e.to_string(),
            })?,
        };

        Ok(ComputeService { client, endpoint })
    }

    /// Network names of the project, all pages included.
    pub fn list_network_names(&self, project_id: &str) -> Result<Vec<String>, ComputeServiceError> {
        let to_error = |raw_error_message: String| ComputeServiceError::CannotListNetworks {
            project_id: project_id.to_string(),
            raw_error_message,
        };

        let base_url = build_api_url(&self.endpoint, &format!("projects/{project_id}/global/networks"))
            .map_err(|e| to_error(e.to_string()))?;

        let mut network_names = vec![];
        let mut page_token: Option<String> = None;
        loop {
            let mut url = base_url.clone();
            if let Some(token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", token);
            }

            let page: NetworkList = self
                .client
                .get_json(&url)
                .map_err(|e| to_error(e.to_string()))?
                .unwrap_or_default();

            network_names.extend(page.items.into_iter().map(|network| network.name));

            match page.next_page_token {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    return Err(to_error(format!("page token `{token}` was returned twice")));
                }
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(network_names)
    }

    /// Returns `None` when the network doesn't exist.
    pub fn get_network(
        &self,
        project_id: &str,
        network_name: &str,
    ) -> Result<Option<NetworkDescriptor>, ComputeServiceError> {
        let to_error = |raw_error_message: String| ComputeServiceError::CannotGetNetwork {
            network_name: network_name.to_string(),
            raw_error_message,
        };

        let url = build_api_url(
            &self.endpoint,
            &format!("projects/{project_id}/global/networks/{network_name}"),
        )
        .map_err(|e| to_error(e.to_string()))?;

        let network: Option<Network> = self.client.get_json(&url).map_err(|e| to_error(e.to_string()))?;

        match network {
            None => Ok(None),
            Some(network) => NetworkDescriptor::try_from(network).map(Some).map_err(to_error),
        }
    }
}
