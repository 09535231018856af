use crate::helpers::utilities::FuncTestsSecrets;
use gke_compliance::config::CheckerParameters;
use gke_compliance::models::gcp::{CredentialsError, JsonCredentials};
use gke_compliance::services::gcp::api_client::GoogleApiClient;
use gke_compliance::services::gcp::auth_service::GoogleAuthService;
use gke_compliance::services::gcp::compute_service::ComputeService;
use gke_compliance::services::gcp::container_service::ContainerService;
use std::sync::Arc;

pub fn try_parse_json_credentials_from_str(credentials_raw_json: &str) -> Result<JsonCredentials, CredentialsError> {
    JsonCredentials::try_new_from_json_str(credentials_raw_json)
}

pub fn checker_parameters(secrets: &FuncTestsSecrets) -> CheckerParameters {
    CheckerParameters::new(
        secrets
            .GCP_PROJECT_ID
            .as_ref()
            .expect("GCP_PROJECT_ID should be defined in secrets"),
        secrets
            .GKE_CLUSTER_NAME
            .as_ref()
            .expect("GKE_CLUSTER_NAME should be defined in secrets"),
        secrets
            .GKE_CLUSTER_LOCATION
            .as_ref()
            .expect("GKE_CLUSTER_LOCATION should be defined in secrets"),
    )
    .expect("Invalid checker parameters in secrets")
}

/// Falls back to Application Default Credentials when GCP_CREDENTIALS isn't set.
pub fn gcp_services(secrets: &FuncTestsSecrets) -> (Arc<ContainerService>, Arc<ComputeService>) {
    let credentials = secrets
        .GCP_CREDENTIALS
        .as_ref()
        .map(|c| try_parse_json_credentials_from_str(c).expect("Cannot parse GCP_CREDENTIALS"));
    let auth_service = GoogleAuthService::new(credentials).expect("Cannot initialize google auth service");
    let api_client =
        Arc::new(GoogleApiClient::new(Arc::new(auth_service)).expect("Cannot initialize google api client"));

    (
        Arc::new(ContainerService::new(api_client.clone(), None).expect("Cannot initialize container service")),
        Arc::new(ComputeService::new(api_client, None).expect("Cannot initialize compute service")),
    )
}
