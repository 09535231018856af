use crate::models::gcp::{CredentialsError, JsonCredentials};
use crate::runtime::block_on;
use google_cloud_auth::credentials::CredentialsFile;

/// Handle conversion and deal with external types for Google cloud
/// defined here https://github.com/yoshidan/google-cloud-rust
/// Keeping it isolated prevent from high coupling with third party crate

pub fn new_gcp_credentials_file_from_credentials(
    credentials: JsonCredentials,
) -> Result<CredentialsFile, CredentialsError> {
    block_on(CredentialsFile::new_from_str(credentials.to_json_string()?.as_str())).map_err(|e| {
        CredentialsError::CannotCreateCredentials {
            raw_error_message: e.to_string(),
        }
    })
}
