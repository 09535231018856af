use thiserror::Error;

const CREDENTIALS_HINT_MESSAGE: &str = "Pass a service account key with --credentials or set GOOGLE_APPLICATION_CREDENTIALS, or log in with `gcloud auth application-default login`";
const PERMISSIONS_HINT_MESSAGE: &str = "The principal needs at least roles/container.viewer and roles/compute.networkViewer on the project";

/// Run-level errors. A failed check is never a `CheckerError`, it is reported in the check report.
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum CheckerError {
    #[error("Invalid parameter `{parameter}`: {raw_error_message}")]
    InvalidParameter {
        parameter: String,
        raw_error_message: String,
    },
    #[error("Invalid compliance policy: {raw_error_message}")]
    InvalidPolicy { raw_error_message: String },
    #[error("Cannot create {service} service: {raw_error_message}")]
    CannotCreateService {
        service: String,
        raw_error_message: String,
    },
    #[error("Cannot fetch `{resource}`: {raw_error_message}")]
    CannotFetchResource {
        resource: String,
        raw_error_message: String,
    },
    #[error("Cannot render check report: {raw_error_message}")]
    CannotRenderReport { raw_error_message: String },
}

impl CheckerError {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CheckerError::InvalidParameter { .. } => None,
            CheckerError::InvalidPolicy { .. } => None,
            CheckerError::CannotCreateService { .. } => Some(CREDENTIALS_HINT_MESSAGE),
            CheckerError::CannotFetchResource { .. } => Some(PERMISSIONS_HINT_MESSAGE),
            CheckerError::CannotRenderReport { .. } => None,
        }
    }

    /// Full message including the hint, if any.
    pub fn message(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{self} / Hint: {hint}"),
            None => self.to_string(),
        }
    }
}
