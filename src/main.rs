//! gke-compliance
//!
//! Checks that a GKE cluster, its node pools and the project networks match the expected configuration.

use chrono::Utc;
use clap::Parser;
use gke_compliance::checker::ComplianceChecker;
use gke_compliance::config::{CheckerParameters, CompliancePolicy};
use gke_compliance::errors::CheckerError;
use gke_compliance::events::{CheckerEvent, EventDetails, Stage};
use gke_compliance::logger::{Logger, StdIoLogger};
use gke_compliance::models::gcp::JsonCredentials;
use gke_compliance::report::{EXIT_CODE_ERROR, OutputFormat};
use gke_compliance::services::gcp::api_client::GoogleApiClient;
use gke_compliance::services::gcp::auth_service::GoogleAuthService;
use gke_compliance::services::gcp::compute_service::ComputeService;
use gke_compliance::services::gcp::container_service::ContainerService;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GCP project holding the cluster
    #[arg(long, env = "GCP_PROJECT_ID")]
    project_id: String,

    /// GKE cluster name
    #[arg(long, env = "CLUSTER_NAME")]
    cluster_name: String,

    /// Cluster location, a literal zone or region (e.g. `us-central1-a`): it is part of the API path
    /// and is also matched as a pattern against the cluster zone
    #[arg(long, env = "GCP_LOCATION")]
    location: String,

    /// Service account JSON key file, Application Default Credentials are used when omitted
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// YAML file overriding expected values
    #[arg(long, env = "GKE_COMPLIANCE_POLICY")]
    policy: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Log format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// GKE API endpoint override
    #[arg(long, hide = true)]
    container_endpoint: Option<Url>,

    /// Compute API endpoint override
    #[arg(long, hide = true)]
    compute_endpoint: Option<Url>,
}

fn init_logger(log_format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = match log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}

fn load_credentials(path: &Path) -> Result<JsonCredentials, CheckerError> {
    let content = std::fs::read_to_string(path).map_err(|e| CheckerError::CannotCreateService {
        service: "auth".to_string(),
        raw_error_message: format!("Cannot read credentials file `{}`: {e}", path.display()),
    })?;

    JsonCredentials::try_new_from_json_str(&content).map_err(|e| CheckerError::CannotCreateService {
        service: "auth".to_string(),
        raw_error_message: e.to_string(),
    })
}

/// Validates parameters and policy before building any GCP client.
fn setup(cli: &Cli, logger: Box<dyn Logger>) -> Result<ComplianceChecker, CheckerError> {
    let parameters = CheckerParameters::new(&cli.project_id, &cli.cluster_name, &cli.location)?;
    let policy = match &cli.policy {
        Some(path) => CompliancePolicy::from_file(path)?,
        None => CompliancePolicy::default(),
    };

    let credentials = match &cli.credentials {
        Some(path) => Some(load_credentials(path)?),
        None => None,
    };
    let auth_service = GoogleAuthService::new(credentials).map_err(|e| CheckerError::CannotCreateService {
        service: "auth".to_string(),
        raw_error_message: e.to_string(),
    })?;
    let api_client = Arc::new(GoogleApiClient::new(Arc::new(auth_service)).map_err(|e| {
        CheckerError::CannotCreateService {
            service: "api client".to_string(),
            raw_error_message: e.to_string(),
        }
    })?);
    let container_service = ContainerService::new(api_client.clone(), cli.container_endpoint.clone()).map_err(|e| {
        CheckerError::CannotCreateService {
            service: "container".to_string(),
            raw_error_message: e.to_string(),
        }
    })?;
    let compute_service =
        ComputeService::new(api_client, cli.compute_endpoint.clone()).map_err(|e| CheckerError::CannotCreateService {
            service: "compute".to_string(),
            raw_error_message: e.to_string(),
        })?;

    Ok(ComplianceChecker::new(
        parameters,
        policy,
        Arc::new(container_service),
        Arc::new(compute_service),
        logger,
    ))
}

fn execute<L: Logger + Clone + 'static>(cli: &Cli, logger: L) -> i32 {
    let checker = match setup(cli, Box::new(logger.clone())) {
        Ok(checker) => checker,
        Err(e) => {
            logger.log(CheckerEvent::Error(
                EventDetails::from_raw_parameters(
                    &cli.project_id,
                    &cli.cluster_name,
                    &cli.location,
                    Uuid::new_v4(),
                    Stage::Validation,
                ),
                e,
            ));
            return EXIT_CODE_ERROR;
        }
    };

    // run errors are logged by the checker itself
    let Ok(report) = checker.run(Utc::now()) else {
        return EXIT_CODE_ERROR;
    };

    match report.render(cli.output) {
        Ok(rendered) => {
            println!("{rendered}");
            report.exit_code()
        }
        Err(e) => {
            logger.log(CheckerEvent::Error(
                EventDetails::new(&report.parameters, *checker.execution_id(), Stage::Report),
                e,
            ));
            EXIT_CODE_ERROR
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_format);

    ExitCode::from(execute(&cli, StdIoLogger::new()) as u8)
}
