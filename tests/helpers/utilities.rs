use dotenv::dotenv;
use std::env;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[allow(non_snake_case)]
pub struct FuncTestsSecrets {
    pub GCP_PROJECT_ID: Option<String>,
    pub GCP_CREDENTIALS: Option<String>,
    pub GKE_CLUSTER_NAME: Option<String>,
    pub GKE_CLUSTER_LOCATION: Option<String>,
}

impl Default for FuncTestsSecrets {
    fn default() -> Self {
        Self::new()
    }
}

impl FuncTestsSecrets {
    pub fn new() -> Self {
        dotenv().ok();

        FuncTestsSecrets {
            GCP_PROJECT_ID: Self::select_secret("GCP_PROJECT_ID"),
            GCP_CREDENTIALS: Self::select_secret("GCP_CREDENTIALS"),
            GKE_CLUSTER_NAME: Self::select_secret("GKE_CLUSTER_NAME"),
            GKE_CLUSTER_LOCATION: Self::select_secret("GKE_CLUSTER_LOCATION"),
        }
    }

    fn select_secret(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }
}

pub fn init() -> Instant {
    let ci_var = "CI";

    dotenv().ok();
    let _ = match env::var_os(ci_var) {
        Some(_) => tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::INFO)
            .with_current_span(true)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .try_init(),
    };

    info!(
        "running from current directory: {}",
        env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_default()
    );

    Instant::now()
}

pub fn teardown(start_time: Instant, test_name: String) {
    info!("{} seconds for test {}", start_time.elapsed().as_secs_f64(), test_name);
}

pub fn checker_run_test<T>(test: T)
where
    T: FnOnce() -> String,
{
    let start = init();

    let test_name = test();

    teardown(start, test_name);
}
