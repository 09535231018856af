use crate::helpers::gcp::{checker_parameters, gcp_services};
use crate::helpers::utilities::{FuncTestsSecrets, checker_run_test};
use chrono::Utc;
use function_name::named;
use gke_compliance::checker::ComplianceChecker;
use gke_compliance::config::CompliancePolicy;
use gke_compliance::logger::StdIoLogger;
use gke_compliance::report::{EXIT_CODE_FAILED, EXIT_CODE_PASSED};
use tracing::{Level, info, span};
use uuid::Uuid;

#[cfg(feature = "test-gcp-minimal")]
#[named]
#[test]
fn gcp_test_cluster_compliance_run() {
    let test_name = function_name!();
    checker_run_test(|| {
        let span = span!(Level::INFO, "test", name = test_name);
        let _enter = span.enter();

        // setup:
        let secrets = FuncTestsSecrets::new();
        let parameters = checker_parameters(&secrets);
        let (container_service, compute_service) = gcp_services(&secrets);
        let checker = ComplianceChecker::new(
            parameters,
            CompliancePolicy::default(),
            container_service,
            compute_service,
            Box::new(StdIoLogger::new()),
        );

        // execute:
        let report = checker.run(Utc::now()).expect("Compliance run should not fail on API errors");

        // verify:
        info!("{}", report);
        assert!(!report.results.is_empty());
        assert!([EXIT_CODE_PASSED, EXIT_CODE_FAILED].contains(&report.exit_code()));
        assert_eq!(report.passed(), report.exit_code() == EXIT_CODE_PASSED);

        test_name.to_string()
    });
}

#[cfg(feature = "test-gcp-minimal")]
#[named]
#[test]
fn gcp_test_get_unknown_cluster_returns_none() {
    let test_name = function_name!();
    checker_run_test(|| {
        let span = span!(Level::INFO, "test", name = test_name);
        let _enter = span.enter();

        // setup:
        let secrets = FuncTestsSecrets::new();
        let parameters = checker_parameters(&secrets);
        let (container_service, _) = gcp_services(&secrets);
        let unknown_cluster_name = format!("unknown-{}", &Uuid::new_v4().to_string()[..8]);

        // execute:
        let cluster = container_service
            .get_cluster(parameters.project_id(), parameters.location(), &unknown_cluster_name)
            .expect("Getting an unknown cluster should not be an error");
        let node_pools = container_service
            .list_node_pool_names(parameters.project_id(), parameters.location(), &unknown_cluster_name)
            .expect("Listing node pools of an unknown cluster should not be an error");

        // verify:
        assert!(cluster.is_none());
        assert!(node_pools.is_empty());

        test_name.to_string()
    });
}

#[cfg(feature = "test-gcp-minimal")]
#[named]
#[test]
fn gcp_test_get_unknown_network_returns_none() {
    let test_name = function_name!();
    checker_run_test(|| {
        let span = span!(Level::INFO, "test", name = test_name);
        let _enter = span.enter();

        // setup:
        let secrets = FuncTestsSecrets::new();
        let parameters = checker_parameters(&secrets);
        let (_, compute_service) = gcp_services(&secrets);
        let unknown_network_name = format!("unknown-{}", &Uuid::new_v4().to_string()[..8]);

        // execute:
        let network = compute_service
            .get_network(parameters.project_id(), &unknown_network_name)
            .expect("Getting an unknown network should not be an error");

        // verify:
        assert!(network.is_none());

        test_name.to_string()
    });
}
