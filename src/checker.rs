use crate::checks::cluster::{check_cluster, cluster_resource_name};
use crate::checks::network::{check_network, network_resource_name};
use crate::checks::node_pool::{check_node_pool, node_pool_resource_name};
use crate::checks::{CheckResult, EXISTS_CHECK_NAME};
use crate::config::{CheckerParameters, CompliancePolicy};
use crate::errors::CheckerError;
use crate::events::{CheckerEvent, EventDetails, Stage};
use crate::logger::Logger;
use crate::report::CheckReport;
use crate::services::gcp::compute_service::ComputeService;
use crate::services::gcp::container_service::ContainerService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Runs the cluster, node pool and network checks against one GKE cluster.
pub struct ComplianceChecker {
    parameters: CheckerParameters,
    policy: CompliancePolicy,
    container_service: Arc<ContainerService>,
    compute_service: Arc<ComputeService>,
    logger: Box<dyn Logger>,
    execution_id: Uuid,
}

impl ComplianceChecker {
    pub fn new(
        parameters: CheckerParameters,
        policy: CompliancePolicy,
        container_service: Arc<ContainerService>,
        compute_service: Arc<ComputeService>,
        logger: Box<dyn Logger>,
    ) -> Self {
        ComplianceChecker {
            parameters,
            policy,
            container_service,
            compute_service,
            logger,
            execution_id: Uuid::new_v4(),
        }
    }

    pub fn execution_id(&self) -> &Uuid {
        &self.execution_id
    }

    fn event_details(&self, stage: Stage) -> EventDetails {
        EventDetails::new(&self.parameters, self.execution_id, stage)
    }

    /// Evaluates every check, `now` being the reference time for the network age check.
    ///
    /// Missing resources only fail their `exists` check; any other API failure aborts the run.
    pub fn run(&self, now: DateTime<Utc>) -> Result<CheckReport, CheckerError> {
        let mut report = CheckReport::new(self.parameters.clone(), self.execution_id, now);
        self.logger.log(CheckerEvent::Info(
            self.event_details(Stage::Cluster),
            format!(
                "Checking GKE cluster `{}` in project `{}` ({})",
                self.parameters.cluster_name(),
                self.parameters.project_id(),
                self.parameters.location()
            ),
        ));

        if let Err(e) = self.evaluate(&mut report, now) {
            self.logger
                .log(CheckerEvent::Error(self.event_details(Stage::Report), e.clone()));
            return Err(e);
        }

        let summary = report.summary();
        self.logger.log(match report.passed() {
            true => CheckerEvent::Info(self.event_details(Stage::Report), format!("Compliance passed: {summary}")),
            false => CheckerEvent::Warning(self.event_details(Stage::Report), format!("Compliance failed: {summary}")),
        });

        Ok(report)
    }

    fn evaluate(&self, report: &mut CheckReport, now: DateTime<Utc>) -> Result<(), CheckerError> {
        let cluster_results = self.check_cluster()?;
        self.record(report, Stage::Cluster, cluster_results);

        let node_pool_results = self.check_node_pools()?;
        self.record(report, Stage::NodePools, node_pool_results);

        let network_results = self.check_networks(now)?;
        self.record(report, Stage::Networks, network_results);

        Ok(())
    }

    fn record(&self, report: &mut CheckReport, stage: Stage, results: Vec<CheckResult>) {
        for failure in results.iter().filter(|r| r.is_failed()) {
            self.logger
                .log(CheckerEvent::Warning(self.event_details(stage), failure.to_string()));
        }
        report.extend(results);
    }

    fn check_cluster(&self) -> Result<Vec<CheckResult>, CheckerError> {
        let cluster = self
            .container_service
            .get_cluster(
                self.parameters.project_id(),
                self.parameters.location(),
                self.parameters.cluster_name(),
            )
            .map_err(|e| CheckerError::CannotFetchResource {
                resource: cluster_resource_name(self.parameters.cluster_name()),
                raw_error_message: e.to_string(),
            })?;

        self.log_fetched(Stage::Cluster, &cluster_resource_name(self.parameters.cluster_name()), cluster.is_some());

        Ok(check_cluster(&self.parameters, &self.policy.cluster, cluster.as_ref()))
    }

    fn check_node_pools(&self) -> Result<Vec<CheckResult>, CheckerError> {
        let cluster_name = self.parameters.cluster_name();
        let node_pool_names = self
            .container_service
            .list_node_pool_names(self.parameters.project_id(), self.parameters.location(), cluster_name)
            .map_err(|e| CheckerError::CannotFetchResource {
                resource: node_pool_resource_name(cluster_name, "*"),
                raw_error_message: e.to_string(),
            })?;

        let mut results = vec![];
        for node_pool_name in node_pool_names {
            let node_pool = self
                .container_service
                .get_node_pool(
                    self.parameters.project_id(),
                    self.parameters.location(),
                    cluster_name,
                    &node_pool_name,
                )
                .map_err(|e| CheckerError::CannotFetchResource {
                    resource: node_pool_resource_name(cluster_name, &node_pool_name),
                    raw_error_message: e.to_string(),
                })?;

            self.log_fetched(
                Stage::NodePools,
                &node_pool_resource_name(cluster_name, &node_pool_name),
                node_pool.is_some(),
            );
            results.extend(check_node_pool(
                cluster_name,
                &node_pool_name,
                &self.policy.node_pool,
                node_pool.as_ref(),
            ));
        }

        Ok(results)
    }

    fn check_networks(&self, now: DateTime<Utc>) -> Result<Vec<CheckResult>, CheckerError> {
        let project_id = self.parameters.project_id();
        let network_names =
            self.compute_service
                .list_network_names(project_id)
                .map_err(|e| CheckerError::CannotFetchResource {
                    resource: network_resource_name("*"),
                    raw_error_message: e.to_string(),
                })?;

        let mut results = vec![];
        for network_name in network_names {
            let network = self
                .compute_service
                .get_network(project_id, &network_name)
                .map_err(|e| CheckerError::CannotFetchResource {
                    resource: network_resource_name(&network_name),
                    raw_error_message: e.to_string(),
                })?;

            self.log_fetched(Stage::Networks, &network_resource_name(&network_name), network.is_some());
            results.extend(check_network(&network_name, &self.policy.network, now, network.as_ref()));
        }

        Ok(results)
    }

    fn log_fetched(&self, stage: Stage, resource: &str, found: bool) {
        self.logger.log(CheckerEvent::Debug(
            self.event_details(stage),
            match found {
                true => format!("Fetched `{resource}`"),
                false => format!("`{resource}` not found, `{EXISTS_CHECK_NAME}` check fails"),
            },
        ));
    }
}
