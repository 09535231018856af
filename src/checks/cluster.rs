use crate::checks::{CheckResult, CheckValue, Comparator, Predicate, evaluate_resource};
use crate::config::{CheckerParameters, ClusterExpectations};
use crate::models::gcp::ClusterDescriptor;

pub fn cluster_resource_name(cluster_name: &str) -> String {
    format!("cluster/{cluster_name}")
}

pub fn cluster_predicates(
    parameters: &CheckerParameters,
    expectations: &ClusterExpectations,
) -> Vec<Predicate<ClusterDescriptor>> {
    vec![
        Predicate::new(
            "name",
            |c: &ClusterDescriptor| Some(c.name.clone().into()),
            Comparator::Equals,
            parameters.cluster_name(),
        ),
        Predicate::new(
            "status",
            |c: &ClusterDescriptor| Some(c.status.clone().into()),
            Comparator::Equals,
            expectations.status.as_str(),
        ),
        Predicate::new(
            "zone",
            |c: &ClusterDescriptor| c.zone.clone().map(CheckValue::from),
            Comparator::Matches,
            parameters.location(),
        ),
        Predicate::new(
            "network",
            |c: &ClusterDescriptor| c.network.clone().map(CheckValue::from),
            Comparator::Equals,
            expectations.network.as_str(),
        ),
        Predicate::new(
            "subnetwork",
            |c: &ClusterDescriptor| c.subnetwork.clone().map(CheckValue::from),
            Comparator::Equals,
            expectations.subnetwork.as_str(),
        ),
        Predicate::new(
            "initial_node_count",
            |c: &ClusterDescriptor| c.initial_node_count.map(CheckValue::from),
            Comparator::Equals,
            expectations.initial_node_count,
        ),
        Predicate::new(
            "node_config.disk_size_gb",
            |c: &ClusterDescriptor| c.disk_size_gb.map(CheckValue::from),
            Comparator::Equals,
            expectations.disk_size_gb,
        ),
        Predicate::new(
            "node_config.image_type",
            |c: &ClusterDescriptor| c.image_type.clone().map(CheckValue::from),
            Comparator::Equals,
            expectations.image_type.as_str(),
        ),
        Predicate::new(
            "node_pools.count",
            |c: &ClusterDescriptor| Some(c.node_pools_count.into()),
            Comparator::Equals,
            expectations.node_pools_count,
        ),
        Predicate::new(
            "private_cluster_config.enable_private_nodes",
            |c: &ClusterDescriptor| c.enable_private_nodes.map(CheckValue::from),
            Comparator::Equals,
            expectations.enable_private_nodes,
        ),
    ]
}

pub fn check_cluster(
    parameters: &CheckerParameters,
    expectations: &ClusterExpectations,
    cluster: Option<&ClusterDescriptor>,
) -> Vec<CheckResult> {
    evaluate_resource(
        &cluster_resource_name(parameters.cluster_name()),
        cluster,
        &cluster_predicates(parameters, expectations),
    )
}
