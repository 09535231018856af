use crate::checks::{CheckResult, Comparator, Predicate, evaluate_resource};
use crate::config::NodePoolExpectations;
use crate::models::gcp::NodePoolDescriptor;

pub fn node_pool_resource_name(cluster_name: &str, node_pool_name: &str) -> String {
    format!("node_pool/{cluster_name}/{node_pool_name}")
}

pub fn node_pool_predicates(expectations: &NodePoolExpectations) -> Vec<Predicate<NodePoolDescriptor>> {
    vec![Predicate::new(
        "status",
        |p: &NodePoolDescriptor| Some(p.status.clone().into()),
        Comparator::Equals,
        expectations.status.as_str(),
    )]
}

pub fn check_node_pool(
    cluster_name: &str,
    node_pool_name: &str,
    expectations: &NodePoolExpectations,
    node_pool: Option<&NodePoolDescriptor>,
) -> Vec<CheckResult> {
    evaluate_resource(
        &node_pool_resource_name(cluster_name, node_pool_name),
        node_pool,
        &node_pool_predicates(expectations),
    )
}
