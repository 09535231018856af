#[cfg(feature = "test-gcp-minimal")]
mod gcp_cluster_compliance;
