pub mod api_client;
pub mod auth_service;
pub mod compute_service;
pub mod container_service;
pub mod google_cloud_sdk_types;
