pub mod gcp;
pub mod utilities;
