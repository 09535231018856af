pub mod gcp;
