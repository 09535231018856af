pub mod checker;
pub mod checks;
pub mod config;
pub mod errors;
pub mod events;
pub mod logger;
pub mod models;
pub mod report;
mod runtime;
pub mod services;
