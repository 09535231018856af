use crate::events::CheckerEvent;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

pub trait Logger: Send + Sync {
    fn log(&self, event: CheckerEvent);
}

impl From<&CheckerEvent> for LogLevel {
    fn from(event: &CheckerEvent) -> Self {
        match event {
            CheckerEvent::Debug(_, _) => LogLevel::Debug,
            CheckerEvent::Info(_, _) => LogLevel::Info,
            CheckerEvent::Warning(_, _) => LogLevel::Warning,
            CheckerEvent::Error(_, _) => LogLevel::Error,
        }
    }
}

#[derive(Clone)]
pub struct StdIoLogger {}

impl StdIoLogger {
    pub fn new() -> StdIoLogger {
        StdIoLogger {}
    }
}

impl Default for StdIoLogger {
    fn default() -> Self {
        StdIoLogger::new()
    }
}

impl Logger for StdIoLogger {
    fn log(&self, event: CheckerEvent) {
        let event_details = event.get_details();
        let execution_id = event_details.execution_id().to_string();

        tracing::span!(
            tracing::Level::INFO,
            "std_io_logger",
            project_id = event_details.project_id(),
            cluster_name = event_details.cluster_name(),
            location = event_details.location(),
            execution_id = execution_id.as_str(),
            stage = event_details.stage().to_string().as_str(),
        )
        .in_scope(|| {
            match LogLevel::from(&event) {
                LogLevel::Debug => debug!("{}", event.message()),
                LogLevel::Info => info!("{}", event.message()),
                LogLevel::Warning => warn!("{}", event.message()),
                LogLevel::Error => error!("{}", event.message()),
            };
        });
    }
}
