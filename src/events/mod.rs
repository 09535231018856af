use crate::config::CheckerParameters;
use crate::errors::CheckerError;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
/// CheckerEvent: represents an event happening during a compliance run.
pub enum CheckerEvent {
    /// Debug: represents a debug message event.
    Debug(EventDetails, String),
    /// Info: represents an info message event.
    Info(EventDetails, String),
    /// Warning: represents a warning message event, typically a failed check.
    Warning(EventDetails, String),
    /// Error: represents a run-level error event.
    Error(EventDetails, CheckerError),
}

impl CheckerEvent {
    /// Returns event's details.
    pub fn get_details(&self) -> &EventDetails {
        match self {
            CheckerEvent::Debug(details, _message) => details,
            CheckerEvent::Info(details, _message) => details,
            CheckerEvent::Warning(details, _message) => details,
            CheckerEvent::Error(details, _error) => details,
        }
    }

    /// Returns event's message.
    pub fn message(&self) -> String {
        match self {
            CheckerEvent::Debug(_details, message) => message.to_string(),
            CheckerEvent::Info(_details, message) => message.to_string(),
            CheckerEvent::Warning(_details, message) => message.to_string(),
            CheckerEvent::Error(_details, error) => error.message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "snake_case")]
/// Stage: represents the step of the run in which an event has been triggered.
pub enum Stage {
    Validation,
    Cluster,
    NodePools,
    Networks,
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// EventDetails: represents an event's context.
pub struct EventDetails {
    /// project_id: GCP project holding the cluster.
    project_id: String,
    /// cluster_name: GKE cluster under check.
    cluster_name: String,
    /// location: cluster location, zone or region.
    location: String,
    /// execution_id: identifier of the run, shared by all its events.
    execution_id: Uuid,
    /// stage: stage in which this event has been triggered.
    stage: Stage,
}

impl EventDetails {
    pub fn new(parameters: &CheckerParameters, execution_id: Uuid, stage: Stage) -> Self {
        EventDetails::from_raw_parameters(
            parameters.project_id(),
            parameters.cluster_name(),
            parameters.location(),
            execution_id,
            stage,
        )
    }

    /// Event context for values that may have failed validation, kept as given.
    pub fn from_raw_parameters(
        project_id: &str,
        cluster_name: &str,
        location: &str,
        execution_id: Uuid,
        stage: Stage,
    ) -> Self {
        EventDetails {
            project_id: project_id.to_string(),
            cluster_name: cluster_name.to_string(),
            location: location.to_string(),
            execution_id,
            stage,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn execution_id(&self) -> &Uuid {
        &self.execution_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}
