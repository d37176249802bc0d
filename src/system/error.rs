use thiserror::Error;

/// Why a snapshot could not be produced for a process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    #[error("process {pid} not found")]
    ProcessNotFound { pid: u32 },

    #[error("permission denied while inspecting process {pid}")]
    PermissionDenied { pid: u32 },

    #[error("process {pid} did not reach running status after {attempts} polls")]
    Timeout { pid: u32, attempts: u32 },

    #[error("{0}")]
    Unknown(String),
}

impl CollectError {
    /// True for failures that may clear up on a later poll.
    pub fn is_transient(&self) -> bool {
        matches!(self, CollectError::Timeout { .. } | CollectError::Unknown(_))
    }
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        CollectError::Unknown(err.to_string())
    }
}
