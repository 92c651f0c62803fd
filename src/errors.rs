use thiserror::Error;

// Failures that end a client or server path; business-rule statuses are
// classified into outcomes before they get here.
#[derive(Debug, Error)]
pub enum GreetError {
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Call failed: {0}")]
    Status(#[from] tonic::Status),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Stream error: {0}")]
    Stream(String),
}

impl GreetError {
    /// Returns the gRPC status when the failure came from a call.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            GreetError::Status(status) => Some(status),
            _ => None,
        }
    }
}
