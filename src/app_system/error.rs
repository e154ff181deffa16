use thiserror::Error;

/// Errors raised while running or stopping the system as a whole.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}
