use thiserror::Error;

/// Failures while configuring or running the HTTP service.
///
/// The balance store itself has no failure modes; everything here
/// happens at startup or at the socket.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid value {value:?} for {key}: {message}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
