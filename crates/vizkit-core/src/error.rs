//! Error types for vizkit.

use thiserror::Error;

use crate::interactor::MeshId;

/// The main error type for vizkit operations.
#[derive(Error, Debug)]
pub enum VizkitError {
    /// A construction or configuration parameter is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A capability required by the widget is not offered by the host.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The operation is not allowed while a drag is in progress.
    #[error("operation not allowed while a drag is in progress")]
    DragInProgress,

    /// The host renderer/interactor has been dropped.
    #[error("host renderer is no longer available")]
    HostUnavailable,

    /// A mesh handle does not belong to the renderer.
    #[error("mesh {0:?} is not registered with the renderer")]
    UnknownMesh(MeshId),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for vizkit operations.
pub type Result<T> = std::result::Result<T, VizkitError>;
