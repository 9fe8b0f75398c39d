/// Errors that can occur in the dashboard binary.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// The setup file failed to load or validate.
    #[error(transparent)]
    Config(#[from] camshaft_data::ConfigError),

    /// Terminal or console I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed.
    #[error("snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
