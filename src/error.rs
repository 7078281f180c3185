#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No active academic year")]
    NoActiveAcademicYear,

    #[error("Academic year {0} has no classes")]
    EmptyClassCatalog(String),

    #[error("A generation run is already in progress")]
    RunInProgress,

    #[error("Conflict not found: {0}")]
    ConflictNotFound(String),

    #[error("No completed generation run")]
    NoCompletedRun,

    #[error("Generation worker aborted: {0}")]
    WorkerAborted(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Could not read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
