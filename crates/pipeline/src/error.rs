use {crate::PipelineState, thiserror::Error};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no working camera among the candidate devices")]
    NoCamera,
    #[error("pipeline already started (state {0})")]
    AlreadyStarted(PipelineState),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("pipeline task failed: {0}")]
    Join(String),
}
