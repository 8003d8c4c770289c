use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot start graph engine '{engine}': {source}")]
    EngineUnavailable {
        engine: String,
        #[source]
        source: std::io::Error,
    },
    #[error("graph engine '{engine}' failed ({status}): {stderr}")]
    Engine {
        engine: String,
        status: String,
        stderr: String,
    },
    #[error("config error: {0}")]
    Config(String),
}
