use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum GraphEntitiesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown entity type: {0}")]
    UnknownEntity(String),

    #[error("io error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
