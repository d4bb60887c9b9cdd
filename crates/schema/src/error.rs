use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Config(#[from] relay_config::ConfigError),

    #[error("No GraphQL config found from {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Config has no default project")]
    NoDefaultProject,

    #[error("Config lists no schema files")]
    NoSchemaFiles,

    #[error("Failed to read schema file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema load task failed: {0}")]
    Task(String),
}
