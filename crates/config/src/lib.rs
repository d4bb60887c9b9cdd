mod config;
mod error;
mod loader;

pub use config::{GraphQLConfig, ProjectConfig, SchemaConfig};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
