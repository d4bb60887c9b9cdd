use std::fs;
use std::path::{Path, PathBuf};

use apollo_compiler::parser::Parser;
use apollo_compiler::schema::SchemaBuilder;
use apollo_compiler::Schema;

use crate::{Result, SchemaError, RELAY_DIRECTIVES};

/// Produces the schema for a workspace root.
///
/// Implementations are blocking; [`crate::SchemaCache`] runs them off the
/// async executor.
pub trait SchemaLoader: Send + Sync + 'static {
    fn load(&self, workspace_root: &Path) -> Result<Schema>;
}

impl<F> SchemaLoader for F
where
    F: Fn(&Path) -> Result<Schema> + Send + Sync + 'static,
{
    fn load(&self, workspace_root: &Path) -> Result<Schema> {
        self(workspace_root)
    }
}

/// Loads the schema named by the workspace's GraphQL config.
///
/// The config is found by walking up from the workspace root; schema paths
/// are resolved relative to the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSchemaLoader;

impl SchemaLoader for ConfigSchemaLoader {
    fn load(&self, workspace_root: &Path) -> Result<Schema> {
        let config_path = relay_config::find_config(workspace_root)?
            .ok_or_else(|| SchemaError::ConfigNotFound(workspace_root.to_path_buf()))?;
        let config = relay_config::load_config(&config_path)?;
        let project = config
            .default_project()
            .ok_or(SchemaError::NoDefaultProject)?;

        let base_dir = config_path.parent().unwrap_or(workspace_root);
        let files = project.schema.resolve_files(base_dir)?;
        if files.is_empty() {
            return Err(SchemaError::NoSchemaFiles);
        }

        let sources = files
            .into_iter()
            .map(|path| match fs::read_to_string(&path) {
                Ok(sdl) => Ok((path, sdl)),
                Err(source) => Err(SchemaError::Read { path, source }),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            root = %workspace_root.display(),
            files = sources.len(),
            "Loading workspace schema"
        );
        Ok(build_schema(&sources))
    }
}

/// Build a schema from SDL sources plus [`RELAY_DIRECTIVES`].
///
/// Build errors are logged and the partial schema is returned, so a schema
/// with minor problems still supports refactoring.
#[must_use]
pub fn build_schema(sources: &[(PathBuf, String)]) -> Schema {
    let mut builder = SchemaBuilder::new();
    let mut parser = Parser::new();

    for (path, sdl) in sources {
        tracing::debug!(path = %path.display(), "Adding schema file");
        parser.parse_into_schema_builder(sdl.as_str(), path, &mut builder);
    }
    parser.parse_into_schema_builder(RELAY_DIRECTIVES, "relay-directives.graphql", &mut builder);

    match builder.build() {
        Ok(schema) => {
            tracing::debug!(type_count = schema.types.len(), "Built schema");
            schema
        }
        Err(with_errors) => {
            tracing::warn!(
                error_count = with_errors.errors.len(),
                "Schema has build errors, using partial schema"
            );
            with_errors.partial
        }
    }
}
