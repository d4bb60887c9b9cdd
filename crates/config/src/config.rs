use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{ConfigError, Result};

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: HashMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once(("default", config.as_ref()))),
            Self::Multi { projects, .. } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == "default" => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects, .. } => projects.get(name),
        }
    }

    /// The project the schema is loaded from.
    ///
    /// A multi-project config must name one of its projects `default`.
    #[must_use]
    pub fn default_project(&self) -> Option<&ProjectConfig> {
        self.get_project("default")
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for a single GraphQL project.
///
/// Only the schema is read; other keys (`documents`, `extensions`, ...)
/// are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Schema source(s)
    pub schema: SchemaConfig,
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single file path or glob pattern
    Path(String),
    /// Multiple file paths or glob patterns
    Paths(Vec<String>),
}

impl SchemaConfig {
    /// Get all schema paths/patterns
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
        }
    }

    /// Check if any schema entry points at an HTTP endpoint
    #[must_use]
    pub fn has_remote_schema(&self) -> bool {
        self.paths().iter().copied().any(is_remote)
    }

    /// Resolve the schema entries to files on disk, relative to `base_dir`.
    ///
    /// Glob patterns (including a single `{a,b}` brace group) are expanded and
    /// sorted. Plain paths are returned as-is whether or not they exist, so a
    /// missing file surfaces as a read error. Remote entries are skipped.
    pub fn resolve_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in self.paths() {
            if is_remote(entry) {
                tracing::warn!(entry, "Remote schemas are not supported, skipping");
                continue;
            }

            for pattern in expand_braces(entry) {
                if !is_glob(&pattern) {
                    files.push(base_dir.join(&pattern));
                    continue;
                }

                let full = base_dir.join(&pattern);
                let paths = glob::glob(&full.to_string_lossy()).map_err(|e| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    }
                })?;
                let mut matched: Vec<PathBuf> = paths.filter_map(std::result::Result::ok).collect();
                matched.sort();
                tracing::debug!(pattern, matches = matched.len(), "Expanded schema pattern");
                files.extend(matched);
            }
        }

        files.dedup();
        Ok(files)
    }
}

fn is_remote(entry: &str) -> bool {
    entry.starts_with("http://") || entry.starts_with("https://")
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Normalize a glob pattern for consistent matching
///
/// Handles:
/// - Leading "./" prefix (removes it)
/// - Consecutive slashes (collapses to single slash)
fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = pattern.strip_prefix("./").unwrap_or(pattern).to_string();

    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }

    normalized
}

/// Expand brace patterns like "schema/*.{graphql,gql}" into separate patterns
fn expand_braces(pattern: &str) -> Vec<String> {
    let normalized = normalize_pattern(pattern);

    // Simple brace expansion - handles single brace group
    if let Some(start) = normalized.find('{') {
        if let Some(end) = normalized[start..].find('}').map(|i| start + i) {
            let before = &normalized[..start];
            let after = &normalized[end + 1..];
            let options = &normalized[start + 1..end];

            return options
                .split(',')
                .map(|opt| format!("{}{}{}", before, opt.trim(), after))
                .collect();
        }
    }

    vec![normalized]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project(schema: SchemaConfig) -> ProjectConfig {
        ProjectConfig { schema }
    }

    #[test]
    fn test_single_project_config() {
        let config = GraphQLConfig::Single(Box::new(project(SchemaConfig::Path(
            "schema.graphql".to_string(),
        ))));

        assert!(!config.is_multi_project());
        assert_eq!(config.project_count(), 1);
        assert!(config.default_project().is_some());
        assert!(config.get_project("other").is_none());
    }

    #[test]
    fn test_multi_project_default() {
        let mut projects = HashMap::new();
        projects.insert(
            "default".to_string(),
            project(SchemaConfig::Path("app/schema.graphql".to_string())),
        );
        projects.insert(
            "admin".to_string(),
            project(SchemaConfig::Path("admin/schema.graphql".to_string())),
        );
        let config = GraphQLConfig::Multi { projects };

        assert!(config.is_multi_project());
        assert_eq!(config.project_count(), 2);
        assert_eq!(
            config.default_project().unwrap().schema.paths(),
            vec!["app/schema.graphql"]
        );
    }

    #[test]
    fn test_multi_project_without_default() {
        let mut projects = HashMap::new();
        projects.insert(
            "admin".to_string(),
            project(SchemaConfig::Path("admin/schema.graphql".to_string())),
        );
        let config = GraphQLConfig::Multi { projects };
        assert!(config.default_project().is_none());
    }

    #[test]
    fn test_schema_config_paths() {
        let single = SchemaConfig::Path("schema.graphql".to_string());
        assert_eq!(single.paths(), vec!["schema.graphql"]);

        let multiple = SchemaConfig::Paths(vec![
            "schema1.graphql".to_string(),
            "schema2.graphql".to_string(),
        ]);
        assert_eq!(multiple.paths(), vec!["schema1.graphql", "schema2.graphql"]);
    }

    #[test]
    fn test_remote_schema_detection() {
        assert!(!SchemaConfig::Path("schema.graphql".to_string()).has_remote_schema());
        assert!(SchemaConfig::Paths(vec![
            "schema.graphql".to_string(),
            "https://api.example.com/graphql".to_string(),
        ])
        .has_remote_schema());
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("./schema/*.{graphql,gql}"),
            vec!["schema/*.graphql", "schema/*.gql"]
        );
        assert_eq!(expand_braces("schema.graphql"), vec!["schema.graphql"]);
    }

    #[test]
    fn test_resolve_files_expands_globs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema_dir = temp_dir.path().join("schema");
        fs::create_dir(&schema_dir).unwrap();
        fs::write(schema_dir.join("b.graphql"), "type B { id: ID }").unwrap();
        fs::write(schema_dir.join("a.graphql"), "type A { id: ID }").unwrap();
        fs::write(schema_dir.join("notes.txt"), "ignored").unwrap();

        let config = SchemaConfig::Path("schema/*.graphql".to_string());
        let files = config.resolve_files(temp_dir.path()).unwrap();

        assert_eq!(
            files,
            vec![schema_dir.join("a.graphql"), schema_dir.join("b.graphql")]
        );
    }

    #[test]
    fn test_resolve_files_keeps_plain_paths_and_skips_remote() {
        let base = Path::new("/workspace");
        let config = SchemaConfig::Paths(vec![
            "schema.graphql".to_string(),
            "https://api.example.com/graphql".to_string(),
        ]);
        let files = config.resolve_files(base).unwrap();
        assert_eq!(files, vec![PathBuf::from("/workspace/schema.graphql")]);
    }
}
