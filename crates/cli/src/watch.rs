//! Watch mode: keep the workspace schema fresh.
//!
//! Uses the `notify` crate for file system events and debounces bursts of
//! changes before reloading the schema through the [`SchemaCache`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, RecursiveMode, Watcher};
use relay_config::{ProjectConfig, CONFIG_FILES};
use relay_schema::{ConfigSchemaLoader, SchemaCache};
use tokio::sync::mpsc;

use crate::{ExitCode, OutputOptions};

/// Debounce duration for file changes (milliseconds)
const DEBOUNCE_MS: u64 = 300;

pub async fn run(root: PathBuf, output_opts: OutputOptions) -> Result<()> {
    let config_path = match relay_config::find_config(&root) {
        Ok(Some(path)) => path,
        Ok(None) => {
            eprintln!(
                "{} No GraphQL config found in {} or its parents",
                "Error:".red(),
                root.display()
            );
            ExitCode::ConfigError.exit();
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::ConfigError.exit();
        }
    };
    let config = match relay_config::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::ConfigError.exit();
        }
    };
    let Some(project) = config.default_project() else {
        eprintln!(
            "{} {} has several projects but none named \"default\"",
            "Error:".red(),
            config_path.display()
        );
        ExitCode::ConfigError.exit();
    };

    let base_dir = config_path.parent().unwrap_or(&root).to_path_buf();
    let watch_paths = collect_watch_paths(project, &base_dir);

    let cache = SchemaCache::new(ConfigSchemaLoader);
    report(cache.get(&root).await.as_deref(), None, output_opts);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })
    .context("Failed to create file watcher")?;
    for path in &watch_paths {
        watcher
            .watch(path, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch path: {}", path.display()))?;
    }

    if output_opts.show_info {
        println!(
            "{} Watching {} for schema changes... (press {} to stop)",
            "●".cyan(),
            base_dir.display(),
            "Ctrl+C".bold()
        );
    }

    let mut pending: HashSet<PathBuf> = HashSet::new();
    loop {
        let event = if pending.is_empty() {
            rx.recv().await
        } else {
            match tokio::time::timeout(Duration::from_millis(DEBOUNCE_MS), rx.recv()).await {
                Ok(event) => event,
                Err(_) => {
                    let start = Instant::now();
                    let changed = pending.len();
                    pending.clear();
                    let schema = cache.refresh(&root).await;
                    report(schema.as_deref(), Some((changed, start)), output_opts);
                    continue;
                }
            }
        };

        match event {
            Some(Ok(event)) => {
                pending.extend(event.paths.into_iter().filter(|path| is_relevant_file(path)));
            }
            Some(Err(e)) => eprintln!("{} {e}", "Watch error:".red()),
            None => break,
        }
    }

    Ok(())
}

/// Directories holding the config file and the schema files.
fn collect_watch_paths(project: &ProjectConfig, base_dir: &Path) -> HashSet<PathBuf> {
    let mut paths = HashSet::new();
    paths.insert(base_dir.to_path_buf());

    match project.schema.resolve_files(base_dir) {
        Ok(files) => {
            for file in files {
                if let Some(parent) = file.parent() {
                    paths.insert(parent.to_path_buf());
                }
            }
        }
        Err(e) => tracing::warn!(error = %e, "Could not resolve schema files to watch"),
    }

    // Nested directories are already covered by a recursive watch on an ancestor
    let all: Vec<PathBuf> = paths.iter().cloned().collect();
    paths.retain(|path| !all.iter().any(|other| other != path && path.starts_with(other)));
    paths
}

/// Check if a change can affect the schema
fn is_relevant_file(path: &Path) -> bool {
    let is_config = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| CONFIG_FILES.contains(&name));
    let extension = path.extension().and_then(|e| e.to_str());
    is_config || matches!(extension, Some("graphql" | "gql" | "graphqls" | "json" | "yml" | "yaml"))
}

fn report(
    schema: Option<&apollo_compiler::Schema>,
    reload: Option<(usize, Instant)>,
    output_opts: OutputOptions,
) {
    let Some(schema) = schema else {
        eprintln!(
            "{} Schema failed to load (run with RUST_LOG=warn for details)",
            "✗".red()
        );
        return;
    };
    if !output_opts.show_info {
        return;
    }

    let types = schema.types.len();
    match reload {
        Some((changed, start)) => println!(
            "{} Reloaded schema with {types} types {}",
            "✓".green(),
            format!(
                "({changed} file(s) changed, {:.0}ms)",
                start.elapsed().as_secs_f64() * 1000.0
            )
            .dimmed()
        ),
        None => println!("{} Loaded schema with {types} types", "✓".green()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_files() {
        assert!(is_relevant_file(Path::new("/repo/schema.graphql")));
        assert!(is_relevant_file(Path::new("/repo/schema/schema.json")));
        assert!(is_relevant_file(Path::new("/repo/.graphqlrc")));
        assert!(is_relevant_file(Path::new("/repo/.relayrc")));
        assert!(!is_relevant_file(Path::new("/repo/src/App.re")));
        assert!(!is_relevant_file(Path::new("/repo/src/App.tsx")));
    }

    #[test]
    fn test_watch_paths_collapse_nested_directories() {
        let temp = tempfile::tempdir().unwrap();
        let schema_dir = temp.path().join("schema");
        std::fs::create_dir_all(&schema_dir).unwrap();
        std::fs::write(schema_dir.join("schema.graphql"), "type Query { a: Int }").unwrap();

        let config = relay_config::load_config_from_str(
            "schema: schema/schema.graphql",
            &temp.path().join(".graphqlrc.yml"),
        )
        .unwrap();
        let project = config.default_project().unwrap();

        let paths = collect_watch_paths(project, temp.path());
        assert_eq!(paths, HashSet::from([temp.path().to_path_buf()]));
    }
}
