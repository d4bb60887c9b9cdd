pub mod actions;
pub mod apply;
pub mod extract;
pub mod format;
pub mod scaffold;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use apollo_compiler::Schema;
use colored::Colorize;
use relay_extract::LineIndex;
use relay_ide::{module_name_from_path, ActionRequest};
use relay_schema::{ConfigSchemaLoader, SchemaCache};
use relay_types::{Language, Position, Range, TextEdit};

use crate::{ExitCode, OutputOptions};

/// A cursor or selection, as 1-based lines and byte columns.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct SelectionArgs {
    /// Line of the cursor or of the selection start (1-based)
    #[arg(short, long)]
    pub line: u32,

    /// Column of the cursor or of the selection start (1-based, in bytes)
    #[arg(short, long, default_value_t = 1)]
    pub column: u32,

    /// Line of the selection end (defaults to the start line)
    #[arg(long)]
    pub end_line: Option<u32>,

    /// Column of the selection end (1-based, in bytes)
    #[arg(long)]
    pub end_column: Option<u32>,
}

impl SelectionArgs {
    /// The selection in editor coordinates.
    pub fn range(&self) -> Range {
        let start = to_position(self.line, self.column);
        let end = match (self.end_line, self.end_column) {
            (None, None) => start,
            (line, column) => to_position(line.unwrap_or(self.line), column.unwrap_or(1)),
        };
        Range::new(start, end)
    }
}

fn to_position(line: u32, column: u32) -> Position {
    Position::new(line.saturating_sub(1), column.saturating_sub(1))
}

/// A host file read from disk.
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub language: Language,
    pub module_name: String,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        let Some(language) = Language::from_path(path) else {
            anyhow::bail!("{} is not a GraphQL, script or Reason file", path.display());
        };
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("{} Failed to read {}: {e}", "Error:".red(), path.display());
                ExitCode::IoError.exit();
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            text,
            language,
            module_name: module_name_from_path(path),
        })
    }

    pub fn request(&self, selection: Range) -> ActionRequest<'_> {
        ActionRequest {
            language_id: self.language.language_id(),
            text: &self.text,
            selection,
            module_name: &self.module_name,
        }
    }

    /// The directory the schema lookup starts from.
    pub fn workspace_root(&self, root: Option<PathBuf>) -> PathBuf {
        root.or_else(|| self.path.parent().map(Path::to_path_buf))
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Load the schema for `root`, exiting with [`ExitCode::SchemaError`] if it
/// cannot be loaded.
pub async fn load_schema(root: &Path, output_opts: OutputOptions) -> Arc<Schema> {
    let spinner = output_opts
        .show_progress
        .then(|| crate::progress::spinner("Loading schema..."));

    let cache = SchemaCache::new(ConfigSchemaLoader);
    let schema = cache.get(root).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match schema {
        Some(schema) => schema,
        None => {
            eprintln!(
                "{} Could not load a schema for {} (run with RUST_LOG=warn for details)",
                "Error:".red(),
                root.display()
            );
            ExitCode::SchemaError.exit();
        }
    }
}

/// Apply non-overlapping edits to `text`.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let index = LineIndex::new(text);
    let offset = |position: Position| {
        index
            .offset(position.line as usize, position.character as usize)
            .with_context(|| format!("Position {position:?} is outside the file"))
    };

    let mut resolved = edits
        .iter()
        .map(|edit| Ok((offset(edit.range.start)?, offset(edit.range.end)?, edit)))
        .collect::<Result<Vec<_>>>()?;
    resolved.sort_by_key(|(start, _, _)| std::cmp::Reverse(*start));

    let mut result = text.to_string();
    for (start, end, edit) in resolved {
        result.replace_range(start..end, &edit.new_text);
    }
    Ok(result)
}

/// Write `contents` to `path`, or print it when `dry_run` is set.
pub fn write_output(path: &Path, contents: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{} {}", "//".dimmed(), path.display().to_string().dimmed());
        print!("{contents}");
        return Ok(());
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_defaults_to_cursor() {
        let args = SelectionArgs {
            line: 3,
            column: 5,
            end_line: None,
            end_column: None,
        };
        assert_eq!(args.range(), Range::at(Position::new(2, 4)));
    }

    #[test]
    fn test_selection_end_on_same_line() {
        let args = SelectionArgs {
            line: 3,
            column: 5,
            end_line: None,
            end_column: Some(9),
        };
        assert_eq!(
            args.range(),
            Range::new(Position::new(2, 4), Position::new(2, 8))
        );
    }

    #[test]
    fn test_apply_edits_in_reverse_order() {
        let text = "let a = 1;\nlet b = 2;\n";
        let edits = [
            TextEdit::new(
                Range::new(Position::new(0, 8), Position::new(0, 9)),
                "10",
            ),
            TextEdit::new(
                Range::new(Position::new(1, 8), Position::new(1, 9)),
                "20",
            ),
        ];
        assert_eq!(apply_edits(text, &edits).unwrap(), "let a = 10;\nlet b = 20;\n");
    }

    #[test]
    fn test_apply_edits_rejects_positions_outside_file() {
        let edits = [TextEdit::new(Range::at(Position::new(9, 0)), "x")];
        assert!(apply_edits("one line", &edits).is_err());
    }

    #[test]
    fn test_workspace_root_defaults_to_file_directory() {
        let file = SourceFile {
            path: PathBuf::from("src/components/Foo.re"),
            text: String::new(),
            language: Language::Reason,
            module_name: "Foo".to_string(),
        };
        assert_eq!(file.workspace_root(None), PathBuf::from("src/components"));
        assert_eq!(
            file.workspace_root(Some(PathBuf::from("/repo"))),
            PathBuf::from("/repo")
        );

        let bare = SourceFile {
            path: PathBuf::from("Foo.re"),
            ..file
        };
        assert_eq!(bare.workspace_root(None), PathBuf::from("."));
    }
}
