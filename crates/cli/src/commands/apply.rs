use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use relay_ide::{code_actions, CodeAction};

use super::{apply_edits, load_schema, write_output, SelectionArgs, SourceFile};
use crate::{ExitCode, OutputOptions};

pub async fn run(
    root: Option<PathBuf>,
    path: &Path,
    selection: SelectionArgs,
    action: &str,
    dry_run: bool,
    output_opts: OutputOptions,
) -> Result<()> {
    let file = SourceFile::read(path)?;
    let schema = load_schema(&file.workspace_root(root), output_opts).await;
    let actions = code_actions(&file.request(selection.range()), Some(&schema));

    let Some(chosen) = find_action(&actions, action) else {
        eprintln!(
            "{} No refactor matching {action:?} at {}:{}:{}",
            "Error:".red(),
            path.display(),
            selection.line,
            selection.column
        );
        for available in &actions {
            eprintln!("  {} {}", "available:".dimmed(), available.title);
        }
        ExitCode::NothingApplied.exit();
    };

    let Some(edit) = chosen.text_edit() else {
        eprintln!(
            "{} \"{}\" needs a component name, use `reason-relay extract-fragment`",
            "Error:".red(),
            chosen.title
        );
        ExitCode::InvalidInput.exit();
    };

    let updated = apply_edits(&file.text, std::slice::from_ref(edit))?;
    write_output(&file.path, &updated, dry_run)?;

    if output_opts.show_info && !dry_run {
        println!("{} {}", "✓".green(), chosen.title);
    }
    Ok(())
}

/// Find an action by exact title or by its 1-based number.
fn find_action<'a>(actions: &'a [CodeAction], query: &str) -> Option<&'a CodeAction> {
    if let Ok(number) = query.parse::<usize>() {
        return number.checked_sub(1).and_then(|index| actions.get(index));
    }
    actions.iter().find(|action| action.title == query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_ide::{Position, Range, TextEdit};

    fn actions() -> Vec<CodeAction> {
        ["Make fragment @inline", "Make fragment plural"]
            .into_iter()
            .map(|title| CodeAction::edit(title, TextEdit::new(Range::at(Position::new(0, 0)), "")))
            .collect()
    }

    #[test]
    fn test_find_action_by_title() {
        let actions = actions();
        let found = find_action(&actions, "Make fragment plural").unwrap();
        assert_eq!(found.title, "Make fragment plural");
        assert!(find_action(&actions, "Make fragment").is_none());
    }

    #[test]
    fn test_find_action_by_number() {
        let actions = actions();
        assert_eq!(find_action(&actions, "1").unwrap().title, "Make fragment @inline");
        assert!(find_action(&actions, "0").is_none());
        assert!(find_action(&actions, "3").is_none());
    }
}
