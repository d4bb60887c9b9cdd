use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use relay_extract::LineIndex;
use relay_ide::{scaffold, ComponentKind};
use relay_types::Language;

use super::{load_schema, write_output, SourceFile};
use crate::prompt::CliPrompter;
use crate::{ExitCode, OutputOptions};

/// Kind of Relay module to add
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Kind {
    Fragment,
    Query,
    Mutation,
    Subscription,
}

impl From<Kind> for ComponentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Fragment => Self::Fragment,
            Kind::Query => Self::Query,
            Kind::Mutation => Self::Mutation,
            Kind::Subscription => Self::Subscription,
        }
    }
}

pub struct ScaffoldOptions {
    /// 1-based line to insert before
    pub line: Option<u32>,
    pub dry_run: bool,
}

pub async fn run(
    root: Option<PathBuf>,
    kind: Kind,
    path: &Path,
    mut prompter: CliPrompter,
    options: ScaffoldOptions,
    output_opts: OutputOptions,
) -> Result<()> {
    let file = SourceFile::read(path)?;
    if file.language != Language::Reason {
        anyhow::bail!("Only Reason (.re) components can be scaffolded into");
    }
    let schema = load_schema(&file.workspace_root(root), output_opts).await;

    let Some(module) = scaffold(
        kind.into(),
        &schema,
        &file.module_name,
        &file.text,
        &mut prompter,
    ) else {
        if output_opts.show_info {
            eprintln!("{}", "Nothing scaffolded".yellow());
        }
        ExitCode::NothingApplied.exit();
    };

    let updated = insert_module(&file.text, &module, options.line);
    write_output(&file.path, &updated, options.dry_run)?;

    if output_opts.show_info && !options.dry_run {
        println!("{} Added {kind:?} module to {}", "✓".green(), path.display());
    }
    Ok(())
}

/// Insert `module` before the 1-based `line`, or append it to the file.
fn insert_module(text: &str, module: &str, line: Option<u32>) -> String {
    let index = LineIndex::new(text);
    let offset = line
        .and_then(|line| index.line_start(line.saturating_sub(1) as usize))
        .filter(|&offset| offset < text.len());

    if let Some(offset) = offset {
        return format!("{}{module}\n\n{}", &text[..offset], &text[offset..]);
    }

    let separator = if text.is_empty() || text.ends_with("\n\n") {
        ""
    } else if text.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    format!("{text}{separator}{module}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "module Query = [%relay.query {| query Q { viewer { id } } |}];";

    #[test]
    fn test_appends_with_blank_line() {
        assert_eq!(
            insert_module("let x = 1;\n", MODULE, None),
            format!("let x = 1;\n\n{MODULE}\n")
        );
        assert_eq!(
            insert_module("let x = 1;", MODULE, None),
            format!("let x = 1;\n\n{MODULE}\n")
        );
        assert_eq!(insert_module("", MODULE, None), format!("{MODULE}\n"));
    }

    #[test]
    fn test_inserts_before_line() {
        let text = "open Foo;\n\nlet make = () => ();\n";
        assert_eq!(
            insert_module(text, MODULE, Some(3)),
            format!("open Foo;\n\n{MODULE}\n\nlet make = () => ();\n")
        );
    }

    #[test]
    fn test_line_past_end_appends() {
        assert_eq!(
            insert_module("let x = 1;\n", MODULE, Some(40)),
            format!("let x = 1;\n\n{MODULE}\n")
        );
    }
}
