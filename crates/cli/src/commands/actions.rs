use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use relay_ide::{code_actions, ActionPayload, CodeAction};
use serde::Serialize;

use super::{load_schema, SelectionArgs, SourceFile};
use crate::{OutputFormat, OutputOptions};

#[derive(Serialize)]
struct ActionOutput<'a> {
    index: usize,
    title: &'a str,
    kind: &'static str,
    /// Follow-up command for actions that need more input
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
}

impl<'a> ActionOutput<'a> {
    fn new(index: usize, action: &'a CodeAction) -> Self {
        Self {
            index: index + 1,
            title: &action.title,
            kind: action.kind.as_str(),
            command: match &action.payload {
                ActionPayload::Command(command) => Some(&command.title),
                ActionPayload::Edit(_) => None,
            },
        }
    }
}

pub async fn run(
    root: Option<PathBuf>,
    path: &Path,
    selection: SelectionArgs,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> Result<()> {
    let file = SourceFile::read(path)?;
    let schema = load_schema(&file.workspace_root(root), output_opts).await;
    let actions = code_actions(&file.request(selection.range()), Some(&schema));

    match format {
        OutputFormat::Human => {
            if actions.is_empty() {
                if output_opts.show_info {
                    println!("{}", "No refactors available here".yellow());
                }
                return Ok(());
            }
            for (index, action) in actions.iter().enumerate() {
                println!(
                    "{:>3}) {} {}",
                    index + 1,
                    action.title.bold(),
                    format!("({})", action.kind.as_str()).dimmed()
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = actions
                .iter()
                .enumerate()
                .map(|(index, action)| ActionOutput::new(index, action))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
