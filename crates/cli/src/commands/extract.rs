use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use relay_ide::{
    code_actions, extract_fragment, ActionPayload, ExtractChoice, ExtractFragmentError,
};

use super::{apply_edits, load_schema, write_output, SelectionArgs, SourceFile};
use crate::{ExitCode, OutputOptions};

pub struct ExtractOptions {
    pub name: String,
    pub keep_selection: bool,
    pub dry_run: bool,
}

pub async fn run(
    root: Option<PathBuf>,
    path: &Path,
    selection: SelectionArgs,
    options: ExtractOptions,
    output_opts: OutputOptions,
) -> Result<()> {
    let file = SourceFile::read(path)?;
    let schema = load_schema(&file.workspace_root(root), output_opts).await;
    let request = file.request(selection.range());

    let command = code_actions(&request, Some(&schema))
        .into_iter()
        .find_map(|action| match action.payload {
            ActionPayload::Command(command) => Some(command),
            ActionPayload::Edit(_) => None,
        });
    let Some(command) = command else {
        eprintln!(
            "{} Nothing to extract: select whole fields inside a selection on an object type",
            "Error:".red()
        );
        ExitCode::NothingApplied.exit();
    };

    let choice = ExtractChoice {
        component_name: options.name,
        remove_selection: !options.keep_selection,
    };
    let extracted = match extract_fragment(&request, &command, &choice, &file.path) {
        Ok(extracted) => extracted,
        Err(error @ (ExtractFragmentError::MissingName | ExtractFragmentError::InvalidName)) => {
            eprintln!("{} {error}", "Error:".red());
            ExitCode::InvalidInput.exit();
        }
        Err(error) => return Err(error).context("Failed to extract fragment"),
    };

    let new_file = &extracted.new_file;
    if !options.dry_run && new_file.path.exists() {
        anyhow::bail!("{} already exists", new_file.path.display());
    }

    let updated = apply_edits(&file.text, std::slice::from_ref(&extracted.edit))?;
    write_output(&new_file.path, &new_file.contents, options.dry_run)?;
    write_output(&file.path, &updated, options.dry_run)?;

    if output_opts.show_info && !options.dry_run {
        println!(
            "{} Created {} with fragment {}",
            "✓".green(),
            new_file.path.display(),
            extracted.fragment_name.bold()
        );
    }
    Ok(())
}
