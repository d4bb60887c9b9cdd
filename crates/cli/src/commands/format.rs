use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use relay_ide::format_document;

use super::{apply_edits, write_output, SourceFile};
use crate::{ExitCode, OutputOptions};

pub fn run(files: &[PathBuf], check: bool, output_opts: OutputOptions) -> Result<()> {
    let mut unformatted = Vec::new();

    for path in files {
        let file = SourceFile::read(path)?;
        let edits = format_document(file.language.language_id(), &file.text);
        if edits.is_empty() {
            tracing::debug!(path = %path.display(), "Already formatted");
            continue;
        }

        if check {
            unformatted.push(path);
            continue;
        }

        let updated = apply_edits(&file.text, &edits)?;
        write_output(path, &updated, false)?;
        if output_opts.show_info {
            println!(
                "{} {} {}",
                "Formatted".green(),
                path.display(),
                format!("({} regions)", edits.len()).dimmed()
            );
        }
    }

    if !unformatted.is_empty() {
        for path in &unformatted {
            println!("{} {}", "Needs formatting:".yellow(), path.display());
        }
        ExitCode::NothingApplied.exit();
    }

    if check && output_opts.show_info {
        println!("{} All files formatted", "✓".green());
    }
    Ok(())
}
