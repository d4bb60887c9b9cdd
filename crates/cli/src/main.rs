mod commands;
mod exit_code;
mod progress;
mod prompt;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "reason-relay")]
#[command(about = "Refactor, scaffold and format Relay GraphQL in your components", long_about = None)]
#[command(version)]
struct Cli {
    /// Workspace root used to find the GraphQL config (defaults to the file's directory)
    #[arg(short, long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the refactors available at a position
    Actions {
        /// Component or GraphQL file
        file: PathBuf,

        #[command(flatten)]
        selection: commands::SelectionArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Apply one of the refactors available at a position
    Apply {
        /// Component or GraphQL file
        file: PathBuf,

        #[command(flatten)]
        selection: commands::SelectionArgs,

        /// Action title, or its number as listed by `actions`
        #[arg(short, long)]
        action: String,

        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Move the selected fields into a new fragment component
    ExtractFragment {
        /// Component or GraphQL file
        file: PathBuf,

        #[command(flatten)]
        selection: commands::SelectionArgs,

        /// Name of the new component
        #[arg(short, long)]
        name: String,

        /// Keep the extracted fields in the original selection
        #[arg(long)]
        keep_selection: bool,

        /// Print the results instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a new Relay module to a Reason component
    Scaffold {
        /// What to add
        #[arg(value_enum)]
        kind: commands::scaffold::Kind,

        /// Reason component file
        file: PathBuf,

        /// Line to insert the module before (1-based, defaults to the end of the file)
        #[arg(long)]
        line: Option<u32>,

        /// Type or root field to use instead of asking
        #[arg(long)]
        pick: Option<String>,

        /// Module names to use, in order, when the default name is taken
        #[arg(long)]
        name: Vec<String>,

        /// Never read answers from stdin
        #[arg(long)]
        no_input: bool,

        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Pretty-print the GraphQL in files
    Format {
        /// Files to format
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report files that need formatting instead of rewriting them
        #[arg(long)]
        check: bool,
    },

    /// Reload the workspace schema whenever it or the config changes
    Watch,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    match cli.command {
        Commands::Actions {
            file,
            selection,
            format,
        } => commands::actions::run(cli.root, &file, selection, format, output_opts).await,
        Commands::Apply {
            file,
            selection,
            action,
            dry_run,
        } => {
            commands::apply::run(cli.root, &file, selection, &action, dry_run, output_opts).await
        }
        Commands::ExtractFragment {
            file,
            selection,
            name,
            keep_selection,
            dry_run,
        } => {
            let options = commands::extract::ExtractOptions {
                name,
                keep_selection,
                dry_run,
            };
            commands::extract::run(cli.root, &file, selection, options, output_opts).await
        }
        Commands::Scaffold {
            kind,
            file,
            line,
            pick,
            name,
            no_input,
            dry_run,
        } => {
            let prompter = prompt::CliPrompter::new(pick, name, !no_input);
            let options = commands::scaffold::ScaffoldOptions { line, dry_run };
            commands::scaffold::run(cli.root, kind, &file, prompter, options, output_opts).await
        }
        Commands::Format { files, check } => commands::format::run(&files, check, output_opts),
        Commands::Watch => {
            let root = match cli.root {
                Some(root) => root,
                None => std::env::current_dir()?,
            };
            watch::run(root, output_opts).await
        }
    }
}

/// Initialize tracing; silent unless `RUST_LOG` is set
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// `--color` and `--no-color` win over `NO_COLOR`; otherwise the `colored`
/// crate decides based on TTY detection.
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    }
}
