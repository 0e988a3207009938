// crecon - container cost reconciliation from the command line

mod exit_codes;
mod export;
mod inspect;
mod logging;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use contrecon_recon::StatusFilter;

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "crecon")]
#[command(about = "Reconcile container costs between two sets of spreadsheets")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected header row, headers and record count of every sheet
    #[command(after_help = "\
Examples:
  crecon inspect internal/march.xlsx
  crecon inspect carrier/*.xlsx --json")]
    Inspect {
        /// Workbooks or CSV files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON (default: human-readable listing)
        #[arg(long)]
        json: bool,
    },

    /// Suggest a column mapping from the headers of the given files
    #[command(after_help = "\
The mapping is printed as TOML, ready to paste under [side_a.mapping] or
[side_b.mapping] of a job file. Headers no rule recognised are listed on stderr.

Examples:
  crecon suggest carrier/march.xlsx
  crecon suggest carrier/march.xlsx --sheet 'march.xlsx::T3' --json")]
    Suggest {
        /// Workbooks or CSV files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Only use these sheets ("file::sheet"); repeatable
        #[arg(long = "sheet")]
        sheets: Vec<String>,

        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Run a reconciliation job
    #[command(after_help = "\
Exit code 0 when every container matches, 1 when any differ or are missing.

Examples:
  crecon run march.recon.toml
  crecon run march.recon.toml --json --only discrepancies
  crecon run march.recon.toml --output march-report.xlsx
  crecon run march.recon.toml --search MSKU --output msku.csv")]
    Run {
        /// Path to the .recon.toml job file
        config: PathBuf,

        /// Print the report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the report to a .csv, .xlsx or .json file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Keep only: all, discrepancies, missing, match, mismatch, missing_a, missing_b
        #[arg(long, default_value = "all")]
        only: StatusFilter,

        /// Keep only results whose contract number or key contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Validate a job file without running it
    #[command(after_help = "\
Examples:
  crecon validate march.recon.toml")]
    Validate {
        /// Path to the .recon.toml job file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  contrecon-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&logging::LogConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Inspect { files, json } => inspect::cmd_inspect(files, json),
        Commands::Suggest { files, sheets, json } => inspect::cmd_suggest(files, sheets, json),
        Commands::Run { config, json, output, only, search } => recon::cmd_run(
            config,
            recon::RunOptions { json, output, only, search },
        ),
        Commands::Validate { config } => recon::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
