//! Time on Ground CLI
//!
//! Replays a recorded match script and exports the final report
//! (table / CSV / JSON), or prints the position board.

#[cfg(feature = "cli")]
mod log_init;

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tog_cli::{ExportFormat, MatchScript};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tog")]
#[command(about = "Replay match scripts and export time-on-ground reports", long_about = None)]
struct Cli {
    /// Tracker config file (YAML, or JSON by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Replay a script and export the match report
    Replay {
        /// Match script JSON file
        #[arg(long)]
        script: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Table)]
        format: ExportFormat,

        /// Output file (prints to stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the alert messages raised during the replay
        #[arg(long, default_value = "false")]
        notices: bool,
    },

    /// Replay a script and print the position board
    Board {
        /// Match script JSON file
        #[arg(long)]
        script: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    log_init::init();
    let cli = Cli::parse();
    let config = tog_cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { script, format, out, notices } => {
            let script = MatchScript::load(&script)?;
            let result = tog_cli::replay(&script, config)?;

            if notices {
                for notice in &result.notices {
                    println!("* {}", notice);
                }
                println!();
            }

            let report = result.report();
            match out {
                Some(path) => {
                    tog_cli::write_report(&report, format, &path)?;
                    println!("Report saved to: {}", path.display());
                }
                None => print!("{}", tog_cli::export::render(&report, format)?),
            }
        }

        Commands::Board { script } => {
            let script = MatchScript::load(&script)?;
            let result = tog_cli::replay(&script, config)?;
            print!("{}", tog_cli::render_board(&result.board()));
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tog CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
