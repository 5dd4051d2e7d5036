use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shamir_solver::commands;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shamir-solver")]
#[command(about = "Reconstruct Shamir secrets and detect wrong shares", long_about = None)]
struct Cli {
    /// Log every evaluated share and skipped combination to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the secret from n shares with threshold k
    Solve {
        /// Path to a JSON input file
        #[arg(long, conflicts_with = "data")]
        file: Option<PathBuf>,

        /// JSON input (paste from webpage)
        #[arg(long)]
        data: Option<String>,
    },

    /// Find the constant term of a polynomial from base-encoded roots
    Decode {
        /// Path to a JSON input file
        #[arg(long, conflicts_with = "data")]
        file: Option<PathBuf>,

        /// JSON input with a "keys" object and one entry per x
        #[arg(long)]
        data: Option<String>,
    },

    /// Evaluate a single share expression, e.g. "sum(2,3)"
    Eval {
        #[arg(long)]
        expr: String,
    },

    /// Print a sample input for the solve command
    Example,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn read_input(file: Option<PathBuf>, data: Option<String>) -> Result<String> {
    match (file, data) {
        (Some(path), _) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, Some(data)) => Ok(data),
        (None, None) => bail!("Provide the input with --file or --data"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve { file, data } => {
            let input = read_input(file, data)?;
            commands::solve(&input)?;
        }
        Commands::Decode { file, data } => {
            let input = read_input(file, data)?;
            commands::solve_encoded(&input)?;
        }
        Commands::Eval { expr } => {
            commands::evaluate(&expr)?;
        }
        Commands::Example => {
            println!("{}", commands::example_input());
        }
    }

    Ok(())
}
