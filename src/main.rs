// Netstab: structural reliability for unreliable networks
//
// Reads a graph with per-edge success probabilities and reports pairwise
// connection probabilities, full connectivity, and disconnection counters.

use anyhow::Result;
use clap::Parser;

use netstab::cli::{self, Cli, Commands, OutputFormat};
use netstab::output;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Run the appropriate command
    if let Err(err) = run_command(&cli) {
        match cli.output {
            OutputFormat::Human => output::error(&format!("{:#}", err)),
            OutputFormat::Json | OutputFormat::Pretty => {
                println!("{}", output::JsonError::from_anyhow(&err).to_json())
            }
        }
        std::process::exit(output::exit_code_for(&err));
    }
}

fn run_command(cli: &Cli) -> Result<()> {
    match cli.command {
        Commands::Reliability(args) => cli::cmds::reliability(args, cli)?,
        Commands::Connected(args) => cli::cmds::connected(args, cli)?,
        Commands::Counters(args) => cli::cmds::counters(args, cli)?,
        Commands::Analyze(args) => cli::cmds::analyze(args, cli)?,
    }
    Ok(())
}
