use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod output;
mod visualize;

use visualize::VisualizeArgs;

#[derive(Parser)]
#[command(
    name = "gitviz",
    version,
    about = "Render a git repository's commit graph from its loose objects"
)]
struct Cli {
    #[command(flatten)]
    args: VisualizeArgs,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match visualize::run(cli.args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error::format_error(&err));
            ExitCode::FAILURE
        }
    }
}
