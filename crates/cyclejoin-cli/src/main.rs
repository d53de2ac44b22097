mod cli;
mod cmd;
mod error;
mod io;

use clap::Parser;

pub use cli::{Cli, Command, GraphArgs, OutputFormat, PathOrStdin};

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Routes core and CLI log records to stderr.
///
/// `--quiet` keeps errors only, `--verbose` adds debug records; `RUST_LOG`
/// overrides both.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_module("cyclejoin_core", level)
        .filter_module("cyclejoin", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Count {
            graph,
            length,
            split,
            walk,
            output,
        } => cmd::count::run(
            graph,
            &cmd::count::CountOptions {
                length: *length,
                splits: split,
                walk: *walk,
                output: output.as_deref(),
            },
            cli,
        ),
        Command::Segments {
            graph,
            length,
            walk,
        } => cmd::segments::run(graph, *length, *walk, cli),
        Command::Inspect { graph } => cmd::inspect::run(graph, cli),
    }
}
