mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{convert, init, value, ConvertArgs, InitArgs, ValueArgs};
use tracing_subscriber::EnvFilter;

/// pxunit - rewrite px lengths into vw / rem
#[derive(Parser, Debug)]
#[command(name = "pxunit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pxunit.config.json
    Init(InitArgs),

    /// Convert stylesheet documents
    Convert(ConvertArgs),

    /// Convert individual declaration values
    Value(ValueArgs),
}

impl Command {
    fn debug(&self) -> bool {
        match self {
            Command::Init(_) => false,
            Command::Convert(args) => args.options.debug,
            Command::Value(args) => args.options.debug,
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.debug());

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Convert(args) => convert(args, &cwd),
            Command::Value(args) => value(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
