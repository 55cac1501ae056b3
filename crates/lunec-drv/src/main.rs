//! lunec - command-line entry point for the lune compiler.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lunec_drv::Config;

/// Compiler for the lune language
#[derive(Parser, Debug)]
#[command(name = "lunec")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiler for the lune language", long_about = None)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Print the token stream
    #[arg(long)]
    emit_tokens: bool,

    /// Print the parsed tree (the default when no emit flag is given)
    #[arg(long)]
    emit_ast: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        input: cli.input,
        emit_tokens: cli.emit_tokens,
        emit_ast: cli.emit_ast,
    };

    match lunec_drv::run(&config) {
        Ok(output) => {
            if !output.is_empty() {
                print!("{output}");
                if !output.ends_with('\n') {
                    println!();
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.render());
            ExitCode::FAILURE
        }
    }
}
