use std::{fs, process::ExitCode};

use clap::Parser;
use snx::{
    ast::BlockStyle,
    evaluate,
    interpreter::{
        engine::{config::Config, host::StdHost},
        value::core::Value,
    },
    run_source,
};

/// snx runs line-oriented scripts with variables, functions, conditionals and
/// jumps.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    #[arg(default_value = "script.snx")]
    script: String,

    /// Block style in effect until the script selects one with `STYLE`.
    #[arg(long, default_value = "end", value_parser = parse_style)]
    style: BlockStyle,

    /// Print a banner when the script stops at `END`.
    #[arg(long)]
    announce_end: bool,

    /// Evaluate one expression and print its value instead of running a
    /// script.
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,
}

fn parse_style(name: &str) -> Result<BlockStyle, String> {
    BlockStyle::from_name(name)
        .ok_or_else(|| format!("unknown block style '{name}' (expected 'end' or 'brackets')"))
}

/// Installs a log subscriber on stderr when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    if let Some(expr) = args.eval {
        return match evaluate(&expr) {
            Value::Error(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            },
            value => {
                println!("{value}");
                ExitCode::SUCCESS
            },
        };
    }

    let Ok(source) = fs::read_to_string(&args.script) else {
        eprintln!("Failed to read the script file '{}'. Perhaps this file does not exist?",
                  &args.script);
        return ExitCode::FAILURE;
    };

    let config = Config { style:        args.style,
                          announce_end: args.announce_end, };

    match run_source(&source, config, &mut StdHost) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}
