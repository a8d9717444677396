use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use cshs::{Value, interpreter::evaluator::core::Context, parse_source, repl::Repl, run_source};

/// cshs runs programs written in C##, a small C#-flavoured teaching language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log filter such as `debug` or `cshs=trace`. Overrides `RUST_LOG`.
    /// Logs go to standard error.
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a program and exits with the integer returned by `Main`.
    Run {
        /// Path to a `.c##` source file.
        file: PathBuf,
    },
    /// Prints the parsed syntax tree of a program.
    Ast {
        /// Path to a `.c##` source file.
        file: PathBuf,
    },
    /// Starts an interactive session.
    Repl,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    match args.command {
        Command::Run { file } => {
            let Some(source) = read_source(&file) else {
                return ExitCode::FAILURE;
            };
            match run_source(&source) {
                Ok(Value::Int(code)) => exit_code(code),
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                },
            }
        },
        Command::Ast { file } => {
            let Some(source) = read_source(&file) else {
                return ExitCode::FAILURE;
            };
            match parse_source(&source) {
                Ok(program) => {
                    println!("{program:#?}");
                    ExitCode::SUCCESS
                },
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                },
            }
        },
        Command::Repl => match Repl::new(Context::new()).run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Console failure: {e}");
                ExitCode::FAILURE
            },
        },
    }
}

fn read_source(file: &Path) -> Option<String> {
    fs::read_to_string(file).map_err(|e| {
                                eprintln!("Failed to read the input file '{}': {e}",
                                          file.display());
                            })
                            .ok()
}

/// Maps `Main`'s result onto a process exit status, keeping the low byte as
/// the shell does.
fn exit_code(code: i64) -> ExitCode {
    u8::try_from(code.rem_euclid(256)).map_or(ExitCode::FAILURE, ExitCode::from)
}

/// Installs a stderr log subscriber when `--log` or `RUST_LOG` asks for one.
fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        None => return,
    };

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                    .with_target(true)
                                                    .with_level(true))
                                  .with(filter)
                                  .init();
}
