use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use stackwrap_core::config::{self, StackConfig};
use stackwrap_core::{annotate, parse_panic, prefix, AnnotatedError, Message, ResultExt};
use stackwrap_utils::{debug, info, init_logging, init_logging_with_level, LogFormat, LogLevel};

/// Parse panic dumps and inspect stack-annotated errors.
#[derive(Parser, Debug)]
#[command(name = "stackwrap")]
#[command(version)]
#[command(about = "Parse panic dumps and inspect stack-annotated errors", long_about = None)]
struct Cli
{
    /// Maximum number of frames captured per stack
    #[arg(long, global = true)]
    max_stack_depth: Option<usize>,

    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Parse a panic dump and print its message and frames
    Parse
    {
        /// File holding the dump (reads stdin when omitted)
        input: Option<PathBuf>,
        /// Print only the rendered frames
        #[arg(long, default_value_t = false)]
        frames_only: bool,
    },
    /// Annotate a message here and print its trace
    Capture
    {
        /// Message of the error to create
        message: String,
        /// Prefix to apply, outermost last (repeatable)
        #[arg(long = "prefix")]
        prefixes: Vec<String>,
    },
}

fn main()
{
    let cli = Cli::parse();

    let logging = match cli.log_level {
        Some(level) => init_logging_with_level(level, LogFormat::Pretty),
        None => init_logging(),
    };
    let guard = match logging {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    let code = match run_command(cli) {
        Ok(()) => 0,
        Err(e) => {
            debug!("command failed\n{}", e.error_stack());
            eprintln!("Error: {e}");
            1
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(code);
}

fn run_command(cli: Cli) -> Result<(), AnnotatedError>
{
    if let Some(depth) = cli.max_stack_depth {
        config::init(StackConfig::default().with_max_stack_depth(depth)).prefix("--max-stack-depth")?;
    }

    match cli.command {
        Commands::Parse { input, frames_only } => {
            let text = read_input(input.as_ref())?;
            let err = parse_panic(&text).annotate()?;
            info!(frames = err.stack_frames().len(), "parsed panic dump");

            if frames_only {
                print!("{}", err.stack());
            } else {
                print!("{}", err.error_stack());
            }
            Ok(())
        }
        Commands::Capture { message, prefixes } => {
            let err = capture(message, &prefixes);
            print!("{}", err.error_stack());
            Ok(())
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String, AnnotatedError>
{
    match input {
        Some(path) => fs::read_to_string(path).prefix(&format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).prefix("reading stdin")?;
            Ok(text)
        }
    }
}

#[inline(never)]
fn capture(message: String, prefixes: &[String]) -> AnnotatedError
{
    prefixes
        .iter()
        .fold(annotate(Message::new(message)), |err, outer| prefix(outer, err))
}
