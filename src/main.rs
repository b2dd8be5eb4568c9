use std::{fs, process::ExitCode};

use autoscript::{
    interpreter::{runner::Interpreter, script::Script, storage::methods::Registry},
    sim::Drivetrain,
};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// autoscript runs autonomous-mode robot routines against a simulated
/// drivetrain.
///
/// Failed statements are logged as warnings and skipped. Set `RUST_LOG` for
/// more detail, e.g. `RUST_LOG=autoscript=debug`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells autoscript to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Number of independent runs. Variables are cleared before each one.
    #[arg(short, long, default_value_t = 1)]
    repeat: u32,

    /// Run with the built-in methods only.
    #[arg(long)]
    no_sim: bool,

    /// Exit with a failure status if any statement failed.
    #[arg(long)]
    strict: bool,

    contents: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let source = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let drivetrain = Drivetrain::new();
    let registry = match build_registry(&drivetrain, args.no_sim) {
        Ok(registry) => registry,
        Err(e) => {
            error!(error = %e, "method registration failed");
            return ExitCode::FAILURE;
        },
    };

    debug!(void = ?registry.methods().names(),
           returning = ?registry.returning_methods().names(),
           "registry ready");

    let script = Script::parse(&source);
    let mut interpreter = Interpreter::new(registry);
    let mut failed = 0;

    for run in 1..=args.repeat {
        let report = interpreter.run_script(&script);
        info!(run, failures = report.failures.len(), "run complete");
        failed += report.failures.len();
    }

    for (name, value) in interpreter.variables().iter() {
        debug!(name, %value, "final variable");
    }

    if !args.no_sim {
        let (left, right) = drivetrain.outputs();
        info!(shots = drivetrain.shots(), left, right, "drivetrain state");
    }

    if args.strict && failed > 0 {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn build_registry(drivetrain: &Drivetrain,
                  no_sim: bool)
                  -> Result<Registry, autoscript::error::RegistrationError> {
    let mut registry = Registry::with_builtins()?;
    if !no_sim {
        drivetrain.register(&mut registry)?;
    }
    Ok(registry)
}
