mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_context, run_detect, run_generate, run_watch};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Generate {
            input,
            format,
            output,
            no_animations,
            disable,
            threshold,
        } => {
            run_generate(
                &raw_args,
                args.config,
                args.verbose,
                input,
                format,
                output,
                no_animations,
                disable,
                threshold,
            )
            .await
        }
        Commands::Context {
            input,
            format,
            output,
        } => run_context(args.config, args.verbose, input, format, output).await,
        Commands::Detect {
            input,
            format,
            output,
            threshold,
            animations,
        } => {
            run_detect(
                &raw_args,
                args.config,
                args.verbose,
                input,
                format,
                output,
                threshold,
                animations,
            )
            .await
        }
        Commands::Watch {
            debounce_ms,
            no_animations,
        } => run_watch(&raw_args, args.config, args.verbose, debounce_ms, no_animations).await,
    }
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "d2c_lib=debug,d2c=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
