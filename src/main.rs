use nofp::cli::{handle_run, resolve_config, CliArgs};
use nofp::util::{init_logging, LoggingConfig};
use nofp::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = resolve_config(&args);

    init_logging(LoggingConfig::resolve(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        &config,
    ));

    debug!("nofp v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_run(&args, &config).await;

    std::process::exit(exit_code);
}
