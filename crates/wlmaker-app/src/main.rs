mod cli;
mod replay;
mod runner;

use std::process::ExitCode;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use wlmaker_common::WlmakerError;
use wlmaker_config::WlmakerConfig;

fn main() -> ExitCode {
    let args = cli::parse();

    // Load before logging is up so the config level can apply; report after.
    let loaded = wlmaker_config::load_config(args.config.as_deref());
    let config_level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();

    let log_directive = args
        .log_level
        .as_deref()
        .unwrap_or_else(|| config_level.directive());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("wlmaker v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            tracing::error!("Config load failed: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            WlmakerConfig::default()
        }
    };
    tracing::info!(
        workspaces = config.workspaces.names.len(),
        launchers = config.dock.launchers.len(),
        "Config loaded"
    );

    if args.print_config {
        println!("{}", wlmaker_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    match run(config, &args) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("wlmaker failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: WlmakerConfig, args: &cli::Args) -> Result<(), WlmakerError> {
    let script = args
        .replay
        .as_deref()
        .map(replay::load_script)
        .transpose()?;
    let session = runner::Session::new(config, &args.outputs)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(runner::run(session, script))
}
