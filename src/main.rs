use std::io::stdout;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;
use color_eyre::Result;
use statline::app::{App, RunOutcome};
use statline::cli::Cli;
use statline::config::{Config, Settings, load_config, load_config_from_path};
use statline::event::SignalHandler;
use statline::interrupt::{Control, InterruptController};
use statline::system::provider::{LiveProvider, StatProvider};
use statline::ui::banner::write_banner;
use tokio::io::BufReader;
use tokio::sync::watch;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!(error = %e, "rejected command line");
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = load_config_for_cli(&cli);
    let settings = match Settings::resolve(&cli, &config) {
        Ok(settings) => settings,
        Err(e) => {
            debug!(error = %e, "rejected command line");
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(?settings, "resolved settings");

    let (control_tx, control_rx) = watch::channel(Control::default());
    let signals = SignalHandler::new()?;
    tokio::spawn(InterruptController::new().run(
        signals,
        BufReader::new(tokio::io::stdin()),
        stdout(),
        control_tx,
    ));

    let provider = Arc::new(LiveProvider);
    let mut app = App::new(Arc::clone(&provider), settings, stdout(), control_rx);

    match app.run().await? {
        // Collector threads may still be blocked on a read; do not wait for them.
        RunOutcome::Interrupted => std::process::exit(0),
        RunOutcome::Completed => {}
    }

    write_banner(&mut stdout().lock(), &provider.banner())?;
    // An interrupted confirmation can leave a blocking stdin read behind, and
    // runtime shutdown would wait on it.
    std::process::exit(0)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config_for_cli(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}
