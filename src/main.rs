// Entrypoint for the CLI application.
// Keeps `main` small: read config, build the API client and hand it to the
// interactive session, which blocks until the operator exits.

use anyhow::Context;
use shortener_cli::{api::ApiClient, config::Config, console::TerminalConsole, logging, ui};

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let config = Config::from_env();
    let api = ApiClient::new(&config).context("Failed to set up the backend client")?;
    tracing::debug!(base_url = %api.base_url(), "backend configured");

    let mut console = TerminalConsole::new();
    ui::run(&api, &mut console, &config.short_host).context("Interactive session ended")?;
    Ok(())
}
