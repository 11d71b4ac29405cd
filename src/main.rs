//! Bassinet Buttons - physical controls for a cloud-controlled bassinet.
//!
//! Reads button presses on a Raspberry Pi's GPIO pins and forwards the
//! bound command to the bassinet vendor's HTTP API, with an LED lit while
//! a command is in flight. Meant to run in the foreground forever,
//! started at boot.

mod api;
mod auth;
mod config;
mod dispatch;
mod hw;

use std::path::Path;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::DeviceClient;
use auth::Credentials;
use config::Config;
use dispatch::{Action, ButtonController};
use hw::{GpioButton, GpioLed};

/// Initialize the tracing subscriber, writing to a daily-rolling file.
/// The returned guard must stay alive or buffered log lines are lost.
fn init_tracing(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(log_dir, "bassinet-buttons.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Configuration errors are fatal before anything else happens.
    let config = Config::from_env()?;

    let _guard = init_tracing(&config.log_dir);
    info!("Bassinet buttons starting");

    // One-shot login. Credentials are dropped as soon as the token exists;
    // a failure here must not leave any button handler registered.
    let credentials = Credentials::load(&config.credentials_path)?;
    let client = DeviceClient::new(config.api_base_url.clone())?;
    let session = client
        .authenticate(&credentials.username, &credentials.password)
        .await
        .context("Login failed")?;
    drop(credentials);
    info!(username = %session.username, created_at = %session.created_at, "Authenticated");

    let client = client.with_token(session.token.clone());

    let led = GpioLed::new(config.lock_led_pin)?;

    let bindings: Vec<(Action, Box<dyn hw::PressInput>)> = vec![
        (
            Action::Toggle,
            Box::new(GpioButton::new(config.toggle_button_pin)?),
        ),
        (
            Action::UpLevel,
            Box::new(GpioButton::new(config.up_button_pin)?),
        ),
        (
            Action::DownLevel,
            Box::new(GpioButton::new(config.down_button_pin)?),
        ),
        (
            Action::Lock,
            Box::new(GpioButton::new(config.lock_button_pin)?),
        ),
    ];

    let (tx, rx) = mpsc::unbounded_channel();
    let _controller = ButtonController::register(bindings, tx)?;
    info!("Button handlers registered, waiting for presses");

    // Blocks for the life of the process, dispatching on button presses.
    dispatch::run(rx, client, Box::new(led)).await;

    Ok(())
}
