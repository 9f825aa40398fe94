use log::{error, info, LevelFilter};
use std::error::Error;

mod app;
mod config;
mod core;
mod game;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Logging Setup ---
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info) // Default level
        .filter_module("railbeat::game::spawn", LevelFilter::Debug) // Decoded chart rows
        .filter_module("railbeat::app", LevelFilter::Info)
        .init();

    info!("Application starting...");

    if let Err(e) = app::run() {
        error!("Application exited with error: {}", e);
        return Err(e);
    }

    info!("Application exited gracefully.");
    Ok(())
}
