//! Headless proximity map driver.
//!
//! Loads configuration and the base dataset, then applies one map command per
//! stdin line and prints the resulting notices and layers.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use proximity_map::config::AppConfig;
use proximity_map::console::{self, ConsoleCommand, HELP};
use proximity_map::dataset::{BaseDataset, DatasetSource};
use proximity_map::interaction::MapInteraction;
use proximity_map::proximity::HttpTransport;
use proximity_map::ProximityApp;

fn main() {
    if let Err(e) = run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load_from(&PathBuf::from(path))?,
        None => AppConfig::load_from_default_path().unwrap_or_default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let dataset = BaseDataset::new(
        DatasetSource::parse(&config.base_dataset),
        config.request_timeout(),
    );
    log::info!("Loading base dataset from {}", dataset.source());
    let base = dataset.get_or_load()?;
    let transport = HttpTransport::new(&config.proximity_endpoint, config.request_timeout())?;
    log::info!("Proximity queries go to {}", transport.endpoint());

    let mut app = ProximityApp::new(base, Arc::new(transport));
    let interaction = MapInteraction::new(config.default_radius_km);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", console::describe_layers(&app.active_layers()))?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match console::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        match command {
            ConsoleCommand::Map(event) => {
                if let Some(msg) = interaction.translate(event) {
                    app.update(msg);
                }
            }
            ConsoleCommand::App(messages) => {
                for msg in messages {
                    app.update(msg);
                }
            }
            ConsoleCommand::Layers => {
                writeln!(stdout, "{}", console::describe_layers(&app.active_layers()))?;
                continue;
            }
            ConsoleCommand::Help => {
                writeln!(stdout, "{}", HELP)?;
                continue;
            }
            ConsoleCommand::Quit => break,
        }

        // No event loop here, so wait for the work the command started.
        app.settle(config.request_timeout());
        for notice in app.take_notices() {
            writeln!(stdout, "{}", notice)?;
        }
        let layers = app.active_layers();
        writeln!(
            stdout,
            "primary: {} ({} points){}",
            layers.primary.kind().name(),
            layers.primary.len(),
            if layers.overlay.is_some() { " + overlay" } else { "" }
        )?;
    }

    Ok(())
}
