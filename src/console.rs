//! Line commands for the headless driver.
//!
//! The binary stands in for the map surface: each stdin line is one user
//! action, parsed here into map events or controller messages.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

use crate::interaction::MapEvent;
use crate::message::{FilterMessage, Message, UploadMessage};
use crate::model::{FilterCategory, FilterError};
use crate::state::{ActiveLayers, PrimaryLayer};

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  click <lat> <lng>        select a point on the map
  radius <km>              edit the search radius of the selected point
  submit                   run the proximity query for the selected point
  dismiss                  close the point popup
  category <LEVEL|STATUS>  choose a filter category (no argument clears it)
  value <value>            choose a filter value
  filter                   run the filter
  clear-filter             clear the filter
  upload [path]            select a .geojson file (if given) and upload it
  clear-file               forget the selected upload file
  clear-overlay            remove the uploaded overlay
  reset                    reset the map
  layers                   show the active layers
  help                     show this text
  quit                     exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// A raw map event for the interaction adapter
    Map(MapEvent),
    /// Messages applied to the app in order
    App(Vec<Message>),
    /// Print the active layers
    Layers,
    /// Print usage
    Help,
    /// Exit the driver
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unrecognized command word
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// A required argument is absent
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        /// Command word
        command: &'static str,
        /// Description of the missing argument
        argument: &'static str,
    },

    /// An argument could not be parsed
    #[error("Invalid {argument} '{value}'")]
    InvalidArgument {
        /// Description of the argument
        argument: &'static str,
        /// The text given
        value: String,
    },

    /// Unknown filter category
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => return Ok(None),
        "click" => {
            let mut args = rest.split_whitespace();
            let latitude = coordinate_arg(args.next(), "latitude")?;
            let longitude = coordinate_arg(args.next(), "longitude")?;
            ConsoleCommand::Map(MapEvent::Click {
                latitude,
                longitude,
            })
        }
        // Coercion of bad radius text happens in the interaction adapter.
        "radius" => ConsoleCommand::Map(MapEvent::RadiusInput(rest.to_string())),
        "submit" => ConsoleCommand::Map(MapEvent::SubmitPressed),
        "dismiss" => ConsoleCommand::Map(MapEvent::DismissPressed),
        "category" => {
            let category = if rest.is_empty() {
                None
            } else {
                Some(rest.to_uppercase().parse::<FilterCategory>()?)
            };
            single(FilterMessage::SelectCategory(category))
        }
        "value" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "value",
                    argument: "a filter value",
                });
            }
            single(FilterMessage::SelectValue(rest.to_string()))
        }
        "filter" => single(FilterMessage::Run),
        "clear-filter" => single(FilterMessage::Clear),
        "upload" => {
            let mut messages = Vec::with_capacity(2);
            if !rest.is_empty() {
                messages.push(UploadMessage::FileSelected(PathBuf::from(rest)).into());
            }
            messages.push(UploadMessage::Upload.into());
            ConsoleCommand::App(messages)
        }
        "clear-file" => single(UploadMessage::ClearSelection),
        "clear-overlay" => single(UploadMessage::ClearOverlay),
        "reset" => ConsoleCommand::App(vec![Message::ResetToDefault]),
        "layers" => ConsoleCommand::Layers,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn single(msg: impl Into<Message>) -> ConsoleCommand {
    ConsoleCommand::App(vec![msg.into()])
}

fn coordinate_arg(arg: Option<&str>, argument: &'static str) -> Result<f64, CommandError> {
    let text = arg.ok_or(CommandError::MissingArgument {
        command: "click",
        argument,
    })?;
    text.parse().map_err(|_| CommandError::InvalidArgument {
        argument,
        value: text.to_string(),
    })
}

/// Human-readable summary of the active layers.
pub fn describe_layers(layers: &ActiveLayers<'_>) -> String {
    let mut out = String::new();

    match layers.overlay {
        Some(overlay) => {
            let _ = writeln!(out, "overlay: {} points", overlay.len());
        }
        None => out.push_str("overlay: none\n"),
    }

    let _ = write!(
        out,
        "primary: {} ({} points)",
        layers.primary.kind().name(),
        layers.primary.len()
    );
    if let PrimaryLayer::Proximity(results) = layers.primary {
        let query = results.query();
        let _ = write!(
            out,
            " within {} km of ({}, {})",
            query.radius_km(),
            query.latitude,
            query.longitude
        );
    }

    // The primary layer is always drawn last.
    let rendered = layers.render();
    if let Some(layer) = rendered.last() {
        for point in layer.points.iter().take(10) {
            let label = point
                .popup
                .first()
                .map(|row| row.value.as_str())
                .unwrap_or("");
            let _ = write!(
                out,
                "\n  ({:.5}, {:.5}) {}",
                point.coordinate.latitude, point.coordinate.longitude, label
            );
        }
        if layer.points.len() > 10 {
            let _ = write!(out, "\n  ... {} more", layer.points.len() - 10);
        }
    }

    out
}
