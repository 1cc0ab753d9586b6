//! Map interaction adapter.
//!
//! Translates raw events from the map surface (clicks, the radius text field,
//! popup buttons) into controller messages. A click only creates a candidate
//! query; nothing is submitted until the user asks for it.

use crate::constants::DEFAULT_RADIUS_KM;
use crate::message::{Message, ProximityMessage};
use crate::model::{Coordinate, ProximityQuery};

/// A raw event from the map surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The map was clicked at this position
    Click {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
    },
    /// The radius field of the popup changed to this text
    RadiusInput(String),
    /// The popup's submit button was pressed
    SubmitPressed,
    /// The popup was closed
    DismissPressed,
}

/// Turns map events into messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapInteraction {
    default_radius_km: f64,
}

impl MapInteraction {
    /// Create an adapter whose clicks start with `default_radius_km`.
    ///
    /// A non-positive default falls back to 5 km.
    pub fn new(default_radius_km: f64) -> Self {
        Self {
            default_radius_km: parse_radius_value(default_radius_km, DEFAULT_RADIUS_KM),
        }
    }

    /// Radius given to new candidate queries.
    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// Translate an event. Clicks outside valid coordinates produce nothing.
    pub fn translate(&self, event: MapEvent) -> Option<Message> {
        let msg = match event {
            MapEvent::Click {
                latitude,
                longitude,
            } => {
                if !Coordinate::new(longitude, latitude).is_valid() {
                    log::warn!("Ignoring click outside the map: ({}, {})", latitude, longitude);
                    return None;
                }
                let query =
                    ProximityQuery::at(latitude, longitude).with_radius(self.default_radius_km);
                ProximityMessage::PointSelected(query)
            }
            MapEvent::RadiusInput(text) => {
                ProximityMessage::RadiusChanged(parse_radius(&text, self.default_radius_km))
            }
            MapEvent::SubmitPressed => ProximityMessage::Submit,
            MapEvent::DismissPressed => ProximityMessage::Dismiss,
        };
        Some(msg.into())
    }
}

impl Default for MapInteraction {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM)
    }
}

/// Parse radius field text. Empty, non-numeric, non-finite or non-positive
/// input becomes `default_km`.
pub fn parse_radius(text: &str, default_km: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) => parse_radius_value(value, default_km),
        Err(_) => {
            if !text.trim().is_empty() {
                log::debug!("Radius '{}' is not a number, using {} km", text, default_km);
            }
            default_km
        }
    }
}

fn parse_radius_value(value: f64, default_km: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default_km
    }
}
