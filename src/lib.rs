//! Proximity map
//!
//! Client-side data layer orchestration for a schools map: GeoJSON
//! validation, attribute filtering, proximity queries against a remote
//! search service, and the compositor deciding which layers are drawn.
//!
//! The rendering surface is not part of this crate. It feeds user actions in
//! as [`Message`]s (or raw [`interaction::MapEvent`]s), calls
//! [`ProximityApp::tick`] to collect background results, and draws
//! [`ProximityApp::active_layers`].

pub mod app;
pub mod config;
pub mod console;
pub mod constants;
pub mod dataset;
pub mod filter;
pub mod format;
pub mod handlers;
pub mod interaction;
pub mod message;
pub mod model;
pub mod notice;
pub mod proximity;
pub mod state;
pub mod task;

pub use app::ProximityApp;
pub use message::Message;
pub use notice::{Notice, NoticeLevel};
