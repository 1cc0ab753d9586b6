//! Application message types.
//!
//! Every user action on the map page is represented as a message in the Elm
//! architecture style. The controller consumes them in
//! [`ProximityApp::update`](crate::app::ProximityApp::update).

use std::path::PathBuf;

use crate::model::{FilterCategory, ProximityQuery};

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Attribute filter panel
    Filter(FilterMessage),
    /// Map click popup and proximity search
    Proximity(ProximityMessage),
    /// Overlay upload panel
    Upload(UploadMessage),
    /// "Reset Map": back to the base layer with nothing selected
    ResetToDefault,
}

/// Attribute filter messages.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterMessage {
    /// Category dropdown changed (`None` is the empty choice)
    SelectCategory(Option<FilterCategory>),
    /// Value dropdown changed
    SelectValue(String),
    /// "Run Filter" pressed
    Run,
    /// "Clear Filter" pressed
    Clear,
}

/// Proximity search messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ProximityMessage {
    /// The map was clicked; carries the new candidate query
    PointSelected(ProximityQuery),
    /// Radius field edited (already coerced to a positive value)
    RadiusChanged(f64),
    /// "Submit Query" pressed
    Submit,
    /// Popup closed
    Dismiss,
}

/// Overlay upload messages.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadMessage {
    /// A file was chosen in the file picker
    FileSelected(PathBuf),
    /// "Upload GeoJSON" pressed
    Upload,
    /// Upload panel closed: forget the chosen file
    ClearSelection,
    /// Remove the uploaded overlay
    ClearOverlay,
}

impl From<FilterMessage> for Message {
    fn from(msg: FilterMessage) -> Self {
        Message::Filter(msg)
    }
}

impl From<ProximityMessage> for Message {
    fn from(msg: ProximityMessage) -> Self {
        Message::Proximity(msg)
    }
}

impl From<UploadMessage> for Message {
    fn from(msg: UploadMessage) -> Self {
        Message::Upload(msg)
    }
}
