//! Message handlers for the proximity map.
//!
//! Each handler processes one category of messages, keeping
//! [`ProximityApp::update`](crate::app::ProximityApp::update) small. Handlers
//! only start background work; results are applied when the app polls.

use crate::message::{FilterMessage, ProximityMessage, UploadMessage};
use crate::notice::Notice;
use crate::proximity::{ProximityClient, QueryError};
use crate::state::{OverlayLoader, ViewState};

/// Handle attribute filter messages.
pub fn handle_filter(msg: FilterMessage, view: &mut ViewState, notices: &mut Vec<Notice>) {
    match msg {
        FilterMessage::SelectCategory(category) => {
            log::debug!("Filter category: {:?}", category);
            view.select_category(category);
        }
        FilterMessage::SelectValue(value) => {
            if let Err(e) = view.select_value(&value) {
                log::warn!("Filter value rejected: {}", e);
                notices.push(Notice::error(e));
            }
        }
        FilterMessage::Run => match view.run_filter() {
            Some(count) => {
                log::info!("Filter applied: {} features", count);
                notices.push(Notice::filter_applied(count));
            }
            None => {
                log::debug!("Run Filter ignored: selection incomplete");
            }
        },
        FilterMessage::Clear => {
            view.clear_filter();
            log::debug!("Filter cleared");
        }
    }
}

/// Handle proximity search messages.
pub fn handle_proximity(
    msg: ProximityMessage,
    view: &mut ViewState,
    client: &mut ProximityClient,
    notices: &mut Vec<Notice>,
) {
    match msg {
        ProximityMessage::PointSelected(query) => {
            // A new candidate point supersedes whatever was in flight.
            client.reset();
            view.select_point(query);
        }
        ProximityMessage::RadiusChanged(radius_km) => {
            if !view.set_radius(radius_km) {
                log::debug!("Radius change ignored: no point selected");
            }
        }
        ProximityMessage::Submit => {
            let Some(query) = view.selection().copied() else {
                notices.push(Notice::error(QueryError::NoSelection));
                return;
            };
            match client.submit(query) {
                Ok(_) => {}
                Err(QueryError::Busy) => {
                    log::debug!("Submit ignored: query already pending");
                }
                Err(e) => notices.push(Notice::error(e)),
            }
        }
        ProximityMessage::Dismiss => {
            client.reset();
            view.dismiss();
            log::debug!("Proximity popup dismissed");
        }
    }
}

/// Handle overlay upload messages.
pub fn handle_upload(
    msg: UploadMessage,
    view: &mut ViewState,
    loader: &mut OverlayLoader,
    notices: &mut Vec<Notice>,
) {
    match msg {
        UploadMessage::FileSelected(path) => {
            if let Err(e) = loader.select_file(path) {
                notices.push(Notice::rejected(e));
            }
        }
        UploadMessage::Upload => {
            if loader.selected().is_none() {
                notices.push(Notice::info("Select a .geojson file first."));
                return;
            }
            match loader.begin() {
                Ok(Some(_)) => log::debug!("Upload started"),
                Ok(None) => log::debug!("Upload ignored: already processing"),
                Err(e) => notices.push(Notice::rejected(e)),
            }
        }
        UploadMessage::ClearSelection => {
            loader.clear_selection();
            log::debug!("Upload file selection cleared");
        }
        UploadMessage::ClearOverlay => {
            view.clear_overlay();
            log::debug!("Overlay cleared");
        }
    }
}
