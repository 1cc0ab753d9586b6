//! Proximity map application controller.
//!
//! Owns the view state, the proximity client and the overlay loader, and is
//! the single place where messages are applied. Background work (proximity
//! requests, overlay validation) is started by the handlers and collected by
//! [`ProximityApp::tick`], which the host calls once per frame or after each
//! input.

use std::sync::Arc;
use std::time::Duration;

use crate::format::ValidationError;
use crate::handlers::{handle_filter, handle_proximity, handle_upload};
use crate::message::Message;
use crate::model::PointCollection;
use crate::notice::Notice;
use crate::proximity::{ProximityClient, ProximityTransport, QueryOutcome, QueryState};
use crate::state::{ActiveLayers, OverlayLoader, ViewState};

/// The map page: state plus its background workers.
#[derive(Debug)]
pub struct ProximityApp {
    /// Explicit view state
    view: ViewState,
    /// Proximity request lifecycle
    client: ProximityClient,
    /// Overlay file selection and validation
    loader: OverlayLoader,
    /// Notices not yet shown to the user
    notices: Vec<Notice>,
}

impl ProximityApp {
    /// Create the app in its default view over `base`.
    pub fn new(base: Arc<PointCollection>, transport: Arc<dyn ProximityTransport>) -> Self {
        log::info!("Proximity map ready with {} base points", base.len());
        Self {
            view: ViewState::new(base),
            client: ProximityClient::new(transport),
            loader: OverlayLoader::new(),
            notices: Vec::new(),
        }
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Layers the rendering surface should draw.
    pub fn active_layers(&self) -> ActiveLayers<'_> {
        self.view.active_layers()
    }

    /// Lifecycle state of the proximity query.
    pub fn query_state(&self) -> &QueryState {
        self.client.state()
    }

    /// Whether the popup's submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.view.selection().is_some() && self.client.can_submit()
    }

    /// Whether the upload button is enabled.
    pub fn can_upload(&self) -> bool {
        self.loader.can_upload()
    }

    /// Whether any background work is outstanding.
    pub fn is_busy(&self) -> bool {
        self.client.is_pending() || self.loader.is_processing()
    }

    /// Drain the notices produced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Apply a message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Filter(msg) => handle_filter(msg, &mut self.view, &mut self.notices),
            Message::Proximity(msg) => {
                handle_proximity(msg, &mut self.view, &mut self.client, &mut self.notices)
            }
            Message::Upload(msg) => {
                handle_upload(msg, &mut self.view, &mut self.loader, &mut self.notices)
            }
            Message::ResetToDefault => self.reset(),
        }
    }

    /// Collect finished background work without blocking. Returns `true`
    /// when the view changed or a notice was produced.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        if let Some(outcome) = self.client.poll() {
            self.apply_query(outcome);
            changed = true;
        }
        if let Some(result) = self.loader.poll() {
            self.apply_upload(result);
            changed = true;
        }
        changed
    }

    /// Block until outstanding background work finishes, waiting at most
    /// `timeout` for each job.
    pub fn settle(&mut self, timeout: Duration) {
        if let Some(outcome) = self.client.wait(timeout) {
            self.apply_query(outcome);
        }
        if let Some(result) = self.loader.wait(timeout) {
            self.apply_upload(result);
        }
    }

    fn reset(&mut self) {
        self.client.reset();
        self.loader.cancel();
        self.view.reset();
        log::info!("Map reset to default view");
    }

    fn apply_query(&mut self, outcome: QueryOutcome) {
        match outcome {
            QueryOutcome::Fulfilled(results) => {
                self.notices.push(Notice::query_results(results.len()));
                self.view.set_proximity_results(results);
            }
            QueryOutcome::Failed(error) => {
                self.notices.push(Notice::error(error));
            }
        }
    }

    fn apply_upload(&mut self, result: Result<PointCollection, ValidationError>) {
        match result {
            Ok(overlay) => {
                log::info!("Overlay uploaded with {} points", overlay.len());
                self.view.set_overlay(overlay);
                self.notices.push(Notice::upload_succeeded());
            }
            Err(e) => {
                log::warn!("Overlay rejected: {}", e);
                self.notices.push(Notice::rejected(e));
            }
        }
    }
}
