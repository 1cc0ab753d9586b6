//! Overlay upload: file selection plus background read and validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::format::{self, ValidationError};
use crate::model::PointCollection;
use crate::task::{TaskSlot, TaskToken};

/// Tracks the selected overlay file and the in-progress validation.
#[derive(Debug)]
pub struct OverlayLoader {
    /// File chosen in the upload pane (already extension-checked)
    selected: Option<PathBuf>,
    /// Background read + validate job
    slot: TaskSlot<Result<PointCollection, ValidationError>>,
}

impl OverlayLoader {
    /// Create a loader with nothing selected.
    pub fn new() -> Self {
        Self {
            selected: None,
            slot: TaskSlot::new("overlay-upload"),
        }
    }

    /// Selected file, if any.
    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Whether a file is being read and validated.
    pub fn is_processing(&self) -> bool {
        self.slot.is_pending()
    }

    /// Whether the upload action should be enabled.
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.is_processing()
    }

    /// Choose a file. A name without the `.geojson` extension is rejected
    /// immediately and clears the selection.
    pub fn select_file(&mut self, path: PathBuf) -> Result<(), ValidationError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match format::check_file_name(&name) {
            Ok(()) => {
                log::debug!("Selected overlay file {:?}", path);
                self.selected = Some(path);
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected overlay file {:?}: {}", path, e);
                self.selected = None;
                Err(e)
            }
        }
    }

    /// Forget the selected file.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Start reading and validating the selected file.
    ///
    /// Returns `Ok(None)` when there is nothing to do: no file selected, or a
    /// validation already in progress.
    pub fn begin(&mut self) -> Result<Option<TaskToken>, ValidationError> {
        if self.is_processing() {
            log::warn!("Ignoring upload while another file is being processed");
            return Ok(None);
        }
        let Some(path) = self.selected.clone() else {
            return Ok(None);
        };

        let token = self
            .slot
            .spawn(move || format::read_and_validate(&path))?;
        Ok(Some(token))
    }

    /// Take the validation result if it has arrived. Non-blocking.
    pub fn poll(&mut self) -> Option<Result<PointCollection, ValidationError>> {
        self.slot.poll()
    }

    /// Block until the validation result arrives or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<PointCollection, ValidationError>> {
        self.slot.wait(timeout)
    }

    /// Discard any in-progress validation.
    pub fn cancel(&mut self) {
        self.slot.invalidate();
    }
}

impl Default for OverlayLoader {
    fn default() -> Self {
        Self::new()
    }
}
