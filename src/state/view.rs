//! The single explicit view state and its transitions.
//!
//! Every piece of mutable session state lives here: filter selection and its
//! output, the clicked candidate query, proximity results and the user
//! overlay. The base dataset is shared and never mutated. Transitions are the
//! only way to change the state, so clearing always happens as a unit.

use std::sync::Arc;

use crate::filter;
use crate::model::{
    FilterCategory, FilterError, FilterSelection, PointCollection, ProximityQuery,
    ProximityResultSet,
};
use crate::state::layers::{ActiveLayers, active_layers};

/// Session state from which the renderable layer set is derived.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Base dataset, loaded once at startup
    base: Arc<PointCollection>,
    /// Current filter dropdown values
    filter: FilterSelection,
    /// Output of the last "Run Filter" for the current selection
    filtered: Option<PointCollection>,
    /// Candidate query created by the last map click
    selection: Option<ProximityQuery>,
    /// Results of the last fulfilled query
    proximity: Option<ProximityResultSet>,
    /// User-uploaded overlay
    overlay: Option<PointCollection>,
}

impl ViewState {
    /// Create the default view over `base`.
    pub fn new(base: Arc<PointCollection>) -> Self {
        Self {
            base,
            filter: FilterSelection::new(),
            filtered: None,
            selection: None,
            proximity: None,
            overlay: None,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Base dataset.
    pub fn base(&self) -> &PointCollection {
        &self.base
    }

    /// Filter dropdown state.
    pub fn filter_selection(&self) -> &FilterSelection {
        &self.filter
    }

    /// Filtered collection, if "Run Filter" has produced one.
    pub fn filtered(&self) -> Option<&PointCollection> {
        self.filtered.as_ref()
    }

    /// Candidate query of the open click popup.
    pub fn selection(&self) -> Option<&ProximityQuery> {
        self.selection.as_ref()
    }

    /// Proximity results, if a query has resolved and not been cleared.
    pub fn proximity_results(&self) -> Option<&ProximityResultSet> {
        self.proximity.as_ref()
    }

    /// User overlay.
    pub fn overlay(&self) -> Option<&PointCollection> {
        self.overlay.as_ref()
    }

    /// Layers to render for the current state.
    pub fn active_layers(&self) -> ActiveLayers<'_> {
        active_layers(self)
    }

    // ------------------------------------------------------------------
    // Filter transitions
    // ------------------------------------------------------------------

    /// Choose a filter category. Resets the value and drops any filtered output.
    pub fn select_category(&mut self, category: Option<FilterCategory>) {
        self.filter.set_category(category);
        if self.filtered.take().is_some() {
            log::debug!("Filtered output cleared by category change");
        }
    }

    /// Choose a filter value for the current category.
    pub fn select_value(&mut self, value: &str) -> Result<(), FilterError> {
        self.filter.set_value(value)
    }

    /// Run the filter. Returns the number of kept features, or `None` when
    /// the selection is incomplete, in which case the prior output is kept.
    pub fn run_filter(&mut self) -> Option<usize> {
        let (category, value) = self.filter.complete()?;
        let filtered = filter::filter(&self.base, category, value);
        let count = filtered.len();
        self.filtered = Some(filtered);
        Some(count)
    }

    /// Clear the filter dropdowns and their output.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filtered = None;
    }

    // ------------------------------------------------------------------
    // Proximity transitions
    // ------------------------------------------------------------------

    /// A map click: replace the candidate query and drop old results.
    pub fn select_point(&mut self, query: ProximityQuery) {
        if let Some(previous) = self.selection.replace(query) {
            log::debug!(
                "Selection moved from ({}, {}) to ({}, {})",
                previous.latitude,
                previous.longitude,
                query.latitude,
                query.longitude
            );
        }
        self.proximity = None;
    }

    /// Edit the radius of the candidate query. Returns `false` without a selection.
    pub fn set_radius(&mut self, radius_km: f64) -> bool {
        match self.selection.as_mut() {
            Some(query) => {
                query.set_radius(radius_km);
                true
            }
            None => false,
        }
    }

    /// Store the results of a fulfilled query (last write wins). Failed
    /// queries never call this, so earlier results stay on screen.
    pub fn set_proximity_results(&mut self, results: ProximityResultSet) {
        self.proximity = Some(results);
    }

    /// Close the click popup: clears the selection and proximity results only.
    pub fn dismiss(&mut self) {
        self.selection = None;
        self.proximity = None;
    }

    // ------------------------------------------------------------------
    // Overlay transitions
    // ------------------------------------------------------------------

    /// Show a validated upload, replacing any previous overlay.
    pub fn set_overlay(&mut self, overlay: PointCollection) {
        self.overlay = Some(overlay);
    }

    /// Remove the overlay.
    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Return to the default view: base layer only, nothing selected.
    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.base));
        log::debug!("View reset to default");
    }
}
