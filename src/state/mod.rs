//! Application state: the view state machine, the layer compositor built on
//! top of it, and the overlay upload lifecycle.

mod layers;
mod upload;
mod view;

#[cfg(test)]
mod tests;

pub use layers::{
    ActiveLayers, LayerKind, LayerStyle, PopupRow, PrimaryLayer, RenderLayer, RenderPoint,
    active_layers,
};
pub use upload::OverlayLoader;
pub use view::ViewState;
