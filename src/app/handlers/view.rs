//! Handler für Ansicht und Viewport.

use crate::app::AppState;
use glam::DVec2;

/// Verschiebt die Ansicht um ein Pixel-Delta.
pub fn pan(state: &mut AppState, delta_px: DVec2) {
    state.view.pixel_move(delta_px);
}

/// Zoomt relativ (Mausrad-Delta).
pub fn zoom(state: &mut AppState, amount: f64) {
    state.view.zoom(amount);
}

/// Aktualisiert die Viewport-Größe.
pub fn set_viewport_size(state: &mut AppState, size: DVec2) {
    state.view.set_viewport_size(size);
}
