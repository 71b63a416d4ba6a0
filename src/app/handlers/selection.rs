//! Handler für Punkt- und Kurven-Selektion.

use crate::app::AppState;
use crate::core::CurveId;
use glam::DVec2;

/// Pickt den Punkt/Handle unter `world_pos` und übernimmt ihn in die Selektion.
pub fn select_point(state: &mut AppState, world_pos: DVec2, threshold_sq: f64) {
    let kind = state.curves.pick_point(world_pos, threshold_sq);
    log::debug!("Pick bei ({:.2}, {:.3}): {:?}", world_pos.x, world_pos.y, kind);
}

/// Selektiert alle Punkte im Rechteck; ohne Treffer bleibt die Selektion.
pub fn select_in_box(state: &mut AppState, corner_a: DVec2, corner_b: DVec2) {
    if !state.curves.select_in_box(corner_a, corner_b) {
        log::debug!("Box-Selektion ohne Treffer");
    }
}

/// Fokussiert eine Kurve ohne Punkte.
pub fn select_curve(state: &mut AppState, curve: CurveId) {
    if !state.curves.focus_curve(curve) {
        log::warn!("Unbekannte Kurve {} kann nicht selektiert werden", curve);
    }
}

/// Hebt die Selektion auf.
pub fn clear(state: &mut AppState) {
    state.curves.clear_selection();
}
