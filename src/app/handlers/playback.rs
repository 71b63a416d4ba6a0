//! Handler für Guide-Punkt und Wiedergabe.

use crate::app::{AppState, DragState};
use crate::core::Curve;
use glam::DVec2;

/// Startet das Ziehen des Guide-Markers.
pub fn begin_guide_drag(state: &mut AppState) {
    state.drag = DragState {
        guide: true,
        ..DragState::default()
    };
}

/// Setzt den Guide-Punkt (Frame gerundet).
pub fn set_guide_point(state: &mut AppState, world_pos: DVec2) {
    state.playback.set_guide_point(world_pos);
}

/// Springt mit dem Guide-Frame auf den aktiven Punkt.
pub fn set_guide_frame_to_selected_point(state: &mut AppState) {
    let frame = state
        .curves
        .selection
        .active_point()
        .and_then(|(curve_id, point_id)| state.curves.curve(curve_id)?.point(point_id))
        .map(|point| point.frame());
    match frame {
        Some(frame) => state.playback.set_guide_frame(frame),
        None => log::debug!("Kein Punkt selektiert, Guide-Frame bleibt"),
    }
}

/// Setzt die Bildrate (0 = Pause).
pub fn set_fps(state: &mut AppState, fps: f64) {
    state.playback.set_fps(fps);
    log::info!("Wiedergabe mit {} fps", state.playback.fps());
}

/// Startet oder pausiert die Wiedergabe.
pub fn play_or_pause(state: &mut AppState) {
    state.playback.play_or_pause();
    if state.playback.is_playing() {
        log::info!("Wiedergabe gestartet ({} fps)", state.playback.fps());
    } else {
        log::info!("Wiedergabe pausiert");
    }
}

/// Merkt den Guide-Frame als Wiederholungs-Frame.
pub fn set_repeat_frame(state: &mut AppState) {
    state.playback.set_repeat_frame_to_guide();
}

/// Entfernt den Wiederholungs-Frame.
pub fn clear_repeat_frame(state: &mut AppState) {
    state.playback.clear_repeat_frame();
}

/// Schreitet die Wiedergabe über den Frame-Bereich der angezeigten Kurven fort.
pub fn advance(state: &mut AppState, delta_seconds: f64) {
    let (min_frame, max_frame) = Curve::frame_range(state.display_curves());
    state.playback.advance(delta_seconds, min_frame, max_frame);
}
