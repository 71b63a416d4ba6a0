//! Handler für Kurven- und Punkt-Bearbeitung.
//!
//! Mutierende Handler nehmen vor der Änderung einen Undo-Snapshot auf.
//! Bleibt die Änderung ohne Wirkung, wird der Snapshot wieder verworfen.

use crate::app::state::DragState;
use crate::app::AppState;
use crate::core::{
    ControlPointType, Curve, CurveId, CurveSet, PointHandle, PointId, PointMovement,
    SelectionPoint,
};
use glam::DVec2;

fn with_undo(state: &mut AppState, edit: impl FnOnce(&mut AppState) -> bool) -> bool {
    let pushed = state.push_undo_state();
    let changed = edit(state);
    if pushed && !changed {
        state.delete_undo_state();
    }
    changed
}

/// Während eines Drags gilt der Snapshot vom Drag-Start, sonst ein eigener.
fn move_points(state: &mut AppState, apply: impl FnOnce(&mut CurveSet) -> bool) {
    if state.drag.active {
        if apply(&mut state.curves) {
            state.drag.moved = true;
        }
    } else {
        with_undo(state, |state| apply(&mut state.curves));
    }
}

/// Aktiver Punkt der Selektion, gebunden an den Punkt selbst (nicht an einen Handle).
fn active_point_selection(state: &AppState) -> Option<SelectionPoint> {
    let (curve, point) = state.curves.selection.active_point()?;
    Some(SelectionPoint::single(curve, Some(point), PointHandle::Point))
}

fn selected_curves(state: &AppState) -> Vec<CurveId> {
    let mut curves = state.curves.selection.curves().to_vec();
    curves.sort_unstable();
    curves.dedup();
    curves
}

// === Drag-Lifecycle ===

/// Startet einen Drag der selektierten Punkte (Undo-Snapshot).
pub fn begin_point_drag(state: &mut AppState) {
    if !state.curves.selection.has_any_points() {
        state.drag = DragState::default();
        return;
    }
    let undo_pushed = state.push_undo_state();
    state.drag = DragState {
        active: true,
        remainder: DVec2::ZERO,
        undo_pushed,
        moved: false,
        guide: false,
    };
}

/// Zieht den selektierten Punkt/Handle auf `target` (pro Achse mit `scale` gewichtet).
pub fn drag_selection(state: &mut AppState, target: DVec2, scale: DVec2) {
    let movement = PointMovement::to_scaled(target, scale);
    move_points(state, |curves| curves.modify_selected(movement));
}

/// Verschiebt alle selektierten Punkte relativ.
///
/// Punkte rasten auf ganze Frames ein; der nicht angewendete Frame-Anteil
/// wird bis zum nächsten Aufruf aufgehoben, damit langsame Drags nicht verloren gehen.
pub fn move_selection(state: &mut AppState, delta: DVec2) {
    let step = if state.curves.selection.handle == PointHandle::Point {
        let pending = state.drag.remainder + delta;
        let frames = pending.x.round();
        state.drag.remainder = DVec2::new(pending.x - frames, 0.0);
        DVec2::new(frames, pending.y)
    } else {
        delta
    };

    if step == DVec2::ZERO {
        return;
    }
    move_points(state, |curves| curves.modify_selected(PointMovement::by(step)));
}

/// Beendet den Drag. Ein Drag ohne Bewegung hinterlässt keinen Undo-Schritt.
pub fn end_point_drag(state: &mut AppState) {
    let drag = std::mem::take(&mut state.drag);
    if !drag.active {
        return;
    }
    if drag.undo_pushed && !drag.moved {
        state.delete_undo_state();
    }
    if drag.moved && state.curves.selection.selected_points().count() > 1 {
        let selection = state.curves.selection.clone();
        state.curves.normalize_point_frames(&selection);
    }
}

/// Rundet die Frames aller selektierten Punkte.
pub fn normalize_point_frames(state: &mut AppState) {
    let selection = state.curves.selection.clone();
    with_undo(state, |state| state.curves.normalize_point_frames(&selection));
}

// === Keyframes ===

/// Fügt in der aktiven Kurve einen Keyframe am Guide-Frame ein und selektiert ihn.
///
/// Existiert dort bereits ein Punkt, wird nur dieser selektiert.
pub fn insert_keyframe(state: &mut AppState) {
    let Some(curve_id) = state.curves.selection.active_curve() else {
        log::debug!("Keine aktive Kurve, kein Keyframe eingefügt");
        return;
    };
    let frame = state.playback.guide_frame();

    with_undo(state, |state| {
        let existed = state
            .curves
            .curve(curve_id)
            .is_some_and(|curve| curve.point_at_frame(frame).is_some());
        let Some(point_id) = state.curves.add_point(curve_id, frame) else {
            return false;
        };
        select_single_point(state, curve_id, point_id);
        if !existed {
            log::info!("Keyframe bei Frame {} in Kurve {} eingefügt", frame, curve_id);
        }
        !existed
    });
}

/// Fügt in allen Kurven einen Keyframe am Guide-Frame ein.
pub fn insert_keyframe_all_curves(state: &mut AppState) {
    let frame = state.playback.guide_frame();
    let curve_ids: Vec<CurveId> = state.curves.curves().map(Curve::id).collect();

    let inserted = with_undo(state, |state| {
        let mut inserted = false;
        for curve_id in curve_ids {
            let free = state
                .curves
                .curve(curve_id)
                .is_some_and(|curve| curve.point_at_frame(frame).is_none());
            if free && state.curves.add_point(curve_id, frame).is_some() {
                inserted = true;
            }
        }
        inserted
    });
    if inserted {
        log::info!("Keyframes bei Frame {} eingefügt", frame);
    }
}

fn select_single_point(state: &mut AppState, curve_id: CurveId, point_id: PointId) {
    state.curves.selection.select_point(SelectionPoint::single(
        curve_id,
        Some(point_id),
        PointHandle::Point,
    ));
}

/// Löscht alle selektierten Punkte.
pub fn delete_selected_points(state: &mut AppState) {
    let targets: Vec<(CurveId, PointId)> = state.curves.selection.selected_points().collect();
    let deleted = with_undo(state, |state| {
        let mut deleted = false;
        for (curve_id, point_id) in targets {
            deleted |= state.curves.delete_point(curve_id, point_id).is_some();
        }
        deleted
    });
    if deleted {
        log::info!("Selektierte Punkte gelöscht");
    }
}

// === Punkt-Eigenschaften ===

/// Setzt den Interpolationstyp der selektierten Punkte.
pub fn set_point_type(state: &mut AppState, kind: ControlPointType) {
    let selection = state.curves.selection.clone();
    with_undo(state, |state| state.curves.set_point_type(&selection, kind));
}

/// Schiebt die selektierten Punkte starr auf `frame`.
pub fn snap_frame(state: &mut AppState, frame: f64) {
    let selection = state.curves.selection.clone();
    with_undo(state, |state| state.curves.snap_frame(&selection, frame));
}

/// Setzt den Wert aller selektierten Punkte (bzw. des aktiven Handles) auf `value`.
pub fn snap_value(state: &mut AppState, value: f64) {
    let selection = state.curves.selection.clone();
    let movement = PointMovement::to_scaled(DVec2::new(0.0, value), DVec2::Y);
    with_undo(state, |state| state.curves.modify_point(&selection, movement));
}

/// Setzt den Frame des aktiven Punkts (Eigenschaftsfeld).
pub fn set_point_frame(state: &mut AppState, frame: f64) {
    let Some(selection) = active_point_selection(state) else {
        return;
    };
    let movement = PointMovement::to_scaled(DVec2::new(frame, 0.0), DVec2::X);
    with_undo(state, |state| state.curves.modify_point(&selection, movement));
}

/// Setzt den Wert des aktiven Punkts (Eigenschaftsfeld).
pub fn set_point_value(state: &mut AppState, value: f64) {
    let Some(selection) = active_point_selection(state) else {
        return;
    };
    let movement = PointMovement::to_scaled(DVec2::new(0.0, value), DVec2::Y);
    with_undo(state, |state| state.curves.modify_point(&selection, movement));
}

/// Setzt den Wert des Keyframes der aktiven Kurve am Guide-Frame.
pub fn set_value_at_guide_frame(state: &mut AppState, value: f64) {
    let Some(curve_id) = state.curves.selection.active_curve() else {
        return;
    };
    let frame = state.playback.guide_frame();
    let changed = with_undo(state, |state| {
        state.curves.set_value_at_frame(curve_id, frame, value)
    });
    if !changed {
        log::debug!("Kein Keyframe bei Frame {} in Kurve {}", frame, curve_id);
    }
}

// === Kurven ===

/// Legt eine neue Kurve an.
pub fn add_curve(state: &mut AppState, name: String) {
    with_undo(state, |state| {
        let id = state.curves.add_curve(Curve::new(name));
        log::info!("Kurve {} angelegt", id);
        true
    });
}

/// Benennt die aktive Kurve um.
pub fn rename_curve(state: &mut AppState, name: String) {
    let Some(curve_id) = state.curves.selection.active_curve() else {
        return;
    };
    with_undo(state, |state| state.curves.rename_curve(curve_id, name));
}

/// Schaltet die Sichtbarkeit aller selektierten Kurven um.
pub fn toggle_visible(state: &mut AppState) {
    let curve_ids = selected_curves(state);
    with_undo(state, |state| {
        curve_ids
            .into_iter()
            .filter_map(|curve_id| state.curves.toggle_visible(curve_id))
            .count()
            > 0
    });
}

/// Schaltet die Sperre aller selektierten Kurven um.
pub fn toggle_locked(state: &mut AppState) {
    let curve_ids = selected_curves(state);
    with_undo(state, |state| {
        curve_ids
            .into_iter()
            .filter_map(|curve_id| state.curves.toggle_locked(curve_id))
            .count()
            > 0
    });
}
