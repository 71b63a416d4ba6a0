//! Handler für Undo/Redo.
//!
//! Nach dem Wiederherstellen ist die Selektion bereits über die IDs neu gebunden.

use crate::app::AppState;

/// Stellt den Kurvenbestand vor dem letzten Bearbeitungsschritt wieder her.
pub fn undo(state: &mut AppState) {
    if !state.undo() {
        log::debug!("Undo-Stack leer");
        return;
    }
    log::info!(
        "Undo: {} Schritte übrig, Selektion {:?}",
        state.history.undo_len(),
        state.curves.selection.kind()
    );
}

/// Wiederholt den zuletzt rückgängig gemachten Schritt.
pub fn redo(state: &mut AppState) {
    if !state.redo() {
        log::debug!("Redo-Stack leer");
        return;
    }
    log::info!(
        "Redo: {} Schritte übrig, Selektion {:?}",
        state.history.redo_len(),
        state.curves.selection.kind()
    );
}
