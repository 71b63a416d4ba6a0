//! Application State: zentrale Datenhaltung.

use super::history::{EditHistory, Snapshot};
use super::playback::PlaybackClock;
use super::CommandLog;
use crate::core::{Curve, CurveSet, GridProjection};
use crate::shared::EditorOptions;
use crate::wire::OverrideSource;
use glam::DVec2;
use std::path::PathBuf;

/// Zustand eines laufenden Punkt-Drags.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Drag läuft (zwischen `BeginPointDrag` und `EndPointDrag`)
    pub active: bool,
    /// Noch nicht angewendeter Bruchteil der Frame-Bewegung
    pub remainder: DVec2,
    /// Beim Start wurde ein Undo-Snapshot aufgenommen
    pub undo_pushed: bool,
    /// Mindestens ein Punkt wurde bewegt
    pub moved: bool,
    /// Statt Punkten wird der Guide-Marker gezogen
    pub guide: bool,
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle Kurven inkl. fokussierter Selektion
    pub curves: CurveSet,
    /// Undo/Redo-Historie
    pub history: EditHistory,
    /// Guide-Punkt und Wiedergabe
    pub playback: PlaybackClock,
    /// Welt↔Pixel-Projektion des Graphen
    pub view: GridProjection,
    /// Laufender Drag
    pub drag: DragState,
    /// Kurven einer verbundenen zweiten Sitzung
    pub override_source: OverrideSource,
    /// Zuletzt exportiertes Zwischenablage-JSON
    pub clipboard: Option<String>,
    /// Pfad der zuletzt geladenen/gespeicherten Kurven-Datei
    pub current_file_path: Option<PathBuf>,
    /// Command-Log
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den übergebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            curves: CurveSet::with_config(options.curve_set_config()),
            history: EditHistory::new_with_capacity(options.undo_depth)
                .with_debounce(options.undo_debounce()),
            playback: PlaybackClock::new(options.playback_default_fps),
            view: options.grid_projection(GridProjection::default().viewport),
            drag: DragState::default(),
            override_source: OverrideSource::new(),
            clipboard: None,
            current_file_path: None,
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Quadrierter Pick-Radius in Welteinheiten bei aktuellem Zoom.
    pub fn selection_threshold_sq(&self) -> f64 {
        self.view
            .selection_distance_sq(self.options.selection_pick_radius_px)
    }

    /// Kurven, die angezeigt werden: Override-Quelle falls aktiv, sonst die eigenen.
    pub fn display_curves(&self) -> Vec<&Curve> {
        match self.override_source.curves() {
            Some(curves) => curves.iter().collect(),
            None => self.curves.curves().collect(),
        }
    }

    /// Angezeigter Frame: Frame der Override-Quelle falls aktiv, sonst Guide-Frame.
    pub fn display_frame(&self) -> f64 {
        self.override_source
            .frame()
            .unwrap_or_else(|| self.playback.guide_frame())
    }

    /// Gibt zurück, ob ein Undo-Schritt verfügbar ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Nimmt einen Undo-Snapshot des aktuellen Zustands auf (entprellt).
    ///
    /// Gibt `true` zurück, wenn der Snapshot tatsächlich auf den Stack kam.
    pub fn push_undo_state(&mut self) -> bool {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap)
    }

    /// Leert die Historie (z.B. nach dem Laden einer Datei).
    pub fn reset_history(&mut self) {
        self.history = EditHistory::new_with_capacity(self.options.undo_depth)
            .with_debounce(self.options.undo_debounce());
    }

    /// Verwirft den zuletzt aufgenommenen Snapshot (Operation ohne Wirkung).
    pub fn delete_undo_state(&mut self) {
        if self.history.delete_last().is_none() {
            log::debug!("Kein Undo-Snapshot zum Verwerfen");
        }
    }

    /// Stellt den vorherigen Zustand wieder her.
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::from_state(self);
        match self.history.pop_undo_with_current(current) {
            Some(prev) => {
                prev.apply_to(self);
                true
            }
            None => false,
        }
    }

    /// Stellt einen rückgängig gemachten Zustand wieder her.
    pub fn redo(&mut self) -> bool {
        let current = Snapshot::from_state(self);
        match self.history.pop_redo_with_current(current) {
            Some(next) => {
                next.apply_to(self);
                true
            }
            None => false,
        }
    }

    /// Ersetzt Optionen und überträgt Kurven- und Zoom-Parameter.
    pub fn apply_options(&mut self, options: EditorOptions) {
        self.curves.set_config(options.curve_set_config());
        let viewport = self.view.viewport;
        let position = self.view.position;
        self.view = options.grid_projection(viewport);
        self.view.position = position;
        self.options = options;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::SyncMessage;

    #[test]
    fn display_prefers_override_source() {
        let mut state = AppState::new();
        state.curves.add_curve(Curve::new("eigen"));
        assert_eq!(state.display_curves().len(), 1);
        assert_eq!(state.display_frame(), state.playback.guide_frame());

        state
            .override_source
            .apply(SyncMessage::state(42.0, [&Curve::new("a"), &Curve::new("b")]));
        assert_eq!(state.display_curves().len(), 2);
        assert_eq!(state.display_frame(), 42.0);
        // Eigene Kurven bleiben unberührt
        assert_eq!(state.curves.curve_count(), 1);
    }

    #[test]
    fn apply_options_keeps_view_position() {
        let mut state = AppState::new();
        state.view.position = DVec2::new(3.0, 4.0);

        let options = EditorOptions {
            selection_pick_radius_px: 14.0,
            continuity_epsilon: 0.5,
            ..EditorOptions::default()
        };
        state.apply_options(options);

        assert_eq!(state.view.position, DVec2::new(3.0, 4.0));
        assert_eq!(state.curves.config().continuity_epsilon, 0.5);
        assert_eq!(state.options.selection_pick_radius_px, 14.0);
    }
}
