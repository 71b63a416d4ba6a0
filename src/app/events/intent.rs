use crate::core::{ControlPointType, CurveId};
use crate::shared::EditorOptions;
use glam::DVec2;
use std::path::PathBuf;

/// App-Intent Events.
/// Intents sind Eingaben aus Host/UI ohne direkte Mutationslogik.
/// Zeigerpositionen kommen in Pixeln und werden beim Mapping projiziert.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Zeiger gedrückt (Pick + Drag-Start)
    PointerPressed { screen_pos: DVec2 },
    /// Zeiger mit gedrückter Taste bewegt
    PointerDragged {
        screen_pos: DVec2,
        screen_delta: DVec2,
        /// Nur den Wert verändern (Frame festhalten)
        lock_frame: bool,
    },
    /// Zeiger losgelassen
    PointerReleased,
    /// Rechteck-Selektion aufgezogen
    BoxSelectRequested { corner_a: DVec2, corner_b: DVec2 },
    /// Kurve in der Kurvenliste angeklickt
    CurveClicked { curve: CurveId },
    /// Selektion aufheben
    ClearSelectionRequested,

    /// Keyframe am Guide-Frame einfügen (aktive Kurve)
    InsertKeyframeRequested,
    /// Keyframe am Guide-Frame in alle Kurven einfügen
    InsertKeyframeAllCurvesRequested,
    /// Selektierte Punkte löschen
    DeleteSelectedRequested,
    /// Interpolationstyp ändern
    PointTypeChangeRequested { kind: ControlPointType },
    /// Selektierte Punkte auf den Guide-Frame schieben
    SnapToGuideFrameRequested,
    /// Selektierte Punkte auf den Wert des Guide-Punkts setzen
    SnapToGuideValueRequested,
    /// Frame im Eigenschaftsfeld geändert
    PointFrameEdited { frame: f64 },
    /// Wert im Eigenschaftsfeld geändert
    PointValueEdited { value: f64 },
    /// Wert am Guide-Frame geändert
    ValueAtGuideFrameEdited { value: f64 },

    /// Neue Kurve anlegen
    AddCurveRequested { name: String },
    /// Aktive Kurve umbenennen
    RenameCurveRequested { name: String },
    /// Sichtbarkeit umschalten
    ToggleVisibilityRequested,
    /// Sperre umschalten
    ToggleLockRequested,

    /// Undo: Letzte Aktion rückgängig machen
    UndoRequested,
    /// Redo: Rückgängig gemachte Aktion wiederherstellen
    RedoRequested,

    /// Guide-Punkt per Zeiger setzen
    GuidePointDragged { screen_pos: DVec2 },
    /// Guide-Frame auf den selektierten Punkt springen
    GuideToSelectedPointRequested,
    /// Wiedergabe starten/pausieren
    PlayPauseRequested,
    /// Bildrate geändert
    FpsChanged { fps: f64 },
    /// Wiederholungs-Frame setzen
    RepeatFrameSetRequested,
    /// Wiederholungs-Frame entfernen
    RepeatFrameClearRequested,
    /// Host-Tick: vergangene Zeit seit dem letzten Tick
    TickElapsed { delta_seconds: f64 },

    /// Ansicht verschieben (Pixel)
    ViewPanned { delta_px: DVec2 },
    /// Ansicht zoomen (Mausrad)
    ViewZoomed { amount: f64 },
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: DVec2 },

    /// Rohe Nachricht der zweiten Sitzung empfangen
    SyncMessageReceived { json: String },
    /// Kurven in die Zwischenablage kopieren
    CopyRequested,
    /// Kurven-Datei wurde gewählt (Laden)
    FileSelected { path: PathBuf },
    /// Speichern (None = aktueller Pfad)
    SaveRequested { path: Option<PathBuf> },

    /// Optionen wurden geändert
    OptionsChanged { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
