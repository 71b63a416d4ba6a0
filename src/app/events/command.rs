use crate::core::{ControlPointType, CurveId};
use crate::shared::EditorOptions;
use glam::DVec2;
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Positionen sind Weltkoordinaten (Frame, Wert).
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Punkt/Handle unter der Position picken
    SelectPoint {
        world_pos: DVec2,
        threshold_sq: f64,
    },
    /// Alle Punkte im Rechteck selektieren
    SelectInBox { corner_a: DVec2, corner_b: DVec2 },
    /// Reine Kurven-Selektion (Eigenschafts-Klick)
    SelectCurve { curve: CurveId },
    /// Selektion aufheben
    ClearSelection,

    /// Drag-Lifecycle Start (Undo-Snapshot)
    BeginPointDrag,
    /// Selektierten Punkt/Handle auf Zielposition ziehen (pro Achse gewichtet)
    DragSelection { target: DVec2, scale: DVec2 },
    /// Selektierte Punkte um Delta verschieben
    MoveSelection { delta: DVec2 },
    /// Drag-Lifecycle Ende
    EndPointDrag,
    /// Frames der selektierten Punkte runden
    NormalizePointFrames,

    /// Keyframe am Guide-Frame in die aktive Kurve einfügen
    InsertKeyframe,
    /// Keyframe am Guide-Frame in alle Kurven einfügen
    InsertKeyframeAllCurves,
    /// Selektierte Punkte löschen
    DeleteSelectedPoints,
    /// Interpolationstyp der selektierten Punkte setzen
    SetPointType { kind: ControlPointType },
    /// Selektierte Punkte starr auf einen Frame schieben
    SnapFrame { frame: f64 },
    /// Wert der selektierten Punkte auf den Guide-Wert setzen
    SnapValue { value: f64 },
    /// Frame des selektierten Punkts setzen
    SetPointFrame { frame: f64 },
    /// Wert des selektierten Punkts setzen
    SetPointValue { value: f64 },
    /// Wert des Keyframes am Guide-Frame der aktiven Kurve setzen
    SetValueAtGuideFrame { value: f64 },

    /// Neue Kurve anlegen
    AddCurve { name: String },
    /// Aktive Kurve umbenennen
    RenameCurve { name: String },
    /// Sichtbarkeit der selektierten Kurven umschalten
    ToggleVisible,
    /// Sperre der selektierten Kurven umschalten
    ToggleLocked,

    /// Undo: Letzte Aktion rückgängig machen
    Undo,
    /// Redo: Rückgängig gemachte Aktion wiederherstellen
    Redo,

    /// Guide-Marker-Drag starten
    BeginGuideDrag,
    /// Guide-Punkt setzen
    SetGuidePoint { world_pos: DVec2 },
    /// Guide-Frame auf den selektierten Punkt setzen
    SetGuideFrameToSelectedPoint,
    /// Bildrate setzen (0 = Pause)
    SetPlaybackFps { fps: f64 },
    /// Wiedergabe starten/pausieren
    PlayOrPause,
    /// Wiederholungs-Frame auf den Guide-Frame setzen
    SetRepeatFrame,
    /// Wiederholungs-Frame entfernen
    ClearRepeatFrame,
    /// Wiedergabe um Host-Zeit fortschreiten
    AdvancePlayback { delta_seconds: f64 },

    /// Ansicht um Pixel-Delta verschieben
    PanView { delta_px: DVec2 },
    /// Ansicht zoomen
    ZoomView { amount: f64 },
    /// Viewport-Größe setzen
    SetViewportSize { size: DVec2 },

    /// Sync-Nachricht einer zweiten Sitzung verarbeiten
    ApplySyncMessage { json: String },
    /// Alle Kurven als JSON in die Zwischenablage exportieren
    CopyCurves,
    /// Kurven-Datei laden
    LoadCurvesFile { path: PathBuf },
    /// Kurven speichern (None = aktueller Pfad)
    SaveCurvesFile { path: Option<PathBuf> },

    /// Optionen anwenden und speichern
    ApplyOptions { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptions,
}
