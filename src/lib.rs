//! Keyframe Graph Editor Library.
//! Kurvenmodell, Auswertung, Selektion und Undo/Redo als Library für Hosts und Tests.

pub mod app;
pub mod core;
pub mod shared;
pub mod wire;

pub use app::{AppCommand, AppController, AppIntent, AppState, PlaybackClock};
pub use core::{
    ControlPoint, ControlPointType, Curve, CurveId, CurveSet, CurveSetConfig, GridProjection,
    PointHandle, PointId, PointMovement, SelectionKind, SelectionPoint,
};
pub use shared::EditorOptions;
pub use wire::{curves_to_json, parse_curves, OverrideSource, SyncMessage};
