//! Core-Domänentypen: Kontrollpunkte, Kurven, CurveSet, Selektion, Projektion.

pub mod control_point;
/// Kurven-Datenmodell
///
/// - Curve: sortierte Kontrollpunkte plus Auswertung (Linear, Stufe, Bézier-LUT)
/// - CurveInformation: einschließende Punkte eines Frames
pub mod curve;
pub mod curve_set;
pub mod math;
pub mod projection;
pub mod selection;

pub use control_point::{ControlPoint, ControlPointType, PointId, LUT_STEPS};
pub use curve::{
    Curve, CurveId, CurveInformation, DEFAULT_CURVE_COLOR, DEFAULT_CURVE_NAME,
};
pub use curve_set::{
    CurveSet, CurveSetConfig, PointMovement, CONTINUITY_EPSILON, DEFAULT_CURVE_PALETTE,
    DEFAULT_HANDLE_FRAMES,
};
pub use projection::GridProjection;
pub use selection::{
    PointHandle, SelectionHistoryEntry, SelectionKind, SelectionPoint, SELECTION_HISTORY_LEN,
};
