//! Kontrollpunkt (Keyframe) eines Kurven-Tracks inklusive gecachter Bézier-LUT.

use super::math::cubic_bezier;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Kurven-lokale, stabile ID eines Kontrollpunkts.
pub type PointId = u64;

/// Anzahl der Parameter-Schritte einer Segment-LUT (ergibt `LUT_STEPS + 1` Samples).
pub const LUT_STEPS: usize = 128;

/// Interpolationsart des Segments, das an diesem Punkt beginnt.
///
/// Die Serialisierung nutzt die numerischen Tags des Austauschformats
/// (`Linear = 0`, `Bezier = 1`, `BezierContinuous = 2`, `LinearFlat = 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ControlPointType {
    /// Lineare Interpolation zum nächsten Punkt
    #[default]
    Linear,
    /// Hält den Wert bis zum nächsten Punkt (Stufe)
    LinearFlat,
    /// Kubische Bézier mit unabhängigen Handles
    Bezier,
    /// Kubische Bézier, Handles bleiben kollinear
    BezierContinuous,
}

impl ControlPointType {
    /// `true` für beide Bézier-Varianten.
    pub fn is_bezier(self) -> bool {
        matches!(self, Self::Bezier | Self::BezierContinuous)
    }

    /// `true` für Linear und LinearFlat.
    pub fn is_linear(self) -> bool {
        !self.is_bezier()
    }
}

impl From<ControlPointType> for u8 {
    fn from(kind: ControlPointType) -> Self {
        match kind {
            ControlPointType::Linear => 0,
            ControlPointType::Bezier => 1,
            ControlPointType::BezierContinuous => 2,
            ControlPointType::LinearFlat => 3,
        }
    }
}

impl TryFrom<u8> for ControlPointType {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Linear),
            1 => Ok(Self::Bezier),
            2 => Ok(Self::BezierContinuous),
            3 => Ok(Self::LinearFlat),
            other => Err(format!("Unbekannter Kontrollpunkt-Typ: {other}")),
        }
    }
}

/// Ein Keyframe: Position (Frame, Wert) plus Vorwärts-/Rückwärts-Handle.
///
/// Felder sind nur crate-intern schreibbar; Mutationen laufen über `CurveSet`,
/// damit Sortierung und LUT-Cache konsistent bleiben.
#[derive(Debug, Clone)]
pub struct ControlPoint {
    pub(crate) id: PointId,
    pub(crate) kind: ControlPointType,
    pub(crate) position: DVec2,
    pub(crate) forward_handle: DVec2,
    pub(crate) backwards_handle: DVec2,
    /// Gesampeltes Segment zum Nachfolger (nie autoritativ, nie serialisiert)
    cached_lut: OnceCell<Vec<DVec2>>,
}

impl ControlPoint {
    /// Erstellt einen Punkt mit expliziten Handles. Die ID vergibt die Kurve beim Einfügen.
    pub fn new(
        kind: ControlPointType,
        position: DVec2,
        forward_handle: DVec2,
        backwards_handle: DVec2,
    ) -> Self {
        Self {
            id: 0,
            kind,
            position,
            forward_handle,
            backwards_handle,
            cached_lut: OnceCell::new(),
        }
    }

    /// Erstellt einen Punkt mit waagrechten Handles im Abstand `handle_frames`.
    pub fn with_flat_handles(kind: ControlPointType, position: DVec2, handle_frames: f64) -> Self {
        let offset = DVec2::new(handle_frames, 0.0);
        Self::new(kind, position, position + offset, position - offset)
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn kind(&self) -> ControlPointType {
        self.kind
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn forward_handle(&self) -> DVec2 {
        self.forward_handle
    }

    pub fn backwards_handle(&self) -> DVec2 {
        self.backwards_handle
    }

    /// Frame (x-Komponente der Position).
    pub fn frame(&self) -> f64 {
        self.position.x
    }

    /// Wert (y-Komponente der Position).
    pub fn value(&self) -> f64 {
        self.position.y
    }

    /// Ob aktuell eine LUT gecacht ist.
    pub fn has_cached_lut(&self) -> bool {
        self.cached_lut.get().is_some()
    }

    /// Verwirft die gecachte LUT.
    pub(crate) fn invalidate_lut(&mut self) {
        self.cached_lut.take();
    }

    /// Verschiebt Position und beide Handles starr.
    pub(crate) fn translate(&mut self, delta: DVec2) {
        self.position += delta;
        self.forward_handle += delta;
        self.backwards_handle += delta;
    }

    /// LUT des Segments `self -> next`, wird beim ersten Zugriff berechnet.
    pub(crate) fn lut(&self, next: &ControlPoint) -> &[DVec2] {
        self.cached_lut
            .get_or_init(|| sample_segment(self, next))
            .as_slice()
    }
}

impl PartialEq for ControlPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.position == other.position
            && self.forward_handle == other.forward_handle
            && self.backwards_handle == other.backwards_handle
    }
}

/// Sampelt das Bézier-Segment gleichmäßig im Kurvenparameter (nicht im Frame).
fn sample_segment(previous: &ControlPoint, next: &ControlPoint) -> Vec<DVec2> {
    (0..=LUT_STEPS)
        .map(|i| {
            let t = i as f64 / LUT_STEPS as f64;
            cubic_bezier(
                previous.position,
                previous.forward_handle,
                next.backwards_handle,
                next.position,
                t,
            )
        })
        .collect()
}
