//! Austausch-Records für Kurven und Kontrollpunkte.
//!
//! Format: `{id, name, controlPoints: [{type, position, forwardHandle, backwardsHandle}],
//! color, visible, locked}`. Die LUT wird nie serialisiert; beim Einlesen werden
//! die Punkte sortiert und Caches erst bei Bedarf aufgebaut.

use crate::core::{
    ControlPoint, ControlPointType, Curve, CurveId, DEFAULT_CURVE_COLOR, DEFAULT_CURVE_NAME,
};
use glam::DVec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Vektor als `{x, y}`-Objekt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WireVec2 {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for WireVec2 {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<WireVec2> for DVec2 {
    fn from(v: WireVec2) -> Self {
        DVec2::new(v.x, v.y)
    }
}

/// Ein Kontrollpunkt im Austauschformat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPointRecord {
    #[serde(rename = "type", default)]
    pub kind: ControlPointType,
    pub position: WireVec2,
    pub forward_handle: WireVec2,
    pub backwards_handle: WireVec2,
}

impl From<&ControlPoint> for ControlPointRecord {
    fn from(point: &ControlPoint) -> Self {
        Self {
            kind: point.kind(),
            position: point.position().into(),
            forward_handle: point.forward_handle().into(),
            backwards_handle: point.backwards_handle().into(),
        }
    }
}

impl From<ControlPointRecord> for ControlPoint {
    fn from(record: ControlPointRecord) -> Self {
        ControlPoint::new(
            record.kind,
            record.position.into(),
            record.forward_handle.into(),
            record.backwards_handle.into(),
        )
    }
}

/// Eine Kurve im Austauschformat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveRecord {
    #[serde(default)]
    pub id: CurveId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub control_points: Vec<ControlPointRecord>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

fn default_name() -> String {
    DEFAULT_CURVE_NAME.to_string()
}

fn default_color() -> String {
    DEFAULT_CURVE_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

impl From<&Curve> for CurveRecord {
    fn from(curve: &Curve) -> Self {
        Self {
            id: curve.id(),
            name: curve.name().to_string(),
            control_points: curve
                .control_points()
                .iter()
                .map(ControlPointRecord::from)
                .collect(),
            color: curve.color().to_string(),
            visible: curve.is_visible(),
            locked: curve.is_locked(),
        }
    }
}

impl From<CurveRecord> for Curve {
    fn from(record: CurveRecord) -> Self {
        let points = record
            .control_points
            .into_iter()
            .map(ControlPoint::from)
            .collect();
        Curve::from_parts(
            record.id,
            record.name,
            points,
            record.color,
            record.visible,
            record.locked,
        )
    }
}

impl Serialize for Curve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CurveRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Curve {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CurveRecord::deserialize(deserializer).map(Curve::from)
    }
}
