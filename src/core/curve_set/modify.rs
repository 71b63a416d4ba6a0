//! Eingeschränkte Punkt-Mutationen: Verschieben, Handle-Clamping,
//! Kontinuitäts-Spiegelung, Typwechsel und Frame-Snapping.

use super::CurveSet;
use crate::core::control_point::{ControlPoint, ControlPointType};
use crate::core::curve::CurveId;
use crate::core::selection::{PointHandle, SelectionPoint};
use glam::DVec2;

/// Bewegung eines selektierten Punkts oder Handles.
///
/// `Δ = (target − current) ⊙ target_scale + delta ⊙ delta_scale`, wobei
/// `current` je nach aktivem Handle Position, Vorwärts- oder Rückwärts-Handle ist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMovement {
    pub target: DVec2,
    pub target_scale: DVec2,
    pub delta: DVec2,
    pub delta_scale: DVec2,
}

impl PointMovement {
    /// Absolute Bewegung auf `target`.
    pub fn to(target: DVec2) -> Self {
        Self::to_scaled(target, DVec2::ONE)
    }

    /// Absolute Bewegung, pro Achse gewichtet (z.B. `DVec2::Y` = nur Wert).
    pub fn to_scaled(target: DVec2, target_scale: DVec2) -> Self {
        Self {
            target,
            target_scale,
            delta: DVec2::ZERO,
            delta_scale: DVec2::ZERO,
        }
    }

    /// Relative Bewegung um `delta`.
    pub fn by(delta: DVec2) -> Self {
        Self {
            target: DVec2::ZERO,
            target_scale: DVec2::ZERO,
            delta,
            delta_scale: DVec2::ONE,
        }
    }

    /// Alle Komponenten endlich (kein NaN, kein ±∞).
    pub fn is_finite(&self) -> bool {
        self.target.is_finite()
            && self.target_scale.is_finite()
            && self.delta.is_finite()
            && self.delta_scale.is_finite()
    }

    fn delta_from(&self, current: DVec2) -> DVec2 {
        (self.target - current) * self.target_scale + self.delta * self.delta_scale
    }
}

impl CurveSet {
    /// Wendet `movement` auf alle selektierten (Kurve, Punkt)-Paare an.
    ///
    /// Paare ohne Punkt, unbekannte IDs und gesperrte Kurven werden übersprungen.
    /// Jede Mutation löscht die Pick-Historie der fokussierten Selektion,
    /// verwirft die LUTs und sortiert die Kurve neu.
    /// Gibt `true` zurück, wenn mindestens ein Punkt verändert wurde.
    pub fn modify_point(&mut self, selection: &SelectionPoint, movement: PointMovement) -> bool {
        if !selection.has_any_points() {
            log::debug!("Keine Punkte selektiert, Bewegung ignoriert");
            return false;
        }
        if !movement.is_finite() {
            log::warn!("Ungültige Bewegung ignoriert: {:?}", movement);
            return false;
        }

        self.selection.clear_history();
        let epsilon = self.config.continuity_epsilon;
        let handle = selection.handle;

        let mut changed = false;
        for (curve_id, point_id) in selection.selected_points() {
            let Some(curve) = self.curves.get_mut(&curve_id) else {
                continue;
            };
            if curve.locked {
                continue;
            }
            let Some(point) = curve.point_mut(point_id) else {
                continue;
            };

            apply_movement(point, handle, movement, epsilon);
            curve.sort_points();
            changed = true;
        }
        changed
    }

    /// Wie [`CurveSet::modify_point`], angewendet auf die fokussierte Selektion.
    pub fn modify_selected(&mut self, movement: PointMovement) -> bool {
        let selection = self.selection.clone();
        self.modify_point(&selection, movement)
    }

    /// Setzt den Interpolationstyp aller selektierten Punkte.
    pub fn set_point_type(&mut self, selection: &SelectionPoint, kind: ControlPointType) -> bool {
        self.for_each_selected_point(selection, |point| point.kind = kind)
    }

    /// Rundet die Frames aller selektierten Punkte (nach Multi-Punkt-Drag).
    pub fn normalize_point_frames(&mut self, selection: &SelectionPoint) -> bool {
        self.for_each_selected_point(selection, |point| {
            let frame = point.position.x;
            point.translate(DVec2::new(frame.round() - frame, 0.0));
        })
    }

    /// Verschiebt alle selektierten Punkte starr auf `frame` (gerundet).
    pub fn snap_frame(&mut self, selection: &SelectionPoint, frame: f64) -> bool {
        if !frame.is_finite() {
            return false;
        }
        let frame = frame.round();
        self.for_each_selected_point(selection, |point| {
            point.translate(DVec2::new(frame - point.position.x, 0.0));
        })
    }

    /// Setzt den Wert des Punkts, der bei `frame` angezeigt wird
    /// (siehe [`crate::core::Curve::point_holding_frame`]).
    ///
    /// Liegt `frame` innerhalb eines Segments, passiert nichts.
    pub fn set_value_at_frame(&mut self, curve_id: CurveId, frame: f64, value: f64) -> bool {
        let Some(point_id) = self
            .curve(curve_id)
            .and_then(|curve| curve.point_holding_frame(frame))
            .map(ControlPoint::id)
        else {
            return false;
        };

        let selection = SelectionPoint::single(curve_id, Some(point_id), PointHandle::Point);
        self.modify_point(
            &selection,
            PointMovement::to_scaled(DVec2::new(0.0, value), DVec2::Y),
        )
    }

    fn for_each_selected_point(
        &mut self,
        selection: &SelectionPoint,
        mut apply: impl FnMut(&mut ControlPoint),
    ) -> bool {
        let mut changed = false;
        for (curve_id, point_id) in selection.selected_points() {
            let Some(curve) = self.curves.get_mut(&curve_id) else {
                continue;
            };
            if curve.locked {
                continue;
            }
            let Some(point) = curve.point_mut(point_id) else {
                continue;
            };
            apply(point);
            curve.sort_points();
            changed = true;
        }
        changed
    }
}

fn apply_movement(
    point: &mut ControlPoint,
    handle: PointHandle,
    movement: PointMovement,
    epsilon: f64,
) {
    match handle {
        PointHandle::Point => {
            let mut movement = movement;
            movement.target.x = movement.target.x.round();

            let mut delta = movement.delta_from(point.position);
            // Frame landet immer auf einem ganzen Frame, Handles bewegen sich starr mit
            delta.x = (point.position.x + delta.x).round() - point.position.x;
            point.translate(delta);
        }
        PointHandle::Forward => {
            let mut next = point.forward_handle + movement.delta_from(point.forward_handle);
            next.x = next.x.max(point.position.x);
            point.forward_handle = next;

            if point.kind == ControlPointType::BezierContinuous {
                point.backwards_handle =
                    mirror_handle(point.position, next, point.backwards_handle, -epsilon);
            }
        }
        PointHandle::Backward => {
            let mut next = point.backwards_handle + movement.delta_from(point.backwards_handle);
            next.x = next.x.min(point.position.x);
            point.backwards_handle = next;

            if point.kind == ControlPointType::BezierContinuous {
                point.forward_handle =
                    mirror_handle(point.position, next, point.forward_handle, epsilon);
            }
        }
    }
}

/// Spiegelt `moved` durch `position` und skaliert so, dass der Frame-Abstand
/// von `opposite` erhalten bleibt.
///
/// `substitute` ersetzt einen Nenner mit Betrag unter `|substitute|`.
fn mirror_handle(position: DVec2, moved: DVec2, opposite: DVec2, substitute: f64) -> DVec2 {
    let mut negated = position - moved;
    if negated.x.abs() < substitute.abs() {
        negated.x = substitute;
    }
    let scale = (opposite.x - position.x) / negated.x;
    position + negated * scale
}
