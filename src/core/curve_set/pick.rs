//! Punkt-Picking mit Mehrdeutigkeits-Auflösung über die Pick-Historie.

use super::CurveSet;
use crate::core::curve::CurveId;
use crate::core::math::{point_in_corner_box, squared_distance};
use crate::core::selection::{PointHandle, SelectionHistoryEntry, SelectionKind, SelectionPoint};
use glam::DVec2;

impl CurveSet {
    /// Sucht den Punkt/Handle unter `query` (Weltkoordinaten).
    ///
    /// `threshold_sq` ist der quadrierte Pick-Radius in Welteinheiten
    /// (siehe `GridProjection::selection_distance_sq`). Die fokussierte Selektion
    /// wird nicht verändert, nur `last_query` wird aktualisiert.
    ///
    /// Liegt `query` nahe der vorherigen Anfrage und existiert eine Historie,
    /// gewinnt der am längsten nicht mehr gewählte Kandidat (Durchschalten
    /// übereinanderliegender Punkte). Sonst gewinnen Kandidaten der aktiven
    /// Kurve vor anderen und Handles vor Punkten.
    pub fn try_select_point(&mut self, query: DVec2, threshold_sq: f64) -> SelectionPoint {
        let candidates = self.pick_candidates(query, threshold_sq);

        let use_history = !self.selection.history_is_empty()
            && squared_distance(self.selection.last_query, query) < threshold_sq;

        let winner = if use_history {
            // None (nie gewählt) sortiert vor jedem Historien-Index
            candidates
                .iter()
                .min_by_key(|entry| self.selection.history_rank(entry))
                .copied()
        } else {
            let active_curve = self.selection.active_curve();
            candidates
                .iter()
                .min_by_key(|entry| static_rank(entry, active_curve))
                .copied()
        };

        self.selection.last_query = query;

        match winner {
            Some(entry) => SelectionPoint::single(entry.curve, Some(entry.point), entry.handle),
            None => SelectionPoint::new(),
        }
    }

    /// Pickt unter `query` und übernimmt das Ergebnis in die fokussierte Selektion.
    pub fn pick_point(&mut self, query: DVec2, threshold_sq: f64) -> SelectionKind {
        let picked = self.try_select_point(query, threshold_sq);
        self.selection.select_point(picked);
        self.selection.kind()
    }

    /// Box-Selektion über alle sichtbaren, entsperrten Kurven (halboffen `[min, max)`).
    ///
    /// Die Selektion wird nur ersetzt, wenn mindestens ein Punkt getroffen wurde.
    pub fn select_in_box(&mut self, corner_a: DVec2, corner_b: DVec2) -> bool {
        let mut selection = SelectionPoint::new();
        for curve in self.curves.values() {
            if !curve.visible || curve.locked {
                continue;
            }
            for point in curve.control_points() {
                if point_in_corner_box(point.position, corner_a, corner_b) {
                    selection.push(curve.id, Some(point.id));
                }
            }
        }

        if !selection.has_any_curves() {
            return false;
        }
        log::debug!(
            "Box-Selektion: {} Punkte",
            selection.selected_points().count()
        );
        self.selection.select_point(selection);
        true
    }

    /// Setzt eine reine Kurven-Selektion (Eigenschafts-Klick).
    pub fn focus_curve(&mut self, curve_id: CurveId) -> bool {
        if !self.curves.contains_key(&curve_id) {
            return false;
        }
        self.selection
            .select_point(SelectionPoint::curve_only(curve_id));
        true
    }

    /// Hebt die Selektion komplett auf (Historie bleibt).
    pub fn clear_selection(&mut self) {
        self.selection.clear_targets();
    }

    fn pick_candidates(&self, query: DVec2, threshold_sq: f64) -> Vec<SelectionHistoryEntry> {
        let within = |target: DVec2| squared_distance(query, target) < threshold_sq;
        let mut candidates = Vec::new();

        for curve in self.curves.values() {
            if !curve.visible || curve.locked {
                continue;
            }

            let points = curve.control_points();
            for (index, point) in points.iter().enumerate() {
                if within(point.position) {
                    candidates.push(SelectionHistoryEntry {
                        curve: curve.id,
                        point: point.id,
                        handle: PointHandle::Point,
                    });
                }

                // Handles sind erst pickbar, wenn ihr Punkt selektiert ist
                if !self.selection.contains_point(curve.id, point.id) {
                    continue;
                }

                if point.kind.is_bezier() && within(point.forward_handle) {
                    candidates.push(SelectionHistoryEntry {
                        curve: curve.id,
                        point: point.id,
                        handle: PointHandle::Forward,
                    });
                }

                // Der Rückwärts-Handle gehört zum eingehenden Segment
                let previous_is_bezier = index
                    .checked_sub(1)
                    .and_then(|i| points.get(i))
                    .is_some_and(|previous| previous.kind.is_bezier());
                if previous_is_bezier && within(point.backwards_handle) {
                    candidates.push(SelectionHistoryEntry {
                        curve: curve.id,
                        point: point.id,
                        handle: PointHandle::Backward,
                    });
                }
            }
        }

        candidates
    }
}

fn static_rank(entry: &SelectionHistoryEntry, active_curve: Option<CurveId>) -> i32 {
    let mut rank = 0;
    if Some(entry.curve) == active_curve {
        rank -= 2;
    }
    if entry.handle != PointHandle::Point {
        rank -= 1;
    }
    rank
}
