//! Selektionszustand: ausgewählte Kurven/Punkte, aktiver Handle und Pick-Historie.
//!
//! Die Selektion hält nur IDs (`CurveId`, `PointId`), keine Referenzen.
//! Nach einem Undo/Redo wird sie über [`SelectionPoint::rebind_to`] auf die
//! wiederhergestellten Kurven abgeglichen.

use super::control_point::PointId;
use super::curve::{Curve, CurveId};
use glam::DVec2;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Maximale Länge der Pick-Historie.
pub const SELECTION_HISTORY_LEN: usize = 32;

/// Welcher Teil eines Kontrollpunkts ausgewählt ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointHandle {
    /// Der Punkt selbst
    #[default]
    Point,
    /// Vorwärts-Handle (ausgehendes Segment)
    Forward,
    /// Rückwärts-Handle (eingehendes Segment)
    Backward,
}

/// Ein früher gepicktes (Kurve, Punkt, Handle)-Tripel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionHistoryEntry {
    pub curve: CurveId,
    pub point: PointId,
    pub handle: PointHandle,
}

/// Strukturell abgeleiteter Zustand der Selektion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Weder Kurven noch Punkte
    Empty,
    /// Genau ein Punkt
    SinglePoint,
    /// Mindestens zwei Punkte (z.B. Box-Selektion)
    MultiPoint,
    /// Nur Kurven, keine Punkte (Sichtbarkeit, Sperre, Name)
    CurveOnly,
}

/// Selektion mehrerer Kurven/Punkte.
///
/// Invariante: `curves.len() == points.len()` (private Felder, nur über Methoden änderbar).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionPoint {
    curves: Vec<CurveId>,
    points: Vec<Option<PointId>>,
    /// Aktiver Handle (gilt für alle selektierten Punkte)
    pub handle: PointHandle,
    history: VecDeque<SelectionHistoryEntry>,
    /// Weltposition der letzten Pick-Anfrage
    pub last_query: DVec2,
}

impl SelectionPoint {
    /// Erstellt eine leere Selektion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selektion genau eines (Kurve, Punkt)-Paars.
    pub fn single(curve: CurveId, point: Option<PointId>, handle: PointHandle) -> Self {
        let mut selection = Self::new();
        selection.push(curve, point);
        selection.handle = handle;
        selection
    }

    /// Reine Kurven-Selektion ohne Punkt.
    pub fn curve_only(curve: CurveId) -> Self {
        Self::single(curve, None, PointHandle::Point)
    }

    /// Fügt ein (Kurve, Punkt)-Paar hinzu.
    pub fn push(&mut self, curve: CurveId, point: Option<PointId>) {
        self.curves.push(curve);
        self.points.push(point);
    }

    /// Entfernt alle Kurven und Punkte, Historie bleibt erhalten.
    pub fn clear_targets(&mut self) {
        self.curves.clear();
        self.points.clear();
        self.handle = PointHandle::Point;
    }

    pub fn curves(&self) -> &[CurveId] {
        &self.curves
    }

    pub fn points(&self) -> &[Option<PointId>] {
        &self.points
    }

    /// Alle (Kurve, Punkt)-Paare in Selektionsreihenfolge.
    pub fn pairs(&self) -> impl Iterator<Item = (CurveId, Option<PointId>)> + '_ {
        self.curves.iter().copied().zip(self.points.iter().copied())
    }

    /// Nur Paare mit gesetztem Punkt.
    pub fn selected_points(&self) -> impl Iterator<Item = (CurveId, PointId)> + '_ {
        self.pairs()
            .filter_map(|(curve, point)| point.map(|point| (curve, point)))
    }

    /// Aktive Kurve (erste der Selektion).
    pub fn active_curve(&self) -> Option<CurveId> {
        self.curves.first().copied()
    }

    /// Erster selektierter Punkt.
    pub fn active_point(&self) -> Option<(CurveId, PointId)> {
        self.selected_points().next()
    }

    pub fn contains_point(&self, curve: CurveId, point: PointId) -> bool {
        self.selected_points().any(|pair| pair == (curve, point))
    }

    pub fn has_any_curves(&self) -> bool {
        !self.curves.is_empty()
    }

    pub fn has_any_points(&self) -> bool {
        self.points.iter().any(Option::is_some)
    }

    /// Leitet den Zustand aus Kurven- und Punktanzahl ab.
    pub fn kind(&self) -> SelectionKind {
        match self.selected_points().count() {
            0 if self.curves.is_empty() => SelectionKind::Empty,
            0 => SelectionKind::CurveOnly,
            1 => SelectionKind::SinglePoint,
            _ => SelectionKind::MultiPoint,
        }
    }

    pub fn is_single_point(&self) -> bool {
        self.kind() == SelectionKind::SinglePoint
    }

    /// Pick-Historie, älteste zuerst.
    pub fn history(&self) -> impl Iterator<Item = &SelectionHistoryEntry> {
        self.history.iter()
    }

    pub fn history_is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Index des jüngsten Vorkommens in der Historie (größer = jünger).
    pub fn history_rank(&self, entry: &SelectionHistoryEntry) -> Option<usize> {
        self.history.iter().rposition(|e| e == entry)
    }

    fn record_history(&mut self, entry: SelectionHistoryEntry) {
        self.history.push_back(entry);
        while self.history.len() > SELECTION_HISTORY_LEN {
            self.history.pop_front();
        }
    }

    /// Übernimmt das Ergebnis eines Picks.
    ///
    /// Ein leerer Pick (Klick ins Leere) wählt Punkte ab, behält aber die aktive Kurve.
    /// Der neu gewählte Punkt wird in die Historie eingetragen, damit der nächste
    /// Pick an derselben Stelle ihn als "zuletzt gewählt" erkennt.
    pub fn select_point(&mut self, picked: SelectionPoint) {
        if picked.curves.is_empty() {
            let active = self.active_curve();
            self.curves.clear();
            self.points.clear();
            if let Some(curve) = active {
                self.push(curve, None);
            }
        } else {
            self.curves = picked.curves;
            self.points = picked.points;
        }
        self.handle = picked.handle;

        if let Some((curve, point)) = self.active_point() {
            self.record_history(SelectionHistoryEntry {
                curve,
                point,
                handle: self.handle,
            });
        }
    }

    /// Gleicht die Selektion mit (wiederhergestellten) Kurven über ihre IDs ab.
    ///
    /// Unbekannte Kurven fallen heraus, unbekannte Punkte werden zu `None`.
    /// Die Pick-Historie wird verworfen.
    pub fn rebind_to(&mut self, curves: &IndexMap<CurveId, Curve>) {
        let pairs: Vec<(CurveId, Option<PointId>)> = self
            .pairs()
            .filter_map(|(curve_id, point)| {
                let curve = curves.get(&curve_id)?;
                Some((curve_id, point.filter(|id| curve.point(*id).is_some())))
            })
            .collect();

        self.curves.clear();
        self.points.clear();
        for (curve, point) in pairs {
            self.push(curve, point);
        }
        if !self.has_any_points() {
            self.handle = PointHandle::Point;
        }
        self.history.clear();
    }
}
