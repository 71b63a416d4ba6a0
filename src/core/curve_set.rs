//! Container aller Kurven plus fokussierte Selektion.
//!
//! Punkt-Picking liegt in `pick`, eingeschränkte Punkt-Mutationen in `modify`.

mod modify;
mod pick;

pub use modify::PointMovement;

use super::control_point::{ControlPoint, ControlPointType, PointId};
use super::curve::{Curve, CurveId};
use super::selection::SelectionPoint;
use glam::DVec2;
use indexmap::IndexMap;

/// Farbpalette für neue Kurven (Vergabe in Einfügereihenfolge).
pub const DEFAULT_CURVE_PALETTE: [&str; 15] = [
    "#FF0000", "#00FF00", "#00aeff", "#ffe119", "#f58231", "#42d4f4", "#f032e6", "#fabebe",
    "#469990", "#e6beff", "#9A6324", "#fffac8", "#800000", "#aaffc3", "#000075",
];

/// Ersatz-Nenner beim Spiegeln kontinuierlicher Handles.
pub const CONTINUITY_EPSILON: f64 = 1e-4;

/// Handle-Abstand (Frames) für Punkte ohne Nachbarsegment.
pub const DEFAULT_HANDLE_FRAMES: f64 = 10.0;

/// Von außen übergebene Bearbeitungs-Parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSetConfig {
    /// Farben für neue Kurven, zyklisch vergeben
    pub palette: Vec<String>,
    /// Minimaler Betrag des Nenners beim Handle-Spiegeln
    pub continuity_epsilon: f64,
}

impl Default for CurveSetConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_CURVE_PALETTE.iter().map(|c| c.to_string()).collect(),
            continuity_epsilon: CONTINUITY_EPSILON,
        }
    }
}

/// Alle Kurven des Editors in Einfügereihenfolge (= Z-Order).
#[derive(Debug, Clone, Default)]
pub struct CurveSet {
    curves: IndexMap<CurveId, Curve>,
    /// Aktuell fokussierte Selektion
    pub selection: SelectionPoint,
    config: CurveSetConfig,
}

impl CurveSet {
    /// Erstellt ein leeres CurveSet mit Standard-Konfiguration.
    pub fn new() -> Self {
        Self::with_config(CurveSetConfig::default())
    }

    pub fn with_config(config: CurveSetConfig) -> Self {
        Self {
            curves: IndexMap::new(),
            selection: SelectionPoint::new(),
            config,
        }
    }

    /// Übernimmt geladene Kurven samt ihrer IDs; doppelte IDs werden neu vergeben.
    pub fn from_curves(curves: Vec<Curve>, config: CurveSetConfig) -> Self {
        let mut set = Self::with_config(config);
        for mut curve in curves {
            if set.curves.contains_key(&curve.id) {
                let new_id = set.next_curve_id();
                log::warn!(
                    "Doppelte Kurven-ID {} ('{}'), vergebe {}",
                    curve.id,
                    curve.name,
                    new_id
                );
                curve.id = new_id;
            }
            set.curves.insert(curve.id, curve);
        }
        if let Some(first) = set.curves.keys().next().copied() {
            set.selection = SelectionPoint::curve_only(first);
        }
        set
    }

    pub fn config(&self) -> &CurveSetConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CurveSetConfig) {
        self.config = config;
    }

    /// Alle Kurven in Z-Order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.curves.values()
    }

    /// Read-only Sicht auf die ID→Kurve-Zuordnung (für Snapshots).
    pub fn curve_map(&self) -> &IndexMap<CurveId, Curve> {
        &self.curves
    }

    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(&id)
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Nächste freie Kurven-ID (fortlaufend ab 0).
    pub fn next_curve_id(&self) -> CurveId {
        self.curves.keys().max().map_or(0, |max| max + 1)
    }

    /// Fügt eine Kurve hinzu: fortlaufende ID, Palettenfarbe nach Einfügereihenfolge.
    ///
    /// Ist noch keine Kurve aktiv, wird die neue Kurve aktiv.
    pub fn add_curve(&mut self, mut curve: Curve) -> CurveId {
        let id = self.next_curve_id();
        curve.id = id;
        if !self.config.palette.is_empty() {
            let index = self.curves.len() % self.config.palette.len();
            curve.color = self.config.palette[index].clone();
        }
        self.curves.insert(id, curve);

        if self.selection.active_curve().is_none() {
            self.selection.select_point(SelectionPoint::curve_only(id));
        }
        id
    }

    /// Fügt einen Keyframe bei `frame` ein, ohne den Kurvenverlauf sichtbar zu ändern.
    ///
    /// Wert = `evaluate(frame)`, Typ vom einschließenden Punkt, Handles bei
    /// ± einem Viertel der lokalen Segmentlänge. Liegt bereits ein Punkt auf
    /// `frame`, wird dessen ID zurückgegeben.
    pub fn add_point(&mut self, curve_id: CurveId, frame: f64) -> Option<PointId> {
        if !frame.is_finite() {
            log::warn!("Ungültiger Frame {}, kein Keyframe eingefügt", frame);
            return None;
        }
        let curve = self.curves.get_mut(&curve_id)?;
        if curve.locked {
            log::debug!("Kurve {} ist gesperrt, kein Keyframe eingefügt", curve_id);
            return None;
        }
        if let Some(existing) = curve.point_at_frame(frame) {
            return Some(existing.id());
        }

        let info = curve.curve_information_at(frame);
        let kind = info
            .previous
            .or(info.next)
            .map_or(ControlPointType::default(), |p| p.kind());
        let handle_frames = if info.frames_between > 0.0 {
            info.frames_between / 4.0
        } else {
            DEFAULT_HANDLE_FRAMES
        };
        let value = curve.evaluate(frame);

        let point =
            ControlPoint::with_flat_handles(kind, DVec2::new(frame, value), handle_frames);
        Some(curve.insert_point(point))
    }

    /// Entfernt einen Punkt; die Selektion wird anschließend neu gebunden.
    pub fn delete_point(&mut self, curve_id: CurveId, point_id: PointId) -> Option<ControlPoint> {
        let curve = self.curves.get_mut(&curve_id)?;
        if curve.locked {
            log::debug!("Kurve {} ist gesperrt, Punkt bleibt erhalten", curve_id);
            return None;
        }
        let removed = curve.remove_point(point_id)?;
        self.selection.rebind_to(&self.curves);
        Some(removed)
    }

    /// Kleinster Frame über alle nicht-leeren Kurven (0 ohne Punkte).
    pub fn minimum_frame(&self) -> f64 {
        Curve::frame_range(self.curves.values()).0
    }

    /// Größter Frame über alle nicht-leeren Kurven (0 ohne Punkte).
    pub fn maximum_frame(&self) -> f64 {
        Curve::frame_range(self.curves.values()).1
    }

    /// Wertet alle Kurven bei `frame` aus.
    pub fn values_at(&self, frame: f64) -> impl Iterator<Item = (&Curve, f64)> + '_ {
        self.curves
            .values()
            .map(move |curve| (curve, curve.evaluate(frame)))
    }

    pub fn set_curve_visible(&mut self, curve_id: CurveId, visible: bool) -> bool {
        self.with_curve(curve_id, |curve| curve.visible = visible)
    }

    pub fn set_curve_locked(&mut self, curve_id: CurveId, locked: bool) -> bool {
        self.with_curve(curve_id, |curve| curve.locked = locked)
    }

    /// Schaltet die Sichtbarkeit um und liefert den neuen Wert.
    pub fn toggle_visible(&mut self, curve_id: CurveId) -> Option<bool> {
        let curve = self.curves.get_mut(&curve_id)?;
        curve.visible = !curve.visible;
        Some(curve.visible)
    }

    /// Schaltet die Sperre um und liefert den neuen Wert.
    pub fn toggle_locked(&mut self, curve_id: CurveId) -> Option<bool> {
        let curve = self.curves.get_mut(&curve_id)?;
        curve.locked = !curve.locked;
        Some(curve.locked)
    }

    pub fn rename_curve(&mut self, curve_id: CurveId, name: impl Into<String>) -> bool {
        let name = name.into();
        self.with_curve(curve_id, |curve| curve.name = name)
    }

    fn with_curve(&mut self, curve_id: CurveId, apply: impl FnOnce(&mut Curve)) -> bool {
        match self.curves.get_mut(&curve_id) {
            Some(curve) => {
                apply(curve);
                true
            }
            None => false,
        }
    }

    /// Ersetzt alle Kurven (Undo/Redo) und bindet die Selektion neu.
    pub(crate) fn restore_curves(&mut self, curves: IndexMap<CurveId, Curve>) {
        self.curves = curves;
        self.selection.rebind_to(&self.curves);
    }
}

#[cfg(test)]
mod tests;
