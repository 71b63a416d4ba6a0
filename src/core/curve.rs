//! Ein benannter Kurven-Track: sortierte Kontrollpunkte und deren Auswertung.

use super::control_point::{ControlPoint, ControlPointType, PointId};
use super::math::lerp;
use glam::DVec2;

/// Stabile ID einer Kurve innerhalb eines `CurveSet`.
pub type CurveId = u64;

/// Standardfarbe einer noch nicht eingefügten Kurve.
pub const DEFAULT_CURVE_COLOR: &str = "#00FF00";
/// Standardname, falls im Austauschformat keiner angegeben ist.
pub const DEFAULT_CURVE_NAME: &str = "Unnamed Curve";

/// Spannen unterhalb dieser Größe gelten bei der Interpolation als leer.
const SPAN_EPSILON: f64 = 1e-12;

/// Ergebnis von [`Curve::curve_information_at`].
///
/// - vor dem ersten Punkt: `previous = None`, `t = 0`, `frames_between` = Abstand zum ersten Punkt
/// - ab dem letzten Punkt: `next = None`, `t = 1`, `frames_between` = Abstand zum letzten Punkt
/// - dazwischen: `t = frames_from_first / frames_between`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveInformation<'a> {
    pub previous: Option<&'a ControlPoint>,
    pub next: Option<&'a ControlPoint>,
    pub frames_between: f64,
    pub frames_from_first: f64,
    pub t: f64,
}

impl CurveInformation<'_> {
    fn empty() -> Self {
        Self {
            previous: None,
            next: None,
            frames_between: 0.0,
            frames_from_first: 0.0,
            t: 0.0,
        }
    }
}

/// Skalarer Animations-Track.
///
/// Invariante: `control_points` ist stets aufsteigend nach Frame sortiert.
/// Eine leere Kurve ist erlaubt; alle Frame-Abfragen liefern dann 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub(crate) id: CurveId,
    pub(crate) name: String,
    control_points: Vec<ControlPoint>,
    pub(crate) color: String,
    pub(crate) visible: bool,
    pub(crate) locked: bool,
    next_point_id: PointId,
}

impl Curve {
    /// Erstellt eine leere, sichtbare, entsperrte Kurve (ID wird beim Einfügen vergeben).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            control_points: Vec::new(),
            color: DEFAULT_CURVE_COLOR.to_string(),
            visible: true,
            locked: false,
            next_point_id: 0,
        }
    }

    /// Erstellt eine Kurve aus bestehenden Punkten (werden sortiert und nummeriert).
    pub fn with_points(name: impl Into<String>, points: Vec<ControlPoint>) -> Self {
        let mut curve = Self::new(name);
        for point in points {
            curve.push_unsorted(point);
        }
        curve.sort_points();
        curve
    }

    /// Baut eine Kurve aus den Feldern des Austauschformats wieder auf.
    pub(crate) fn from_parts(
        id: CurveId,
        name: String,
        points: Vec<ControlPoint>,
        color: String,
        visible: bool,
        locked: bool,
    ) -> Self {
        let mut curve = Self::with_points(name, points);
        curve.id = id;
        curve.color = color;
        curve.visible = visible;
        curve.locked = locked;
        curve
    }

    pub fn id(&self) -> CurveId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Sortierte Kontrollpunkte (read-only).
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Index eines Punkts in der sortierten Folge.
    pub fn point_index(&self, point_id: PointId) -> Option<usize> {
        self.control_points.iter().position(|p| p.id == point_id)
    }

    /// Findet einen Punkt über seine ID.
    pub fn point(&self, point_id: PointId) -> Option<&ControlPoint> {
        self.control_points.iter().find(|p| p.id == point_id)
    }

    pub(crate) fn point_mut(&mut self, point_id: PointId) -> Option<&mut ControlPoint> {
        self.control_points.iter_mut().find(|p| p.id == point_id)
    }

    /// Punkt, der exakt auf `frame` liegt.
    pub fn point_at_frame(&self, frame: f64) -> Option<&ControlPoint> {
        self.control_points.iter().find(|p| p.position.x == frame)
    }

    /// Punkt, dessen Wert bei `frame` unverändert angezeigt wird.
    ///
    /// Das ist ein Punkt exakt auf `frame` oder der gehaltene Randpunkt vor dem
    /// ersten bzw. nach dem letzten Punkt. Innerhalb eines Segments: `None`.
    pub fn point_holding_frame(&self, frame: f64) -> Option<&ControlPoint> {
        if !frame.is_finite() {
            return None;
        }
        let info = self.curve_information_at(frame);
        if info.frames_from_first == 0.0 {
            if let Some(previous) = info.previous {
                return Some(previous);
            }
        }
        if info.frames_from_first == info.frames_between {
            return info.next;
        }
        None
    }

    /// Fügt einen Punkt ein, vergibt eine neue ID und sortiert neu.
    pub(crate) fn insert_point(&mut self, point: ControlPoint) -> PointId {
        let id = self.push_unsorted(point);
        self.sort_points();
        id
    }

    /// Entfernt einen Punkt; die LUTs der Nachbarn werden verworfen.
    pub(crate) fn remove_point(&mut self, point_id: PointId) -> Option<ControlPoint> {
        let index = self.point_index(point_id)?;
        let removed = self.control_points.remove(index);
        self.invalidate_luts();
        Some(removed)
    }

    fn push_unsorted(&mut self, mut point: ControlPoint) -> PointId {
        let id = self.next_point_id;
        self.next_point_id += 1;
        point.id = id;
        point.invalidate_lut();
        self.control_points.push(point);
        id
    }

    /// Stellt die Frame-Sortierung wieder her (stabil) und verwirft alle LUTs.
    pub(crate) fn sort_points(&mut self) {
        self.control_points
            .sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
        self.invalidate_luts();
    }

    /// Verwirft alle gecachten Segment-LUTs.
    pub(crate) fn invalidate_luts(&mut self) {
        for point in &mut self.control_points {
            point.invalidate_lut();
        }
    }

    /// Erster Frame der Kurve (0 bei leerer Kurve).
    pub fn minimum_frame(&self) -> f64 {
        self.control_points.first().map_or(0.0, |p| p.position.x)
    }

    /// Letzter Frame der Kurve (0 bei leerer Kurve).
    pub fn maximum_frame(&self) -> f64 {
        self.control_points.last().map_or(0.0, |p| p.position.x)
    }

    /// Gemeinsamer Frame-Bereich `(min, max)` mehrerer Kurven.
    ///
    /// Leere Kurven zählen nicht; ohne Punkte `(0, 0)`.
    pub fn frame_range<'a>(curves: impl IntoIterator<Item = &'a Curve>) -> (f64, f64) {
        curves
            .into_iter()
            .filter(|curve| !curve.is_empty())
            .map(|curve| (curve.minimum_frame(), curve.maximum_frame()))
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
            .unwrap_or((0.0, 0.0))
    }

    /// Kleinster Wert über alle Segmente (Bézier über die LUT).
    pub fn minimum_value(&self) -> f64 {
        self.fold_segment_values(f64::min)
    }

    /// Größter Wert über alle Segmente (Bézier über die LUT).
    pub fn maximum_value(&self) -> f64 {
        self.fold_segment_values(f64::max)
    }

    fn fold_segment_values(&self, pick: fn(f64, f64) -> f64) -> f64 {
        let Some(first) = self.control_points.first() else {
            return 0.0;
        };

        let mut result = first.position.y;
        for (index, point) in self.control_points.iter().enumerate() {
            result = pick(result, point.position.y);
            let Some(next) = self.control_points.get(index + 1) else {
                continue;
            };
            if point.kind.is_bezier() {
                for sample in point.lut(next) {
                    result = pick(result, sample.y);
                }
            } else {
                result = pick(result, next.position.y);
            }
        }
        result
    }

    /// Findet die beiden Punkte, die `frame` einschließen.
    pub fn curve_information_at(&self, frame: f64) -> CurveInformation<'_> {
        let (Some(first), Some(last)) = (self.control_points.first(), self.control_points.last())
        else {
            return CurveInformation::empty();
        };

        // NaN hält wie ein Frame vor dem ersten Punkt dessen Wert
        if frame.is_nan() {
            return CurveInformation {
                previous: None,
                next: Some(first),
                frames_between: 0.0,
                frames_from_first: 0.0,
                t: 0.0,
            };
        }

        if frame < first.position.x {
            let frames_between = first.position.x - frame;
            return CurveInformation {
                previous: None,
                next: Some(first),
                frames_between,
                frames_from_first: frames_between,
                t: 0.0,
            };
        }

        if frame >= last.position.x {
            return CurveInformation {
                previous: Some(last),
                next: None,
                frames_between: frame - last.position.x,
                frames_from_first: 0.0,
                t: 1.0,
            };
        }

        // first.x <= frame < last.x, daher 1 <= index < len
        let index = self
            .control_points
            .partition_point(|p| p.position.x <= frame);
        let previous = &self.control_points[index - 1];
        let next = &self.control_points[index];

        let frames_between = next.position.x - previous.position.x;
        let frames_from_first = frame - previous.position.x;
        let t = if frames_between.abs() > SPAN_EPSILON {
            frames_from_first / frames_between
        } else {
            0.0
        };

        CurveInformation {
            previous: Some(previous),
            next: Some(next),
            frames_between,
            frames_from_first,
            t,
        }
    }

    /// Wertet die Kurve an `frame` aus.
    ///
    /// Außerhalb des Frame-Bereichs wird der Randwert gehalten, eine leere Kurve liefert 0.
    /// NaN liefert den Wert des ersten Punkts.
    pub fn evaluate(&self, frame: f64) -> f64 {
        let info = self.curve_information_at(frame);
        let (previous, next) = match (info.previous, info.next) {
            (None, None) => return 0.0,
            (None, Some(next)) => return next.position.y,
            (Some(previous), None) => return previous.position.y,
            (Some(previous), Some(next)) => (previous, next),
        };

        if info.frames_from_first == 0.0 {
            return previous.position.y;
        }

        match previous.kind {
            ControlPointType::Linear => lerp(previous.position.y, next.position.y, info.t),
            ControlPointType::LinearFlat => previous.position.y,
            ControlPointType::Bezier | ControlPointType::BezierContinuous => {
                lut_value_at(previous.lut(next), frame)
            }
        }
    }
}

/// Sucht die einschließenden LUT-Samples nach Frame und interpoliert den Wert linear.
fn lut_value_at(lut: &[DVec2], frame: f64) -> f64 {
    let (Some(first), Some(last)) = (lut.first(), lut.last()) else {
        return 0.0;
    };

    if frame < first.x {
        return first.y;
    }
    if frame > last.x {
        return last.y;
    }

    // Die x-Werte einer Bézier sind nicht zwingend monoton: letztes Sample mit x <= frame.
    let index = lut[..lut.len() - 1]
        .iter()
        .rposition(|p| p.x <= frame)
        .unwrap_or(0);
    let Some(upper) = lut.get(index + 1) else {
        return lut[index].y;
    };
    let lower = lut[index];

    let span = upper.x - lower.x;
    if span.abs() <= SPAN_EPSILON {
        return lower.y;
    }
    lerp(lower.y, upper.y, (frame - lower.x) / span)
}
