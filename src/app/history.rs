use crate::core::{Curve, CurveId};
use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// Undo-Zustand eines Bearbeitungsschritts.
///
/// Strukturelle Kopie aller Kurven (inkl. IDs, ohne LUTs). Die Selektion wird
/// nicht mitgesichert, sondern nach dem Wiederherstellen über die IDs neu gebunden.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Alle Kurven in Z-Order
    pub curves: IndexMap<CurveId, Curve>,
}

impl Snapshot {
    /// Erstellt einen Snapshot des aktuellen Kurvenzustands.
    pub fn from_state(state: &crate::app::AppState) -> Self {
        Self {
            curves: state.curves.curve_map().clone(),
        }
    }

    /// Stellt den Snapshot wieder her und bindet die Selektion neu.
    pub fn apply_to(self, state: &mut crate::app::AppState) {
        state.curves.restore_curves(self.curves);
    }
}

/// Undo/Redo-Manager mit Snapshotting und entprellten Pushes.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
    debounce: Duration,
    last_push: Option<Instant>,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe (ohne Entprellung).
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
            debounce: Duration::ZERO,
            last_push: None,
        }
    }

    /// Setzt das Entprellfenster für [`EditHistory::record_snapshot`].
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Nimmt einen Snapshot auf, sofern das Entprellfenster seit dem letzten
    /// akzeptierten Push abgelaufen ist. Leert den Redo-Stack.
    ///
    /// Gibt `false` zurück, wenn der Push verworfen wurde.
    pub fn record_snapshot(&mut self, snap: Snapshot) -> bool {
        self.record_snapshot_at(snap, Instant::now())
    }

    /// Wie [`EditHistory::record_snapshot`] mit explizitem Zeitpunkt.
    pub fn record_snapshot_at(&mut self, snap: Snapshot, now: Instant) -> bool {
        if let Some(last) = self.last_push {
            if now.saturating_duration_since(last) < self.debounce {
                log::debug!("Undo-Push innerhalb von {:?} verworfen", self.debounce);
                return false;
            }
        }

        if self.max_depth == 0 {
            return false;
        }
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
        self.last_push = Some(now);
        true
    }

    /// Verwirft den zuletzt aufgenommenen Snapshot (spekulativer Push ohne Wirkung).
    ///
    /// Setzt auch das Entprellfenster zurück.
    pub fn delete_last(&mut self) -> Option<Snapshot> {
        self.last_push = None;
        self.undo_stack.pop()
    }

    /// Liegt mindestens ein Snapshot auf dem Undo-Stack?
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Liegt mindestens ein Snapshot auf dem Redo-Stack?
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Tauscht den jüngsten Undo-Snapshot gegen `current` (landet auf dem Redo-Stack).
    ///
    /// Setzt das Entprellfenster zurück: der nächste Push nach einem Undo zählt immer.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop()?;
        self.last_push = None;
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Tauscht den jüngsten Redo-Snapshot gegen `current` (landet auf dem Undo-Stack).
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.last_push = None;
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(current);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::core::{ControlPoint, ControlPointType};
    use glam::DVec2;

    fn make_snapshot_with_point_count(count: usize) -> Snapshot {
        let points = (0..count)
            .map(|i| {
                ControlPoint::with_flat_handles(
                    ControlPointType::Linear,
                    DVec2::new(i as f64 * 10.0, i as f64),
                    2.0,
                )
            })
            .collect();
        let mut curves = IndexMap::new();
        curves.insert(0, Curve::with_points("c", points));
        Snapshot { curves }
    }

    fn point_count(snap: &Snapshot) -> usize {
        snap.curves.get(&0).map_or(0, Curve::len)
    }

    #[test]
    fn fresh_history_has_no_steps() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn accepted_push_offers_undo() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history.record_snapshot(make_snapshot_with_point_count(1)));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_hands_back_older_curve_map() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(make_snapshot_with_point_count(2));

        let current = make_snapshot_with_point_count(5);
        let restored = history
            .pop_undo_with_current(current)
            .expect("Undo-Schritt vorhanden");

        assert_eq!(point_count(&restored), 2);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_hands_back_undone_curve_map() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(make_snapshot_with_point_count(2));

        let _restored = history.pop_undo_with_current(make_snapshot_with_point_count(5));
        let redone = history
            .pop_redo_with_current(make_snapshot_with_point_count(2))
            .expect("Redo-Schritt vorhanden");

        assert_eq!(point_count(&redone), 5);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn accepted_push_drops_redo_steps() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(make_snapshot_with_point_count(1));

        let _restored = history.pop_undo_with_current(make_snapshot_with_point_count(3));
        assert!(history.can_redo());

        history.record_snapshot(make_snapshot_with_point_count(7));
        assert!(!history.can_redo());
    }

    #[test]
    fn oldest_steps_fall_out_at_depth_limit() {
        let mut history = EditHistory::new_with_capacity(3);
        for i in 1..=5 {
            history.record_snapshot(make_snapshot_with_point_count(i));
        }

        // Nur 3 Undo-Schritte, die ältesten wurden verdrängt
        assert_eq!(history.undo_len(), 3);
        let restored = history
            .pop_undo_with_current(make_snapshot_with_point_count(99))
            .expect("Undo-Schritt vorhanden");
        assert_eq!(point_count(&restored), 5);
    }

    #[test]
    fn pushes_inside_debounce_window_are_dropped() {
        let mut history =
            EditHistory::new_with_capacity(10).with_debounce(Duration::from_millis(250));
        let start = Instant::now();

        assert!(history.record_snapshot_at(make_snapshot_with_point_count(1), start));
        assert!(!history.record_snapshot_at(
            make_snapshot_with_point_count(2),
            start + Duration::from_millis(100)
        ));
        // Fenster zählt ab dem letzten akzeptierten Push
        assert!(!history.record_snapshot_at(
            make_snapshot_with_point_count(3),
            start + Duration::from_millis(249)
        ));
        assert!(history.record_snapshot_at(
            make_snapshot_with_point_count(4),
            start + Duration::from_millis(250)
        ));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn delete_last_resets_debounce() {
        let mut history =
            EditHistory::new_with_capacity(10).with_debounce(Duration::from_millis(250));
        let start = Instant::now();

        history.record_snapshot_at(make_snapshot_with_point_count(1), start);
        assert!(history.delete_last().is_some());
        assert!(!history.can_undo());
        assert!(history.record_snapshot_at(
            make_snapshot_with_point_count(2),
            start + Duration::from_millis(10)
        ));
    }

    #[test]
    fn push_right_after_undo_is_accepted_and_drops_redo() {
        let mut history =
            EditHistory::new_with_capacity(10).with_debounce(Duration::from_millis(250));
        let start = Instant::now();

        assert!(history.record_snapshot_at(make_snapshot_with_point_count(1), start));
        assert!(history
            .pop_undo_with_current(make_snapshot_with_point_count(2))
            .is_some());
        assert!(history.can_redo());

        assert!(history.record_snapshot_at(
            make_snapshot_with_point_count(1),
            start + Duration::from_millis(5)
        ));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_without_steps_keeps_redo_empty() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history
            .pop_undo_with_current(make_snapshot_with_point_count(1))
            .is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn redo_without_steps_is_none() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history
            .pop_redo_with_current(make_snapshot_with_point_count(1))
            .is_none());
    }

    #[test]
    fn snapshot_carries_curves_between_states() {
        let mut original_state = AppState::new();
        let curve_id = original_state.curves.add_curve(Curve::new("A"));
        original_state.curves.add_point(curve_id, 4.0);

        let snap = Snapshot::from_state(&original_state);

        let mut target_state = AppState::new();
        snap.apply_to(&mut target_state);

        assert_eq!(target_state.curves.curve_count(), 1);
        assert_eq!(target_state.curves.curve(curve_id).map(Curve::len), Some(1));
    }
}
