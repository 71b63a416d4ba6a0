//! Zustands-Synchronisation mit einer zweiten Editor-Sitzung.
//!
//! Nachrichten: `{"event": "state", "data": {"frame", "curves"}}` und
//! `{"event": "close"}`. Empfangene Kurven landen nur in der [`OverrideSource`],
//! das eigene `CurveSet` bleibt unverändert.

use crate::core::Curve;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Zustands-Nutzlast einer `state`-Nachricht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// Aktueller Guide-Frame der sendenden Sitzung
    pub frame: f64,
    pub curves: Vec<Curve>,
}

/// Nachricht zwischen zwei Sitzungen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum SyncMessage {
    State(SyncState),
    Close,
}

impl SyncMessage {
    /// Baut eine `state`-Nachricht aus dem aktuellen Zustand.
    pub fn state<'a>(frame: f64, curves: impl IntoIterator<Item = &'a Curve>) -> Self {
        Self::State(SyncState {
            frame,
            curves: curves.into_iter().cloned().collect(),
        })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Sync-Nachricht nicht serialisierbar")
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Sync-Nachricht fehlerhaft")
    }
}

/// Extern gelieferter Kurvenzustand ("Override"-Datenquelle).
#[derive(Debug, Clone, Default)]
pub struct OverrideSource {
    state: Option<SyncState>,
}

impl OverrideSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verarbeitet eine rohe Nachricht. Fehlerhafte Nachrichten werden
    /// geloggt und ignoriert; der bisherige Zustand bleibt erhalten.
    ///
    /// Gibt `true` zurück, wenn sich der Override-Zustand geändert hat.
    pub fn apply_json(&mut self, text: &str) -> bool {
        match SyncMessage::from_json(text) {
            Ok(message) => {
                self.apply(message);
                true
            }
            Err(e) => {
                log::warn!("Sync-Nachricht ignoriert: {:#}", e);
                false
            }
        }
    }

    pub fn apply(&mut self, message: SyncMessage) {
        match message {
            SyncMessage::State(state) => {
                log::debug!(
                    "Override-Zustand empfangen: Frame {}, {} Kurven",
                    state.frame,
                    state.curves.len()
                );
                self.state = Some(state);
            }
            SyncMessage::Close => {
                log::info!("Externe Sitzung beendet, Override verworfen");
                self.state = None;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn frame(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.frame)
    }

    pub fn curves(&self) -> Option<&[Curve]> {
        self.state.as_ref().map(|s| s.curves.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ControlPoint, ControlPointType};
    use glam::DVec2;

    fn sample_curve() -> Curve {
        Curve::with_points(
            "S",
            vec![ControlPoint::with_flat_handles(
                ControlPointType::Linear,
                DVec2::new(0.0, 1.0),
                2.0,
            )],
        )
    }

    #[test]
    fn message_shapes_match_exchange_format() {
        let close = SyncMessage::Close.to_json().expect("serialisierbar");
        assert_eq!(close, r#"{"event":"close"}"#);

        let state = SyncMessage::state(12.0, [&sample_curve()]);
        let value: serde_json::Value =
            serde_json::from_str(&state.to_json().expect("serialisierbar")).expect("JSON");
        assert_eq!(value["event"], "state");
        assert_eq!(value["data"]["frame"], 12.0);
        assert_eq!(value["data"]["curves"][0]["name"], "S");
    }

    #[test]
    fn override_tracks_state_and_close() {
        let mut source = OverrideSource::new();
        let text = SyncMessage::state(3.0, [&sample_curve()])
            .to_json()
            .expect("serialisierbar");

        assert!(source.apply_json(&text));
        assert_eq!(source.frame(), Some(3.0));
        assert_eq!(source.curves().map(<[Curve]>::len), Some(1));

        assert!(source.apply_json(r#"{"event":"close"}"#));
        assert!(!source.is_active());
    }

    #[test]
    fn malformed_message_keeps_previous_state() {
        let mut source = OverrideSource::new();
        source.apply(SyncMessage::state(5.0, [&sample_curve()]));

        assert!(!source.apply_json("{not json"));
        assert!(!source.apply_json(r#"{"event":"explode"}"#));
        assert_eq!(source.frame(), Some(5.0));
    }
}
