//! Zentrale Konfiguration für den Keyframe-Graph-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{CurveSetConfig, GridProjection, CONTINUITY_EPSILON, DEFAULT_CURVE_PALETTE};
use glam::DVec2;
use serde::{Deserialize, Serialize};

// ── Ansicht ─────────────────────────────────────────────────────────

/// Start-Skalierung: Pixel pro Frame.
pub const GRID_SCALE_FRAME_PX: f64 = 15.0;
/// Start-Skalierung: Pixel pro Werteinheit.
pub const GRID_SCALE_VALUE_PX: f64 = 50.0;
/// Minimale Pixel pro Welteinheit.
pub const GRID_ZOOM_MIN: f64 = GridProjection::ZOOM_MIN;
/// Maximale Pixel pro Welteinheit.
pub const GRID_ZOOM_MAX: f64 = GridProjection::ZOOM_MAX;

// ── Selektion ───────────────────────────────────────────────────────

/// Pick-Radius in Screen-Pixeln.
pub const SELECTION_PICK_RADIUS_PX: f64 = 7.0;

// ── Undo/Redo ───────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const UNDO_DEPTH: usize = 64;
/// Pushes innerhalb dieses Fensters (ms) nach dem letzten akzeptierten werden verworfen.
pub const UNDO_DEBOUNCE_MS: u64 = 250;

// ── Wiedergabe ──────────────────────────────────────────────────────

/// Bildrate, die `PlayOrPause` ohne vorherige Rate verwendet.
pub const PLAYBACK_DEFAULT_FPS: f64 = 30.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `keyframe_graph_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Ansicht ─────────────────────────────────────────────────
    /// Start-Skalierung in Pixel pro Frame
    pub grid_scale_frame_px: f64,
    /// Start-Skalierung in Pixel pro Werteinheit
    pub grid_scale_value_px: f64,
    /// Minimale Pixel pro Welteinheit
    pub grid_zoom_min: f64,
    /// Maximale Pixel pro Welteinheit
    pub grid_zoom_max: f64,

    // ── Selektion ───────────────────────────────────────────────
    /// Pick-Radius für Klick-Selektion in Screen-Pixeln
    pub selection_pick_radius_px: f64,

    // ── Kurven ──────────────────────────────────────────────────
    /// Farben für neue Kurven (Vergabe nach Einfügereihenfolge)
    #[serde(default = "default_curve_palette")]
    pub curve_palette: Vec<String>,
    /// Ersatz-Nenner beim Spiegeln kontinuierlicher Handles
    #[serde(default = "default_continuity_epsilon")]
    pub continuity_epsilon: f64,

    // ── Undo/Redo ───────────────────────────────────────────────
    /// Maximale Anzahl Undo-Schritte
    pub undo_depth: usize,
    /// Entprellfenster für Undo-Pushes in Millisekunden
    pub undo_debounce_ms: u64,

    // ── Wiedergabe ──────────────────────────────────────────────
    /// Bildrate für Play ohne vorherige Rate
    #[serde(default = "default_playback_fps")]
    pub playback_default_fps: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_scale_frame_px: GRID_SCALE_FRAME_PX,
            grid_scale_value_px: GRID_SCALE_VALUE_PX,
            grid_zoom_min: GRID_ZOOM_MIN,
            grid_zoom_max: GRID_ZOOM_MAX,

            selection_pick_radius_px: SELECTION_PICK_RADIUS_PX,

            curve_palette: default_curve_palette(),
            continuity_epsilon: CONTINUITY_EPSILON,

            undo_depth: UNDO_DEPTH,
            undo_debounce_ms: UNDO_DEBOUNCE_MS,

            playback_default_fps: PLAYBACK_DEFAULT_FPS,
        }
    }
}

/// Serde-Default für `curve_palette` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_curve_palette() -> Vec<String> {
    DEFAULT_CURVE_PALETTE.iter().map(|c| c.to_string()).collect()
}

/// Serde-Default für `continuity_epsilon`.
fn default_continuity_epsilon() -> f64 {
    CONTINUITY_EPSILON
}

/// Serde-Default für `playback_default_fps`.
fn default_playback_fps() -> f64 {
    PLAYBACK_DEFAULT_FPS
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("keyframe-graph-editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("keyframe_graph_editor.toml")
    }

    /// Bearbeitungs-Parameter für das `CurveSet`.
    pub fn curve_set_config(&self) -> CurveSetConfig {
        CurveSetConfig {
            palette: self.curve_palette.clone(),
            continuity_epsilon: self.continuity_epsilon,
        }
    }

    /// Projektion mit konfigurierter Start-Skalierung und Zoom-Grenzen.
    pub fn grid_projection(&self, viewport: DVec2) -> GridProjection {
        GridProjection::new(viewport).with_scale_limits(
            DVec2::new(self.grid_scale_frame_px, self.grid_scale_value_px),
            self.grid_zoom_min,
            self.grid_zoom_max,
        )
    }

    /// Entprellfenster als `Duration`.
    pub fn undo_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.undo_debounce_ms)
    }
}
