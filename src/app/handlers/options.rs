//! Handler für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::EditorOptions;

/// Wendet Optionen an und persistiert sie.
pub fn apply(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    state.apply_options(options);
    let path = EditorOptions::config_path();
    state.options.save_to_file(&path)
}

/// Setzt Optionen auf Standardwerte zurück und persistiert sie.
pub fn reset(state: &mut AppState) -> anyhow::Result<()> {
    apply(state, EditorOptions::default())
}
