//! Geteilte Konfiguration für `app` und den Binary-Einstiegspunkt.

pub mod options;

pub use options::EditorOptions;
pub use options::{SELECTION_PICK_RADIUS_PX, UNDO_DEBOUNCE_MS, UNDO_DEPTH};
