//! Handler für Datei-Operationen, Zwischenablage und Sitzungs-Sync.

use crate::app::AppState;
use crate::core::CurveSet;
use crate::wire;
use std::path::PathBuf;

/// Lädt Kurven aus einer JSON-Datei und ersetzt den aktuellen Bestand.
///
/// Die Undo-Historie wird dabei geleert.
pub fn load(state: &mut AppState, path: PathBuf) -> anyhow::Result<()> {
    let curves = wire::read_curves_file(&path)?;
    state.curves = CurveSet::from_curves(curves, state.options.curve_set_config());
    state.reset_history();
    state.current_file_path = Some(path);
    Ok(())
}

/// Speichert alle Kurven.
///
/// `None` speichert unter dem aktuell bekannten Pfad.
/// `Some(p)` speichert explizit unter dem neuen Pfad `p`.
pub fn save(state: &mut AppState, path: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path.or_else(|| state.current_file_path.clone()) else {
        anyhow::bail!("Kein Speicherpfad bekannt");
    };
    wire::write_curves_file(&path, state.curves.curves())?;
    state.current_file_path = Some(path);
    Ok(())
}

/// Exportiert alle Kurven als JSON in die Zwischenablage.
pub fn copy_curves(state: &mut AppState) -> anyhow::Result<()> {
    let json = wire::curves_to_json(state.curves.curves())?;
    log::info!("{} Kurven in die Zwischenablage kopiert", state.curves.curve_count());
    state.clipboard = Some(json);
    Ok(())
}

/// Verarbeitet eine Sync-Nachricht; fehlerhafte Nachrichten werden ignoriert.
pub fn apply_sync_message(state: &mut AppState, json: &str) {
    state.override_source.apply_json(json);
}
