//! Austauschformat (JSON) für Zwischenablage, Dateien und Sitzungs-Sync.

pub mod records;
pub mod sync;

pub use records::{ControlPointRecord, CurveRecord, WireVec2};
pub use sync::{OverrideSource, SyncMessage, SyncState};

use crate::core::Curve;
use anyhow::Context;
use std::path::Path;

/// Exportiert Kurven als formatiertes JSON-Array (Zwischenablage).
pub fn curves_to_json<'a>(curves: impl IntoIterator<Item = &'a Curve>) -> anyhow::Result<String> {
    let records: Vec<CurveRecord> = curves.into_iter().map(CurveRecord::from).collect();
    serde_json::to_string_pretty(&records).context("Kurven nicht serialisierbar")
}

/// Liest ein JSON-Array von Kurven.
pub fn parse_curves(text: &str) -> anyhow::Result<Vec<Curve>> {
    serde_json::from_str(text).context("Kurven-JSON fehlerhaft")
}

/// Lädt Kurven aus einer JSON-Datei.
pub fn read_curves_file(path: &Path) -> anyhow::Result<Vec<Curve>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Kurven-Datei nicht lesbar: {}", path.display()))?;
    let curves = parse_curves(&text)?;
    log::info!("{} Kurven geladen aus: {}", curves.len(), path.display());
    Ok(curves)
}

/// Schreibt Kurven als JSON-Datei.
pub fn write_curves_file<'a>(
    path: &Path,
    curves: impl IntoIterator<Item = &'a Curve>,
) -> anyhow::Result<()> {
    let text = curves_to_json(curves)?;
    std::fs::write(path, text)
        .with_context(|| format!("Kurven-Datei nicht schreibbar: {}", path.display()))?;
    log::info!("Kurven gespeichert nach: {}", path.display());
    Ok(())
}
