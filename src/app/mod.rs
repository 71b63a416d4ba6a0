//! Application-Layer: Controller, State, Events, Handler, History und Wiedergabe.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod playback;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Kurven, Historie, Ansicht, Wiedergabe).
pub mod state;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use history::{EditHistory, Snapshot};
pub use playback::{PlaybackClock, GUIDE_POINT_START};
pub use state::{AppState, DragState};
