//! Keyframe Graph Editor (headless).
//!
//! Lädt eine Kurven-Datei, spielt sie mit fester Host-Tickrate ab und gibt
//! pro Frame die ausgewerteten Werte aller Kurven aus.
//!
//! Aufruf: `keyframe-graph-editor <curves.json> [fps] [sekunden]`

use anyhow::Context;
use glam::DVec2;
use keyframe_graph_editor::{AppCommand, AppController, AppIntent, AppState, EditorOptions};
use std::path::PathBuf;

/// Host-Tick des Treibers (60 Hz).
const HOST_TICK_SECONDS: f64 = 1.0 / 60.0;
/// Abspieldauer ohne Angabe.
const DEFAULT_DURATION_SECONDS: f64 = 2.0;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Keyframe Graph Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let args = DriverArgs::parse(std::env::args().skip(1))?;
    HeadlessApp::new().run(&args)
}

/// Kommandozeilen-Argumente des Treibers.
struct DriverArgs {
    path: PathBuf,
    fps: Option<f64>,
    seconds: f64,
}

impl DriverArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let path = args
            .next()
            .map(PathBuf::from)
            .context("Aufruf: keyframe-graph-editor <curves.json> [fps] [sekunden]")?;
        let fps = args
            .next()
            .map(|s| s.parse::<f64>())
            .transpose()
            .context("fps ist keine Zahl")?;
        let seconds = args
            .next()
            .map(|s| s.parse::<f64>())
            .transpose()
            .context("Sekunden sind keine Zahl")?
            .unwrap_or(DEFAULT_DURATION_SECONDS);
        Ok(Self { path, fps, seconds })
    }
}

/// Headless-Anwendung: State und Controller ohne Fenster.
struct HeadlessApp {
    state: AppState,
    controller: AppController,
}

impl HeadlessApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let editor_options = EditorOptions::load_from_file(&config_path);

        Self {
            state: AppState::with_options(editor_options),
            controller: AppController::new(),
        }
    }

    fn run(mut self, args: &DriverArgs) -> anyhow::Result<()> {
        self.controller.handle_intent(
            &mut self.state,
            AppIntent::FileSelected {
                path: args.path.clone(),
            },
        )?;

        let start = DVec2::new(self.state.curves.minimum_frame(), 0.0);
        self.controller
            .handle_command(&mut self.state, AppCommand::SetGuidePoint { world_pos: start })?;
        let intent = match args.fps {
            Some(fps) => AppIntent::FpsChanged { fps },
            None => AppIntent::PlayPauseRequested,
        };
        self.controller.handle_intent(&mut self.state, intent)?;

        self.print_values();
        let ticks = (args.seconds / HOST_TICK_SECONDS).round() as u64;
        for _ in 0..ticks {
            let before = self.state.playback.guide_frame();
            self.process_events(vec![AppIntent::TickElapsed {
                delta_seconds: HOST_TICK_SECONDS,
            }]);
            if self.state.playback.guide_frame() != before {
                self.print_values();
            }
        }
        Ok(())
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn print_values(&self) {
        let frame = self.state.playback.guide_frame();
        let values: Vec<String> = self
            .state
            .curves
            .values_at(frame)
            .map(|(curve, value)| format!("{}={:.4}", curve.name(), value))
            .collect();
        println!("{:>6}  {}", frame, values.join("  "));
    }
}
