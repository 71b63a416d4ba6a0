//! Wiedergabe-Uhr: deterministisches Stepping des Guide-Frames.
//!
//! Der Host ruft pro Tick [`PlaybackClock::advance`] mit der vergangenen Zeit auf.
//! Die Uhr akkumuliert die Zeit und bewegt den Guide-Frame in festen Schritten
//! von `1 / fps` Sekunden, unabhängig von der Bildrate des Hosts.

use glam::DVec2;

/// Startposition des Guide-Punkts (Frame 1, Wert 0).
pub const GUIDE_POINT_START: DVec2 = DVec2::new(1.0, 0.0);

/// Höchstens so viele Frames pro `advance`; der Rest der Zeit verfällt.
pub const MAX_STEPS_PER_ADVANCE: u32 = 1000;

/// Wiedergabe-Zustand: Guide-Punkt, Wiederholungs-Frame und Bildrate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    guide_point: DVec2,
    repeat_frame: Option<f64>,
    fps: f64,
    previous_fps: f64,
    accumulator: f64,
}

impl PlaybackClock {
    /// Erstellt eine pausierte Uhr; `default_fps` wird von `play_or_pause` genutzt.
    pub fn new(default_fps: f64) -> Self {
        Self {
            guide_point: GUIDE_POINT_START,
            repeat_frame: None,
            fps: 0.0,
            previous_fps: default_fps.max(0.0),
            accumulator: 0.0,
        }
    }

    pub fn guide_point(&self) -> DVec2 {
        self.guide_point
    }

    /// Aktueller Guide-Frame (Scrub-/Wiedergabe-Position).
    pub fn guide_frame(&self) -> f64 {
        self.guide_point.x
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn is_playing(&self) -> bool {
        self.fps > 0.0
    }

    pub fn repeat_frame(&self) -> Option<f64> {
        self.repeat_frame
    }

    /// Setzt den Guide-Punkt: Frame ganzzahlig, Wert auf drei Nachkommastellen.
    ///
    /// Nicht-endliche Eingaben werden ignoriert.
    pub fn set_guide_point(&mut self, point: DVec2) {
        if !point.is_finite() {
            log::warn!("Ungültiger Guide-Punkt ignoriert: {:?}", point);
            return;
        }
        self.guide_point = DVec2::new(point.x.round(), (point.y * 1000.0).round() / 1000.0);
    }

    /// Setzt nur den Guide-Frame, der Wert bleibt erhalten.
    pub fn set_guide_frame(&mut self, frame: f64) {
        self.set_guide_point(DVec2::new(frame, self.guide_point.y));
    }

    /// Setzt die Bildrate. `0` pausiert; andere Werte werden für `play_or_pause` gemerkt.
    pub fn set_fps(&mut self, fps: f64) {
        let fps = if fps.is_finite() { fps.max(0.0) } else { 0.0 };
        if fps > 0.0 {
            self.previous_fps = fps;
        }
        self.fps = fps;
        self.accumulator = 0.0;
    }

    /// Schaltet zwischen Pause und der zuletzt genutzten Bildrate um.
    pub fn play_or_pause(&mut self) {
        if self.is_playing() {
            self.fps = 0.0;
        } else {
            self.fps = self.previous_fps;
        }
        self.accumulator = 0.0;
    }

    /// Merkt den aktuellen Guide-Frame als Wiederholungs-Frame.
    pub fn set_repeat_frame_to_guide(&mut self) {
        self.repeat_frame = Some(self.guide_point.x);
    }

    pub fn clear_repeat_frame(&mut self) {
        self.repeat_frame = None;
    }

    /// Schreitet um `delta_seconds` fort und gibt die Anzahl ausgeführter Frames zurück.
    ///
    /// Überschreitet der Guide-Frame den Wiederholungs-Frame (oder, ohne diesen,
    /// `max_frame`), springt er auf `min_frame` zurück. Pro Aufruf werden höchstens
    /// [`MAX_STEPS_PER_ADVANCE`] Frames ausgeführt.
    pub fn advance(&mut self, delta_seconds: f64, min_frame: f64, max_frame: f64) -> u32 {
        if !self.is_playing() || delta_seconds.is_nan() || delta_seconds <= 0.0 {
            return 0;
        }

        let step = 1.0 / self.fps;
        let end = self.repeat_frame.unwrap_or(max_frame);
        self.accumulator += delta_seconds;

        let mut steps = 0;
        while self.accumulator >= step {
            if steps == MAX_STEPS_PER_ADVANCE {
                log::debug!("Wiedergabe hängt hinterher, {} s verworfen", self.accumulator);
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= step;
            self.guide_point.x += 1.0;
            if self.guide_point.x > end {
                self.guide_point.x = min_frame.round();
            }
            steps += 1;
        }
        steps
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(crate::shared::options::PLAYBACK_DEFAULT_FPS)
    }
}
