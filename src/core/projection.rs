//! Welt↔Pixel-Projektion der Kurvenansicht (Pan und Zoom).
//!
//! Welt: x = Frame, y = Wert (y wächst nach oben).
//! Pixel: Ursprung oben links, y wächst nach unten.

use super::math::{point_in_triangle, squared_distance};
use glam::DVec2;

/// Projektion zwischen Weltkoordinaten und Viewport-Pixeln.
#[derive(Debug, Clone, PartialEq)]
pub struct GridProjection {
    /// Weltposition der linken unteren Viewport-Ecke
    pub position: DVec2,
    /// Pixel pro Welteinheit je Achse
    pub scale: DVec2,
    /// Viewport-Größe in Pixeln
    pub viewport: DVec2,
    zoom_min: f64,
    zoom_max: f64,
}

impl GridProjection {
    /// Standard-Skalierung: 15 px pro Frame, 50 px pro Werteinheit.
    pub const DEFAULT_SCALE: DVec2 = DVec2::new(15.0, 50.0);
    /// Minimale Pixel pro Welteinheit.
    pub const ZOOM_MIN: f64 = 0.25;
    /// Maximale Pixel pro Welteinheit.
    pub const ZOOM_MAX: f64 = 10_000.0;
    /// Zoom-Schritte werden durch diesen Wert geteilt (Mausrad-Delta).
    const ZOOM_DIVISOR: f64 = 1000.0;
    /// Halbe Breite des Guide-Markers (Dreieck am oberen Rand) in Pixeln.
    pub const GUIDE_MARKER_HALF_WIDTH: f64 = 6.0;
    /// Höhe des Guide-Markers in Pixeln.
    pub const GUIDE_MARKER_HEIGHT: f64 = 10.0;

    /// Erstellt eine Projektion mit Standard-Skalierung.
    pub fn new(viewport: DVec2) -> Self {
        Self {
            position: DVec2::ZERO,
            scale: Self::DEFAULT_SCALE,
            viewport,
            zoom_min: Self::ZOOM_MIN,
            zoom_max: Self::ZOOM_MAX,
        }
    }

    /// Setzt Startskalierung und Zoom-Grenzen (aus den Optionen).
    pub fn with_scale_limits(mut self, scale: DVec2, zoom_min: f64, zoom_max: f64) -> Self {
        self.zoom_min = zoom_min.min(zoom_max);
        self.zoom_max = zoom_max.max(zoom_min);
        self.scale = scale.clamp(DVec2::splat(self.zoom_min), DVec2::splat(self.zoom_max));
        self
    }

    pub fn set_viewport_size(&mut self, viewport: DVec2) {
        self.viewport = viewport;
    }

    /// Welt → Pixel.
    pub fn project(&self, world: DVec2) -> DVec2 {
        DVec2::new(
            (world.x - self.position.x) * self.scale.x,
            self.viewport.y - (world.y - self.position.y) * self.scale.y,
        )
    }

    /// Pixel → Welt.
    pub fn unproject(&self, pixel: DVec2) -> DVec2 {
        DVec2::new(
            pixel.x / self.scale.x + self.position.x,
            (self.viewport.y - pixel.y) / self.scale.y + self.position.y,
        )
    }

    /// Verschiebt die Ansicht um ein Pixel-Delta.
    pub fn pixel_move(&mut self, direction: DVec2) {
        self.position += direction / self.scale;
    }

    /// Zoomt relativ um `amount / 1000` und klemmt auf die Zoom-Grenzen.
    pub fn zoom(&mut self, amount: f64) {
        self.scale += self.scale * amount / Self::ZOOM_DIVISOR;
        self.scale = self
            .scale
            .clamp(DVec2::splat(self.zoom_min), DVec2::splat(self.zoom_max));
    }

    /// Quadrierter Pick-Radius in Welteinheiten für `radius_px` Pixel.
    pub fn selection_distance_sq(&self, radius_px: f64) -> f64 {
        squared_distance(
            self.unproject(DVec2::ZERO),
            self.unproject(DVec2::splat(radius_px)),
        )
    }

    /// Prüft, ob `pixel` den Guide-Marker über `guide_frame` trifft.
    ///
    /// Der Marker ist ein nach unten zeigendes Dreieck am oberen Viewport-Rand.
    pub fn guide_marker_contains(&self, guide_frame: f64, pixel: DVec2) -> bool {
        let x = self.project(DVec2::new(guide_frame, 0.0)).x;
        point_in_triangle(
            pixel,
            DVec2::new(x - Self::GUIDE_MARKER_HALF_WIDTH, 0.0),
            DVec2::new(x + Self::GUIDE_MARKER_HALF_WIDTH, 0.0),
            DVec2::new(x, Self::GUIDE_MARKER_HEIGHT),
        )
    }
}

impl Default for GridProjection {
    fn default() -> Self {
        Self::new(DVec2::new(800.0, 600.0))
    }
}
