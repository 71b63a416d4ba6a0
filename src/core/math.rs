//! Vektor-Hilfsfunktionen: Abstände, Box- und Dreieck-Hit-Tests, Bézier-Auswertung.
//!
//! Alle Funktionen sind zustandslos und arbeiten auf `glam::DVec2`
//! (x = Frame, y = Wert).

use glam::DVec2;

/// Quadrierter euklidischer Abstand zweier Punkte.
#[inline]
pub fn squared_distance(a: DVec2, b: DVec2) -> f64 {
    a.distance_squared(b)
}

/// Sortiert zwei Ecken zu (min, max).
pub fn rect_min_max(corner_a: DVec2, corner_b: DVec2) -> (DVec2, DVec2) {
    (corner_a.min(corner_b), corner_a.max(corner_b))
}

/// Halboffene Box-Selektion zwischen zwei beliebigen Ecken: `[min, max)`.
pub fn point_in_corner_box(point: DVec2, corner_a: DVec2, corner_b: DVec2) -> bool {
    let (min, max) = rect_min_max(corner_a, corner_b);
    let size = max - min;
    let delta = point - min;
    delta.x >= 0.0 && delta.y >= 0.0 && delta.x < size.x && delta.y < size.y
}

/// Prüft ob `point` im Dreieck `a, b, c` liegt (Vorzeichen-Test, Rand inklusive).
pub fn point_in_triangle(point: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let d1 = (point - b).perp_dot(a - b);
    let d2 = (point - c).perp_dot(b - c);
    let d3 = (point - a).perp_dot(c - a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Lineare Interpolation `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn squared_distance_is_not_rooted() {
        let d = squared_distance(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0));
        assert_relative_eq!(d, 25.0);
    }

    #[test]
    fn corner_box_is_half_open_and_order_independent() {
        let a = DVec2::new(10.0, 10.0);
        let b = DVec2::new(0.0, 0.0);
        assert!(point_in_corner_box(DVec2::new(0.0, 0.0), a, b));
        assert!(point_in_corner_box(DVec2::new(5.0, 9.9), a, b));
        assert!(!point_in_corner_box(DVec2::new(10.0, 5.0), a, b));
    }

    #[test]
    fn triangle_hit_test() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        let c = DVec2::new(0.0, 10.0);
        assert!(point_in_triangle(DVec2::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(DVec2::new(5.0, 0.0), a, b, c));
        assert!(!point_in_triangle(DVec2::new(8.0, 8.0), a, b, c));
    }

    #[test]
    fn cubic_bezier_hits_endpoints_exactly() {
        let p0 = DVec2::new(1.0, 0.0);
        let p3 = DVec2::new(60.0, 10.0);
        let p1 = DVec2::new(11.0, 0.0);
        let p2 = DVec2::new(50.0, 10.0);
        assert_eq!(cubic_bezier(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_bezier(p0, p1, p2, p3, 1.0), p3);
    }
}
