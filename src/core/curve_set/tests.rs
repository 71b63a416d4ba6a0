use super::*;
use crate::core::selection::{PointHandle, SelectionKind};
use approx::{assert_abs_diff_eq, assert_relative_eq};

const THRESHOLD_SQ: f64 = 4.0;

fn curve_x() -> Curve {
    Curve::with_points(
        "X",
        vec![
            ControlPoint::with_flat_handles(ControlPointType::Bezier, DVec2::new(1.0, 0.0), 10.0),
            ControlPoint::with_flat_handles(ControlPointType::Bezier, DVec2::new(60.0, 10.0), 10.0),
        ],
    )
}

fn set_with(curves: Vec<Curve>) -> (CurveSet, Vec<CurveId>) {
    let mut set = CurveSet::new();
    let ids = curves.into_iter().map(|c| set.add_curve(c)).collect();
    (set, ids)
}

fn point_ids(set: &CurveSet, curve: CurveId) -> Vec<PointId> {
    set.curve(curve)
        .map(|c| c.control_points().iter().map(|p| p.id()).collect())
        .unwrap_or_default()
}

fn assert_sorted(curve: &Curve) {
    let frames: Vec<f64> = curve.control_points().iter().map(|p| p.frame()).collect();
    assert!(
        frames.windows(2).all(|w| w[0] <= w[1]),
        "Frames nicht sortiert: {frames:?}"
    );
}

#[test]
fn test_add_curve_assigns_ids_colors_and_focus() {
    let mut set = CurveSet::new();
    let a = set.add_curve(Curve::new("a"));
    let b = set.add_curve(Curve::new("b"));

    assert_eq!((a, b), (0, 1));
    assert_eq!(set.curve(a).map(Curve::color), Some(DEFAULT_CURVE_PALETTE[0]));
    assert_eq!(set.curve(b).map(Curve::color), Some(DEFAULT_CURVE_PALETTE[1]));
    assert_eq!(set.selection.active_curve(), Some(a));
    assert_eq!(set.selection.kind(), SelectionKind::CurveOnly);
}

#[test]
fn test_palette_wraps_around() {
    let mut set = CurveSet::with_config(CurveSetConfig {
        palette: vec!["#111111".into(), "#222222".into()],
        ..CurveSetConfig::default()
    });
    let ids: Vec<_> = (0..3).map(|i| set.add_curve(Curve::new(format!("c{i}")))).collect();
    assert_eq!(set.curve(ids[2]).map(Curve::color), Some("#111111"));
}

#[test]
fn test_add_point_preserves_curve_value() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let before = set.curve(ids[0]).map(|c| c.evaluate(30.0)).unwrap_or_default();

    let inserted = set.add_point(ids[0], 30.0).expect("Keyframe eingefügt");
    let curve = set.curve(ids[0]).expect("Kurve vorhanden");
    let point = curve.point(inserted).expect("Punkt vorhanden");

    assert_eq!(curve.len(), 3);
    assert_eq!(point.kind(), ControlPointType::Bezier);
    assert_relative_eq!(point.value(), before);
    assert_abs_diff_eq!(curve.evaluate(30.0), before, epsilon = 1e-9);
    assert_sorted(curve);

    // Handles bei ± einem Viertel des Segments (59 Frames)
    assert_relative_eq!(point.forward_handle().x, 30.0 + 59.0 / 4.0);
    assert_relative_eq!(point.backwards_handle().x, 30.0 - 59.0 / 4.0);
}

#[test]
fn test_add_point_on_existing_frame_returns_existing() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let existing = point_ids(&set, ids[0])[1];
    assert_eq!(set.add_point(ids[0], 60.0), Some(existing));
    assert_eq!(set.curve(ids[0]).map(Curve::len), Some(2));
}

#[test]
fn test_add_point_to_empty_curve_uses_defaults() {
    let (mut set, ids) = set_with(vec![Curve::new("leer")]);
    let id = set.add_point(ids[0], 12.0).expect("Keyframe eingefügt");
    let point = set.curve(ids[0]).and_then(|c| c.point(id)).cloned().expect("Punkt");

    assert_eq!(point.kind(), ControlPointType::Linear);
    assert_eq!(point.position(), DVec2::new(12.0, 0.0));
    assert_relative_eq!(point.forward_handle().x, 12.0 + DEFAULT_HANDLE_FRAMES);
}

#[test]
fn test_locked_curve_rejects_mutation() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    set.set_curve_locked(ids[0], true);

    assert!(set.add_point(ids[0], 30.0).is_none());
    let selection = SelectionPoint::single(ids[0], Some(first), PointHandle::Point);
    assert!(!set.modify_point(&selection, PointMovement::by(DVec2::new(5.0, 5.0))));
    assert!(set.delete_point(ids[0], first).is_none());
    assert_eq!(set.curve(ids[0]).map(Curve::len), Some(2));
}

#[test]
fn test_modify_without_points_is_noop() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let selection = SelectionPoint::curve_only(ids[0]);
    assert!(!set.modify_point(&selection, PointMovement::to(DVec2::new(3.0, 3.0))));
    assert!(!set.modify_point(&SelectionPoint::new(), PointMovement::to(DVec2::ONE)));
}

#[test]
fn test_point_move_rounds_frame_and_translates_rigidly() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    let selection = SelectionPoint::single(ids[0], Some(first), PointHandle::Point);

    assert!(set.modify_point(&selection, PointMovement::to(DVec2::new(5.4, 2.5))));
    let point = set.curve(ids[0]).and_then(|c| c.point(first)).cloned().expect("Punkt");

    assert_eq!(point.position(), DVec2::new(5.0, 2.5));
    assert_eq!(point.forward_handle(), DVec2::new(15.0, 2.5));
    assert_eq!(point.backwards_handle(), DVec2::new(-5.0, 2.5));
}

#[test]
fn test_drag_past_neighbor_keeps_curve_sorted() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    let selection = SelectionPoint::single(ids[0], Some(first), PointHandle::Point);

    set.modify_point(&selection, PointMovement::to(DVec2::new(75.0, 3.0)));
    let curve = set.curve(ids[0]).expect("Kurve");
    assert_sorted(curve);
    assert_eq!(curve.point_index(first), Some(1));
}

#[test]
fn test_sort_invariant_after_mixed_operations() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    set.add_point(ids[0], 20.0);
    set.add_point(ids[0], 45.0);

    let moves = [
        DVec2::new(50.0, 1.0),
        DVec2::new(-30.0, 4.0),
        DVec2::new(12.7, -2.0),
    ];
    for (id, delta) in point_ids(&set, ids[0]).into_iter().zip(moves) {
        let selection = SelectionPoint::single(ids[0], Some(id), PointHandle::Point);
        set.modify_point(&selection, PointMovement::by(delta));
        set.add_point(ids[0], 33.0);
        assert_sorted(set.curve(ids[0]).expect("Kurve"));
    }
}

#[test]
fn test_moving_handle_invalidates_segment_cache() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    let before = set.curve(ids[0]).map(|c| c.evaluate(30.0)).unwrap_or_default();

    let selection = SelectionPoint::single(ids[0], Some(first), PointHandle::Forward);
    set.modify_point(&selection, PointMovement::to(DVec2::new(20.0, 30.0)));

    let curve = set.curve(ids[0]).expect("Kurve");
    assert!(!curve.control_points()[0].has_cached_lut());
    let after = curve.evaluate(30.0);
    assert!((after - before).abs() > 1e-3, "vorher {before}, nachher {after}");
}

#[test]
fn test_forward_handle_is_clamped_to_point_frame() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let second = point_ids(&set, ids[0])[1];
    let selection = SelectionPoint::single(ids[0], Some(second), PointHandle::Forward);

    set.modify_point(&selection, PointMovement::to(DVec2::new(40.0, 12.0)));
    let point = set.curve(ids[0]).and_then(|c| c.point(second)).cloned().expect("Punkt");
    assert_eq!(point.forward_handle(), DVec2::new(60.0, 12.0));
    // Nicht kontinuierlich: Rückwärts-Handle bleibt
    assert_eq!(point.backwards_handle(), DVec2::new(50.0, 10.0));
}

#[test]
fn test_backward_handle_is_clamped_to_point_frame() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let second = point_ids(&set, ids[0])[1];
    let selection = SelectionPoint::single(ids[0], Some(second), PointHandle::Backward);

    set.modify_point(&selection, PointMovement::to(DVec2::new(70.0, 4.0)));
    let point = set.curve(ids[0]).and_then(|c| c.point(second)).cloned().expect("Punkt");
    assert_eq!(point.backwards_handle(), DVec2::new(60.0, 4.0));
}

#[test]
fn test_continuous_handles_stay_colinear() {
    let curve = Curve::with_points(
        "c",
        vec![
            ControlPoint::with_flat_handles(
                ControlPointType::BezierContinuous,
                DVec2::new(10.0, 5.0),
                8.0,
            ),
            ControlPoint::with_flat_handles(ControlPointType::Linear, DVec2::new(40.0, 0.0), 8.0),
        ],
    );
    let (mut set, ids) = set_with(vec![curve]);
    let id = point_ids(&set, ids[0])[0];

    let forward = SelectionPoint::single(ids[0], Some(id), PointHandle::Forward);
    set.modify_point(&forward, PointMovement::to(DVec2::new(16.0, 11.0)));
    let point = set.curve(ids[0]).and_then(|c| c.point(id)).cloned().expect("Punkt");

    let fwd = point.forward_handle() - point.position();
    let bwd = point.backwards_handle() - point.position();
    assert_abs_diff_eq!(fwd.perp_dot(bwd), 0.0, epsilon = 1e-9);
    // Frame-Abstand des Rückwärts-Handles bleibt erhalten
    assert_relative_eq!(bwd.x, -8.0);

    let backward = SelectionPoint::single(ids[0], Some(id), PointHandle::Backward);
    set.modify_point(&backward, PointMovement::to(DVec2::new(7.0, 1.0)));
    let point = set.curve(ids[0]).and_then(|c| c.point(id)).cloned().expect("Punkt");

    let fwd = point.forward_handle() - point.position();
    let bwd = point.backwards_handle() - point.position();
    assert_abs_diff_eq!(fwd.perp_dot(bwd), 0.0, epsilon = 1e-9);
    assert_relative_eq!(fwd.x, 6.0);
}

#[test]
fn test_continuity_mirroring_survives_vertical_handle() {
    let curve = Curve::with_points(
        "c",
        vec![ControlPoint::with_flat_handles(
            ControlPointType::BezierContinuous,
            DVec2::new(10.0, 5.0),
            8.0,
        )],
    );
    let (mut set, ids) = set_with(vec![curve]);
    let id = point_ids(&set, ids[0])[0];

    let forward = SelectionPoint::single(ids[0], Some(id), PointHandle::Forward);
    set.modify_point(&forward, PointMovement::to(DVec2::new(10.0, 20.0)));
    let point = set.curve(ids[0]).and_then(|c| c.point(id)).cloned().expect("Punkt");
    assert!(point.backwards_handle().is_finite());
}

#[test]
fn test_modify_clears_pick_history() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    set.pick_point(DVec2::new(1.0, 0.0), THRESHOLD_SQ);
    assert!(!set.selection.history_is_empty());

    set.modify_selected(PointMovement::by(DVec2::new(0.0, 1.0)));
    assert!(set.selection.history_is_empty());
    assert_eq!(set.selection.active_curve(), Some(ids[0]));
}

#[test]
fn test_repeated_click_cycles_overlapping_points() {
    let curve = Curve::with_points(
        "nah",
        vec![
            ControlPoint::with_flat_handles(ControlPointType::Linear, DVec2::new(10.0, 0.0), 1.0),
            ControlPoint::with_flat_handles(ControlPointType::Linear, DVec2::new(13.0, 0.0), 1.0),
        ],
    );
    let (mut set, ids) = set_with(vec![curve]);
    let mid = DVec2::new(11.5, 0.0);
    let threshold_sq = 9.0;

    set.pick_point(mid, threshold_sq);
    let first = set.selection.active_point();
    set.pick_point(mid, threshold_sq);
    let second = set.selection.active_point();
    set.pick_point(mid, threshold_sq);
    let third = set.selection.active_point();

    assert!(first.is_some() && second.is_some());
    assert_ne!(first, second);
    assert_eq!(first, third);
    assert_eq!(first.map(|(curve, _)| curve), Some(ids[0]));
}

#[test]
fn test_handles_are_only_pickable_on_selected_point() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    // Vorwärts-Handle des ersten Punkts liegt bei (11, 0)
    let handle = DVec2::new(11.0, 0.0);

    let picked = set.try_select_point(handle, THRESHOLD_SQ);
    assert_eq!(picked.kind(), SelectionKind::Empty);

    let first = point_ids(&set, ids[0])[0];
    set.selection
        .select_point(SelectionPoint::single(ids[0], Some(first), PointHandle::Point));
    set.selection.clear_history();
    let picked = set.try_select_point(handle, THRESHOLD_SQ);
    assert_eq!(picked.active_point(), Some((ids[0], first)));
    assert_eq!(picked.handle, PointHandle::Forward);
}

#[test]
fn test_backward_handle_requires_bezier_predecessor() {
    let curve = Curve::with_points(
        "lin",
        vec![
            ControlPoint::with_flat_handles(ControlPointType::Linear, DVec2::new(0.0, 0.0), 5.0),
            ControlPoint::with_flat_handles(ControlPointType::Bezier, DVec2::new(20.0, 0.0), 5.0),
        ],
    );
    let (mut set, ids) = set_with(vec![curve]);
    let second = point_ids(&set, ids[0])[1];
    set.selection
        .select_point(SelectionPoint::single(ids[0], Some(second), PointHandle::Point));
    set.selection.clear_history();

    let picked = set.try_select_point(DVec2::new(15.0, 0.0), THRESHOLD_SQ);
    assert_eq!(picked.kind(), SelectionKind::Empty);
}

#[test]
fn test_static_ranking_prefers_active_curve() {
    let make = |name: &str| {
        Curve::with_points(
            name,
            vec![ControlPoint::with_flat_handles(
                ControlPointType::Linear,
                DVec2::new(5.0, 5.0),
                1.0,
            )],
        )
    };
    let (mut set, ids) = set_with(vec![make("unten"), make("oben")]);
    set.focus_curve(ids[1]);

    let picked = set.try_select_point(DVec2::new(5.0, 5.0), THRESHOLD_SQ);
    assert_eq!(picked.active_curve(), Some(ids[1]));
}

#[test]
fn test_hidden_and_locked_curves_are_not_pickable() {
    let (mut set, ids) = set_with(vec![curve_x(), curve_x()]);
    set.set_curve_visible(ids[0], false);
    set.set_curve_locked(ids[1], true);

    assert_eq!(set.pick_point(DVec2::new(1.0, 0.0), THRESHOLD_SQ), SelectionKind::CurveOnly);
    assert!(!set.select_in_box(DVec2::new(-5.0, -5.0), DVec2::new(100.0, 100.0)));
}

#[test]
fn test_empty_pick_keeps_active_curve() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    set.pick_point(DVec2::new(1.0, 0.0), THRESHOLD_SQ);
    assert_eq!(set.selection.kind(), SelectionKind::SinglePoint);

    set.pick_point(DVec2::new(500.0, 500.0), THRESHOLD_SQ);
    assert_eq!(set.selection.kind(), SelectionKind::CurveOnly);
    assert_eq!(set.selection.active_curve(), Some(ids[0]));
}

#[test]
fn test_box_select_collects_points_of_all_curves() {
    let (mut set, ids) = set_with(vec![curve_x(), curve_x()]);
    assert!(set.select_in_box(DVec2::new(70.0, 20.0), DVec2::new(0.0, -1.0)));
    assert_eq!(set.selection.kind(), SelectionKind::MultiPoint);
    assert_eq!(set.selection.selected_points().count(), 4);

    assert!(!set.select_in_box(DVec2::new(200.0, 200.0), DVec2::new(300.0, 300.0)));
    assert_eq!(set.selection.selected_points().count(), 4);

    // Halboffen: Punkt (60, 10) liegt genau auf der Max-Kante
    assert!(set.select_in_box(DVec2::new(0.0, -1.0), DVec2::new(60.0, 10.0)));
    assert_eq!(set.selection.selected_points().count(), 2);
    assert!(set.selection.curves().iter().all(|c| ids.contains(c)));
}

#[test]
fn test_multi_point_move_and_normalize() {
    let (mut set, ids) = set_with(vec![curve_x(), curve_x()]);
    set.select_in_box(DVec2::new(0.0, -1.0), DVec2::new(2.0, 1.0));
    assert_eq!(set.selection.selected_points().count(), 2);

    set.modify_selected(PointMovement::by(DVec2::new(3.0, 1.0)));
    for id in &ids {
        let curve = set.curve(*id).expect("Kurve");
        assert_eq!(curve.control_points()[0].position(), DVec2::new(4.0, 1.0));
    }

    let selection = set.selection.clone();
    assert!(set.normalize_point_frames(&selection));
}

#[test]
fn test_delete_point_rebinds_selection() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    set.selection
        .select_point(SelectionPoint::single(ids[0], Some(first), PointHandle::Point));

    assert!(set.delete_point(ids[0], first).is_some());
    assert_eq!(set.selection.kind(), SelectionKind::CurveOnly);
    assert_eq!(set.curve(ids[0]).map(Curve::len), Some(1));
}

#[test]
fn test_set_point_type_invalidates_cache() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    let _ = set.curve(ids[0]).map(|c| c.evaluate(30.0));

    let selection = SelectionPoint::single(ids[0], Some(first), PointHandle::Point);
    assert!(set.set_point_type(&selection, ControlPointType::Linear));

    let curve = set.curve(ids[0]).expect("Kurve");
    assert!(!curve.control_points()[0].has_cached_lut());
    assert_relative_eq!(curve.evaluate(30.5), 5.0);
}

#[test]
fn test_snap_frame_moves_rigidly_and_resorts() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let first = point_ids(&set, ids[0])[0];
    let selection = SelectionPoint::single(ids[0], Some(first), PointHandle::Point);

    assert!(set.snap_frame(&selection, 80.0));
    let curve = set.curve(ids[0]).expect("Kurve");
    assert_sorted(curve);
    let point = curve.point(first).expect("Punkt");
    assert_eq!(point.position(), DVec2::new(80.0, 0.0));
    assert_eq!(point.forward_handle(), DVec2::new(90.0, 0.0));
}

#[test]
fn test_set_value_at_frame_targets_displayed_point() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    // Mitten im Segment gibt es keinen Zielpunkt
    assert!(!set.set_value_at_frame(ids[0], 30.0, 4.0));
    assert!(!set.set_value_at_frame(ids[0], f64::NAN, 4.0));

    assert!(set.set_value_at_frame(ids[0], 60.0, 4.0));
    assert_eq!(set.curve(ids[0]).map(|c| c.evaluate(60.0)), Some(4.0));

    // Vor dem ersten / nach dem letzten Punkt: gehaltener Randpunkt
    assert!(set.set_value_at_frame(ids[0], -5.0, 2.0));
    assert!(set.set_value_at_frame(ids[0], 90.0, 7.0));
    let curve = set.curve(ids[0]).expect("Kurve vorhanden");
    assert_eq!(curve.control_points()[0].position(), DVec2::new(1.0, 2.0));
    assert_eq!(curve.control_points()[1].position(), DVec2::new(60.0, 7.0));
}

#[test]
fn test_aggregated_frame_range_skips_empty_curves() {
    let mut later = curve_x();
    later.name = "später".into();
    let (mut set, _) = set_with(vec![Curve::new("leer"), later]);
    assert_eq!(set.minimum_frame(), 1.0);
    assert_eq!(set.maximum_frame(), 60.0);

    set = CurveSet::new();
    assert_eq!(set.minimum_frame(), 0.0);
    assert_eq!(set.maximum_frame(), 0.0);
}

#[test]
fn test_from_curves_reassigns_duplicate_ids() {
    let mut a = curve_x();
    a.id = 3;
    let mut b = curve_x();
    b.id = 3;

    let set = CurveSet::from_curves(vec![a, b], CurveSetConfig::default());
    let ids: Vec<CurveId> = set.curves().map(Curve::id).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(set.selection.active_curve(), Some(3));
}

#[test]
fn test_toggles_report_new_state() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    assert_eq!(set.toggle_visible(ids[0]), Some(false));
    assert_eq!(set.toggle_locked(ids[0]), Some(true));
    assert_eq!(set.toggle_locked(99), None);
    assert!(set.rename_curve(ids[0], "Y"));
    assert_eq!(set.curve(ids[0]).map(Curve::name), Some("Y"));
}

#[test]
fn test_non_finite_frames_are_rejected_by_mutators() {
    let (mut set, ids) = set_with(vec![curve_x()]);
    let points = point_ids(&set, ids[0]);

    assert_eq!(set.add_point(ids[0], f64::NAN), None);
    assert_eq!(set.add_point(ids[0], f64::INFINITY), None);

    let selection = SelectionPoint::single(ids[0], Some(points[1]), PointHandle::Point);
    assert!(!set.snap_frame(&selection, f64::NAN));
    assert!(!set.modify_point(
        &selection,
        PointMovement::to(DVec2::new(f64::NAN, 3.0))
    ));

    let curve = set.curve(ids[0]).expect("Kurve vorhanden");
    assert_eq!(curve.len(), 2);
    assert_eq!(curve.control_points()[1].position(), DVec2::new(60.0, 10.0));
    assert_sorted(curve);
}
