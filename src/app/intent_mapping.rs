//! Mapping von Host-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use glam::DVec2;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::PointerPressed { screen_pos } => {
            if state
                .view
                .guide_marker_contains(state.playback.guide_frame(), screen_pos)
            {
                return vec![AppCommand::BeginGuideDrag];
            }
            vec![
                AppCommand::SelectPoint {
                    world_pos: state.view.unproject(screen_pos),
                    threshold_sq: state.selection_threshold_sq(),
                },
                AppCommand::BeginPointDrag,
            ]
        }
        AppIntent::PointerDragged {
            screen_pos,
            screen_delta,
            lock_frame,
        } => map_pointer_drag(state, screen_pos, screen_delta, lock_frame),
        AppIntent::PointerReleased => vec![AppCommand::EndPointDrag],
        AppIntent::BoxSelectRequested { corner_a, corner_b } => {
            vec![AppCommand::SelectInBox {
                corner_a: state.view.unproject(corner_a),
                corner_b: state.view.unproject(corner_b),
            }]
        }
        AppIntent::CurveClicked { curve } => vec![AppCommand::SelectCurve { curve }],
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],

        AppIntent::InsertKeyframeRequested => vec![AppCommand::InsertKeyframe],
        AppIntent::InsertKeyframeAllCurvesRequested => vec![AppCommand::InsertKeyframeAllCurves],
        AppIntent::DeleteSelectedRequested => vec![AppCommand::DeleteSelectedPoints],
        AppIntent::PointTypeChangeRequested { kind } => vec![AppCommand::SetPointType { kind }],
        AppIntent::SnapToGuideFrameRequested => vec![AppCommand::SnapFrame {
            frame: state.playback.guide_frame(),
        }],
        AppIntent::SnapToGuideValueRequested => vec![AppCommand::SnapValue {
            value: state.playback.guide_point().y,
        }],
        AppIntent::PointFrameEdited { frame } => vec![AppCommand::SetPointFrame { frame }],
        AppIntent::PointValueEdited { value } => vec![AppCommand::SetPointValue { value }],
        AppIntent::ValueAtGuideFrameEdited { value } => {
            vec![AppCommand::SetValueAtGuideFrame { value }]
        }

        AppIntent::AddCurveRequested { name } => vec![AppCommand::AddCurve { name }],
        AppIntent::RenameCurveRequested { name } => vec![AppCommand::RenameCurve { name }],
        AppIntent::ToggleVisibilityRequested => vec![AppCommand::ToggleVisible],
        AppIntent::ToggleLockRequested => vec![AppCommand::ToggleLocked],

        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],

        AppIntent::GuidePointDragged { screen_pos } => vec![AppCommand::SetGuidePoint {
            world_pos: state.view.unproject(screen_pos),
        }],
        AppIntent::GuideToSelectedPointRequested => {
            vec![AppCommand::SetGuideFrameToSelectedPoint]
        }
        AppIntent::PlayPauseRequested => vec![AppCommand::PlayOrPause],
        AppIntent::FpsChanged { fps } => vec![AppCommand::SetPlaybackFps { fps }],
        AppIntent::RepeatFrameSetRequested => vec![AppCommand::SetRepeatFrame],
        AppIntent::RepeatFrameClearRequested => vec![AppCommand::ClearRepeatFrame],
        AppIntent::TickElapsed { delta_seconds } => {
            vec![AppCommand::AdvancePlayback { delta_seconds }]
        }

        AppIntent::ViewPanned { delta_px } => vec![AppCommand::PanView { delta_px }],
        AppIntent::ViewZoomed { amount } => vec![AppCommand::ZoomView { amount }],
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],

        AppIntent::SyncMessageReceived { json } => vec![AppCommand::ApplySyncMessage { json }],
        AppIntent::CopyRequested => vec![AppCommand::CopyCurves],
        AppIntent::FileSelected { path } => vec![AppCommand::LoadCurvesFile { path }],
        AppIntent::SaveRequested { path } => vec![AppCommand::SaveCurvesFile { path }],

        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
    }
}

/// Guide-Marker und Einzelpunkt: absolut auf die Zeigerposition. Mehrere Punkte: relatives Delta.
fn map_pointer_drag(
    state: &AppState,
    screen_pos: DVec2,
    screen_delta: DVec2,
    lock_frame: bool,
) -> Vec<AppCommand> {
    if state.drag.guide {
        return vec![AppCommand::SetGuidePoint {
            world_pos: state.view.unproject(screen_pos),
        }];
    }

    let selection = &state.curves.selection;
    let axes = if lock_frame { DVec2::Y } else { DVec2::ONE };

    if selection.is_single_point() {
        vec![AppCommand::DragSelection {
            target: state.view.unproject(screen_pos),
            scale: axes,
        }]
    } else if selection.has_any_points() {
        let delta =
            state.view.unproject(screen_pos) - state.view.unproject(screen_pos - screen_delta);
        vec![AppCommand::MoveSelection {
            delta: delta * axes,
        }]
    } else {
        Vec::new()
    }
}
