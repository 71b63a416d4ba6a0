//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Host-Events und Handler auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Selektion ===
            AppCommand::SelectPoint {
                world_pos,
                threshold_sq,
            } => handlers::selection::select_point(state, world_pos, threshold_sq),
            AppCommand::SelectInBox { corner_a, corner_b } => {
                handlers::selection::select_in_box(state, corner_a, corner_b)
            }
            AppCommand::SelectCurve { curve } => handlers::selection::select_curve(state, curve),
            AppCommand::ClearSelection => handlers::selection::clear(state),

            // === Punkt-Drag ===
            AppCommand::BeginPointDrag => handlers::editing::begin_point_drag(state),
            AppCommand::DragSelection { target, scale } => {
                handlers::editing::drag_selection(state, target, scale)
            }
            AppCommand::MoveSelection { delta } => handlers::editing::move_selection(state, delta),
            AppCommand::EndPointDrag => handlers::editing::end_point_drag(state),
            AppCommand::NormalizePointFrames => handlers::editing::normalize_point_frames(state),

            // === Keyframes & Punkt-Eigenschaften ===
            AppCommand::InsertKeyframe => handlers::editing::insert_keyframe(state),
            AppCommand::InsertKeyframeAllCurves => {
                handlers::editing::insert_keyframe_all_curves(state)
            }
            AppCommand::DeleteSelectedPoints => handlers::editing::delete_selected_points(state),
            AppCommand::SetPointType { kind } => handlers::editing::set_point_type(state, kind),
            AppCommand::SnapFrame { frame } => handlers::editing::snap_frame(state, frame),
            AppCommand::SnapValue { value } => handlers::editing::snap_value(state, value),
            AppCommand::SetPointFrame { frame } => handlers::editing::set_point_frame(state, frame),
            AppCommand::SetPointValue { value } => handlers::editing::set_point_value(state, value),
            AppCommand::SetValueAtGuideFrame { value } => {
                handlers::editing::set_value_at_guide_frame(state, value)
            }

            // === Kurven ===
            AppCommand::AddCurve { name } => handlers::editing::add_curve(state, name),
            AppCommand::RenameCurve { name } => handlers::editing::rename_curve(state, name),
            AppCommand::ToggleVisible => handlers::editing::toggle_visible(state),
            AppCommand::ToggleLocked => handlers::editing::toggle_locked(state),

            // === History ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),

            // === Wiedergabe ===
            AppCommand::BeginGuideDrag => handlers::playback::begin_guide_drag(state),
            AppCommand::SetGuidePoint { world_pos } => {
                handlers::playback::set_guide_point(state, world_pos)
            }
            AppCommand::SetGuideFrameToSelectedPoint => {
                handlers::playback::set_guide_frame_to_selected_point(state)
            }
            AppCommand::SetPlaybackFps { fps } => handlers::playback::set_fps(state, fps),
            AppCommand::PlayOrPause => handlers::playback::play_or_pause(state),
            AppCommand::SetRepeatFrame => handlers::playback::set_repeat_frame(state),
            AppCommand::ClearRepeatFrame => handlers::playback::clear_repeat_frame(state),
            AppCommand::AdvancePlayback { delta_seconds } => {
                handlers::playback::advance(state, delta_seconds)
            }

            // === Ansicht ===
            AppCommand::PanView { delta_px } => handlers::view::pan(state, delta_px),
            AppCommand::ZoomView { amount } => handlers::view::zoom(state, amount),
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),

            // === Datei-I/O & Sync ===
            AppCommand::ApplySyncMessage { json } => {
                handlers::file_io::apply_sync_message(state, &json)
            }
            AppCommand::CopyCurves => handlers::file_io::copy_curves(state)?,
            AppCommand::LoadCurvesFile { path } => handlers::file_io::load(state, path)?,
            AppCommand::SaveCurvesFile { path } => handlers::file_io::save(state, path)?,

            // === Optionen ===
            AppCommand::ApplyOptions { options } => handlers::options::apply(state, options)?,
            AppCommand::ResetOptions => handlers::options::reset(state)?,
        }

        Ok(())
    }
}
