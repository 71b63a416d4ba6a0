//! Command-Log der ausgeführten Commands (Diagnose und Tests).

use super::AppCommand;

/// Begrenzte Liste der dispatchten Commands, älteste zuerst.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<AppCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Ab `MAX_ENTRIES` wird die ältere Hälfte verworfen. `AdvancePlayback`
    /// kommt pro Host-Tick und wird nicht geloggt.
    pub fn record(&mut self, command: &AppCommand) {
        if matches!(command, AppCommand::AdvancePlayback { .. }) {
            return;
        }
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AppCommand] {
        &self.entries
    }

    /// Zuletzt geloggter Command.
    pub fn last(&self) -> Option<&AppCommand> {
        self.entries.last()
    }
}
