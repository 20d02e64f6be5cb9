use ktutorial_model::Tutorial;
use tracing::debug;

use crate::command::Command;
use crate::error::Result;
use crate::group::CommandGroup;

/// Linear undo history of edits applied to one tutorial.
///
/// Commands before `index` are applied; commands from `index` on form the
/// redo tail, which is discarded when a new command is pushed.
#[derive(Debug)]
pub struct UndoStack {
    commands: Vec<Box<dyn Command>>,
    index: usize,
    clean_index: Option<usize>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            clean_index: Some(0),
        }
    }

    /// Apply `command` and record it.
    ///
    /// A command that fails to apply is not recorded.
    pub fn push(&mut self, tutorial: &mut Tutorial, mut command: Box<dyn Command>) -> Result<()> {
        command.redo(tutorial)?;
        debug!(command = command.text(), "applied command");

        self.commands.truncate(self.index);
        if self.clean_index.is_some_and(|clean| clean > self.index) {
            self.clean_index = None;
        }
        self.commands.push(command);
        self.index += 1;
        Ok(())
    }

    /// Apply and record a group, unless it is empty.
    ///
    /// Returns whether anything was recorded.
    pub fn commit(
        &mut self,
        tutorial: &mut Tutorial,
        group: CommandGroup,
        text: impl Into<String>,
    ) -> Result<bool> {
        match group.finish(text) {
            Some(command) => {
                self.push(tutorial, command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Revert the last applied command. Returns `false` if there is none.
    pub fn undo(&mut self, tutorial: &mut Tutorial) -> Result<bool> {
        if self.index == 0 {
            return Ok(false);
        }
        let command = &mut self.commands[self.index - 1];
        command.undo(tutorial)?;
        debug!(command = command.text(), "undid command");
        self.index -= 1;
        Ok(true)
    }

    /// Reapply the next command of the redo tail. Returns `false` if there
    /// is none.
    pub fn redo(&mut self, tutorial: &mut Tutorial) -> Result<bool> {
        let Some(command) = self.commands.get_mut(self.index) else {
            return Ok(false);
        };
        command.redo(tutorial)?;
        debug!(command = command.text(), "redid command");
        self.index += 1;
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    pub fn undo_text(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .map(|index| self.commands[index].text())
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.commands.get(self.index).map(|command| command.text())
    }

    /// Number of recorded commands, including the redo tail.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of applied commands.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Mark the current position as the saved state.
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }

    /// Forget the whole history. The current state becomes the clean one.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
        self.clean_index = Some(0);
    }
}
