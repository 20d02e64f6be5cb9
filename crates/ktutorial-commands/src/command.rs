use ktutorial_model::Tutorial;

use crate::error::Result;

/// A reversible edit of a [`Tutorial`].
///
/// `redo` applies the edit and `undo` reverts it. Calls are expected to
/// alternate, starting with `redo`; [`UndoStack`](crate::UndoStack) and
/// [`CommandGroup`](crate::CommandGroup) guarantee that.
pub trait Command {
    /// Label shown in the undo history.
    fn text(&self) -> &str;

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()>;

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()>;
}

impl std::fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("text", &self.text()).finish()
    }
}
