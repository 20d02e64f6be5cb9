use ktutorial_model::Tutorial;
use tracing::warn;

use crate::command::Command;
use crate::error::Result;

/// Several commands applied and reverted as one unit.
///
/// `redo` runs the children in order and `undo` in reverse order. When a
/// child fails, the children already run are reverted before the error is
/// returned, so the tutorial is left as it was.
#[derive(Debug, Default)]
pub struct CommandGroup {
    text: String,
    children: Vec<Box<dyn Command>>,
}

impl CommandGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Command + 'static) {
        self.children.push(Box::new(command));
    }

    pub fn push_boxed(&mut self, command: Box<dyn Command>) {
        self.children.push(command);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Close the group for the undo history.
    ///
    /// An empty group yields nothing. A group with a single child takes the
    /// child's label; otherwise the group is labelled with `text`.
    pub fn finish(mut self, text: impl Into<String>) -> Option<Box<dyn Command>> {
        let text = match self.children.as_slice() {
            [] => return None,
            [only] => only.text().to_string(),
            _ => text.into(),
        };
        self.text = text;
        Some(Box::new(self))
    }
}

impl Command for CommandGroup {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        for index in 0..self.children.len() {
            if let Err(error) = self.children[index].redo(tutorial) {
                for applied in self.children[..index].iter_mut().rev() {
                    if let Err(rollback) = applied.undo(tutorial) {
                        warn!(command = applied.text(), %rollback, "rollback failed");
                    }
                }
                return Err(error);
            }
        }
        Ok(())
    }

    fn undo(&mut self, tutorial: &mut Tutorial) -> Result<()> {
        for index in (0..self.children.len()).rev() {
            if let Err(error) = self.children[index].undo(tutorial) {
                for reverted in self.children[index + 1..].iter_mut() {
                    if let Err(rollback) = reverted.redo(tutorial) {
                        warn!(command = reverted.text(), %rollback, "rollback failed");
                    }
                }
                return Err(error);
            }
        }
        Ok(())
    }
}
