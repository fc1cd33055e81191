// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::Inverse;
use crate::command::Command;
use crate::error::CoreError;
use gradebook_audit::AuditEvent;
use gradebook_domain::UserId;
use time::OffsetDateTime;

/// One executed command, as recorded in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The command that was executed.
    pub command: Command,
    /// The user who executed it.
    pub actor: UserId,
    /// When it was executed.
    pub executed_at: OffsetDateTime,
    /// Restores the state the command was applied to. `None` for terminal commands.
    pub inverse: Option<Inverse>,
    /// The audit event produced by the transition.
    pub audit_event: AuditEvent,
}

impl HistoryEntry {
    /// Whether this entry can be undone.
    #[must_use]
    pub const fn is_reversible(&self) -> bool {
        self.inverse.is_some()
    }
}

/// Ordered record of executed commands for one course.
///
/// Entries appear in execution order. The history is append-only except
/// for [`CommandHistory::pop_for_undo`], which only ever removes the most
/// recent entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandHistory {
    entries: Vec<HistoryEntry>,
}

impl CommandHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub(crate) fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Returns the most recent entry without removing it.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Checks that the most recent entry can be undone and returns it.
    ///
    /// # Errors
    ///
    /// - `CoreError::NothingToUndo` if the history is empty
    /// - `CoreError::IrreversibleCommand` if the most recent entry is terminal
    pub fn peek_undoable(&self) -> Result<&HistoryEntry, CoreError> {
        let entry: &HistoryEntry = self.entries.last().ok_or(CoreError::NothingToUndo)?;
        if !entry.is_reversible() {
            return Err(CoreError::IrreversibleCommand {
                action: entry.command.name().to_string(),
            });
        }
        Ok(entry)
    }

    /// Removes the most recent entry if it can be undone, returning its
    /// command and inverse.
    ///
    /// On error the history is left unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`CommandHistory::peek_undoable`].
    pub(crate) fn pop_for_undo(&mut self) -> Result<(Command, Inverse), CoreError> {
        self.peek_undoable()?;
        match self.entries.pop() {
            Some(HistoryEntry {
                command,
                inverse: Some(inverse),
                ..
            }) => Ok((command, inverse)),
            Some(entry) => {
                let action: String = entry.command.name().to_string();
                self.entries.push(entry);
                Err(CoreError::IrreversibleCommand { action })
            }
            None => Err(CoreError::NothingToUndo),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
