// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability interfaces a course exposes beyond its plain accessors.

use crate::command::Command;
use crate::error::CoreError;
use crate::history::HistoryEntry;
use crate::session::Session;
use crate::state::CourseState;

/// Something commands can be executed against and undone on.
pub trait CommandTarget {
    /// Authorizes, applies and records `command` as one atomic step.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks the command's permission or the
    /// command is invalid for the current state. Nothing changes on error.
    fn execute(&self, session: &Session, command: Command) -> Result<(), CoreError>;

    /// Reverses the most recent command and removes it from the history.
    ///
    /// Returns the command that was undone.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks permission, the history is
    /// empty, or the most recent command is terminal.
    fn undo(&self, session: &Session) -> Result<Command, CoreError>;
}

/// Something whose history and full state can be audited.
pub trait AuditTarget {
    /// The executed commands, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks the audit permission.
    fn history(&self, session: &Session) -> Result<Vec<HistoryEntry>, CoreError>;

    /// A copy of the complete current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks the audit permission.
    fn inspect(&self, session: &Session) -> Result<CourseState, CoreError>;
}
