// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gradebook_domain::{AssignmentId, CategoryId, DomainError, Permission, UserId};

/// Errors returned by course operations.
///
/// Permission and not-found conditions are expected outcomes; the course
/// never logs-and-swallows them, the caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The caller lacks the permission the operation requires.
    #[error("Permission denied: '{user}' lacks {required} for '{operation}'")]
    PermissionDenied {
        /// The calling user.
        user: UserId,
        /// The operation that was attempted.
        operation: String,
        /// The permission the operation requires.
        required: Permission,
    },
    /// The role manager has no entry for the user.
    #[error("Unknown user '{0}': no role entry in this course")]
    UnknownUser(UserId),
    /// `undo` was called on an empty history.
    #[error("Nothing to undo")]
    NothingToUndo,
    /// The most recent command cannot be undone.
    #[error("Command '{action}' is terminal and cannot be undone")]
    IrreversibleCommand {
        /// Name of the terminal command.
        action: String,
    },
    /// No student record exists for the user.
    #[error("Student '{0}' is not enrolled")]
    StudentNotFound(UserId),
    /// No assignment category with this id exists.
    #[error("Assignment category '{0}' not found")]
    CategoryNotFound(CategoryId),
    /// No assignment with this id exists.
    #[error("Assignment '{0}' not found")]
    AssignmentNotFound(AssignmentId),
    /// No submission exists for the `(assignment, student)` pair.
    #[error("No submission for assignment '{assignment}' by '{student}'")]
    SubmissionNotFound {
        /// The assignment.
        assignment: AssignmentId,
        /// The student.
        student: UserId,
    },
    /// No grade exists for the `(assignment, student)` pair.
    #[error("No grade for assignment '{assignment}' and student '{student}'")]
    GradeNotFound {
        /// The assignment.
        assignment: AssignmentId,
        /// The student.
        student: UserId,
    },
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
}
