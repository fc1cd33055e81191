// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AssignmentId, CategoryId, UserId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// User identifier is empty or invalid.
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
    /// A display name is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// A category weight is outside the allowed range.
    #[error("Invalid category weight {weight}: must be between 0 and 100")]
    InvalidWeight {
        /// The rejected weight.
        weight: u8,
    },
    /// An assignment point value is invalid.
    #[error("Invalid points possible: {0}")]
    InvalidPoints(String),
    /// A raw score is not a finite non-negative number.
    #[error("Invalid score: {0}")]
    InvalidScore(String),
    /// Role name could not be parsed.
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    /// Permission name could not be parsed.
    #[error("Invalid permission: {0}")]
    InvalidPermission(String),
    /// The student is already enrolled.
    #[error("Student '{0}' is already enrolled")]
    DuplicateStudent(UserId),
    /// An assignment category with this id already exists.
    #[error("Assignment category '{0}' already exists")]
    DuplicateCategory(CategoryId),
    /// An assignment with this id already exists somewhere in the course.
    #[error("Assignment '{0}' already exists")]
    DuplicateAssignment(AssignmentId),
    /// A submission for this `(assignment, student)` pair already exists.
    #[error("Submission for assignment '{assignment}' by '{student}' already exists")]
    DuplicateSubmission {
        /// The assignment.
        assignment: AssignmentId,
        /// The submitting student.
        student: UserId,
    },
    /// The user already holds the role.
    #[error("User '{user}' already holds role {role}")]
    RoleAlreadyGranted {
        /// The user.
        user: UserId,
        /// The role name.
        role: String,
    },
    /// The user does not hold the role.
    #[error("User '{user}' does not hold role {role}")]
    RoleNotHeld {
        /// The user.
        user: UserId,
        /// The role name.
        role: String,
    },
    /// Revoking the role would leave an enrolled student without any role.
    #[error("Cannot revoke the last role of enrolled student '{0}'")]
    LastRoleOfEnrolledStudent(UserId),
    /// Revoking the role would leave submissions or grades pointing at a
    /// user without any role.
    #[error("Cannot revoke the last role of '{0}': submissions or grades still reference them")]
    LastRoleOfReferencedUser(UserId),
}
