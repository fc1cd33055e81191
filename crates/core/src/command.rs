// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::RemovalPolicy;
use gradebook_domain::{
    Assignment, AssignmentCategory, AssignmentId, AssignmentSubmission, CategoryId,
    GradeSchemaRef, LatePolicyRef, Permission, Role, StudentRecord, UserId,
};

/// Whether a command can be undone once it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reversibility {
    /// Undo restores the exact prior state.
    Reversible,
    /// The command discards information; undo is refused.
    Terminal,
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes. They are immutable;
/// applying one never modifies it. The data needed to reverse a command is
/// captured from the course state at the moment it is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Rename the course.
    SetName {
        /// The new name.
        name: String,
    },
    /// Replace the grade schema.
    SetGradeSchema {
        /// The new schema.
        schema: GradeSchemaRef,
    },
    /// Replace the late policy.
    SetLatePolicy {
        /// The new policy.
        policy: LatePolicyRef,
    },
    /// Add a new assignment category (optionally with assignments).
    AddAssignmentCategory {
        /// The category to add.
        category: AssignmentCategory,
    },
    /// Rename or reweight an existing category. Its assignments are kept.
    UpdateAssignmentCategory {
        /// The category to update.
        category: CategoryId,
        /// The new name.
        name: String,
        /// The new weight, in percent.
        weight: u8,
    },
    /// Add an assignment to an existing category.
    AddAssignment {
        /// The owning category.
        category: CategoryId,
        /// The assignment to add.
        assignment: Assignment,
    },
    /// Replace an existing assignment, located by its id.
    UpdateAssignment {
        /// The replacement assignment.
        assignment: Assignment,
    },
    /// Record a first submission for an `(assignment, student)` pair.
    AddAssignmentSubmission {
        /// The submission.
        submission: AssignmentSubmission,
    },
    /// Replace an existing submission.
    UpdateAssignmentSubmission {
        /// The replacement submission.
        submission: AssignmentSubmission,
    },
    /// Record or replace the grade for an `(assignment, student)` pair.
    UpdateAssignmentGrade {
        /// The graded assignment.
        assignment: AssignmentId,
        /// The graded student.
        student: UserId,
        /// Score as entered by the grader, in percent.
        raw_score: f64,
    },
    /// Enroll a student.
    AddStudent {
        /// The new student record.
        record: StudentRecord,
    },
    /// Remove an enrolled student.
    RemoveStudent {
        /// The student to remove.
        student: UserId,
    },
    /// Grant a role to a user.
    GrantRole {
        /// The user.
        user: UserId,
        /// The role to grant.
        role: Role,
    },
    /// Revoke a role from a user.
    RevokeRole {
        /// The user.
        user: UserId,
        /// The role to revoke.
        role: Role,
    },
}

impl Command {
    /// The permission a caller must hold to execute this command.
    #[must_use]
    pub const fn required_permission(&self) -> Permission {
        match self {
            Self::SetName { .. } => Permission::UpdateCourseName,
            Self::SetGradeSchema { .. } => Permission::UpdateCourseGradeSchema,
            Self::SetLatePolicy { .. } => Permission::UpdateCourseLatePolicy,
            Self::AddAssignmentCategory { .. } => Permission::AddAssignmentCategory,
            Self::UpdateAssignmentCategory { .. } => Permission::UpdateAssignmentCategory,
            Self::AddAssignment { .. } => Permission::AddAssignment,
            Self::UpdateAssignment { .. } => Permission::UpdateAssignment,
            Self::AddAssignmentSubmission { .. } => Permission::AddAssignmentSubmission,
            Self::UpdateAssignmentSubmission { .. } => Permission::UpdateAssignmentSubmission,
            Self::UpdateAssignmentGrade { .. } => Permission::UpdateAssignmentGrade,
            Self::AddStudent { .. } => Permission::AddStudent,
            Self::RemoveStudent { .. } => Permission::RemoveStudent,
            Self::GrantRole { .. } | Self::RevokeRole { .. } => Permission::ManageRoles,
        }
    }

    /// The action name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetName { .. } => "SetName",
            Self::SetGradeSchema { .. } => "SetGradeSchema",
            Self::SetLatePolicy { .. } => "SetLatePolicy",
            Self::AddAssignmentCategory { .. } => "AddAssignmentCategory",
            Self::UpdateAssignmentCategory { .. } => "UpdateAssignmentCategory",
            Self::AddAssignment { .. } => "AddAssignment",
            Self::UpdateAssignment { .. } => "UpdateAssignment",
            Self::AddAssignmentSubmission { .. } => "AddAssignmentSubmission",
            Self::UpdateAssignmentSubmission { .. } => "UpdateAssignmentSubmission",
            Self::UpdateAssignmentGrade { .. } => "UpdateAssignmentGrade",
            Self::AddStudent { .. } => "AddStudent",
            Self::RemoveStudent { .. } => "RemoveStudent",
            Self::GrantRole { .. } => "GrantRole",
            Self::RevokeRole { .. } => "RevokeRole",
        }
    }

    /// Whether this command can be undone under the given removal policy.
    ///
    /// Only a purging `RemoveStudent` is terminal: the purged submissions and
    /// grades are gone, and re-enrolling cannot bring them back.
    #[must_use]
    pub const fn reversibility(&self, removal_policy: RemovalPolicy) -> Reversibility {
        match (self, removal_policy) {
            (Self::RemoveStudent { .. }, RemovalPolicy::Purge) => Reversibility::Terminal,
            _ => Reversibility::Reversible,
        }
    }
}
