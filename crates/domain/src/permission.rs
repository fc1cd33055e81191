// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A single named capability checked against a user's role union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Read the course name.
    AccessCourseName,
    /// Change the course name.
    UpdateCourseName,
    /// Read the grade schema.
    AccessCourseGradeSchema,
    /// Replace the grade schema.
    UpdateCourseGradeSchema,
    /// Read the late policy.
    AccessCourseLatePolicy,
    /// Replace the late policy.
    UpdateCourseLatePolicy,
    /// Read assignments.
    AccessAssignment,
    /// Read assignment categories.
    AccessAssignmentCategory,
    /// Read assignment submissions.
    AccessAssignmentSubmission,
    /// Read assignment grades of any student.
    AccessAssignmentGrade,
    /// Add an assignment to a category.
    AddAssignment,
    /// Update an existing assignment.
    UpdateAssignment,
    /// Add an assignment category.
    AddAssignmentCategory,
    /// Update an existing assignment category.
    UpdateAssignmentCategory,
    /// Record a new submission.
    AddAssignmentSubmission,
    /// Replace an existing submission.
    UpdateAssignmentSubmission,
    /// Record or change a grade.
    UpdateAssignmentGrade,
    /// Materialize a new course snapshot.
    CreateCourseSnapshot,
    /// Read the most recent course snapshot.
    AccessCourseSnapshot,
    /// Read student records.
    AccessStudentRecord,
    /// Enroll a student.
    AddStudent,
    /// Remove a student.
    RemoveStudent,
    /// Grant or revoke roles.
    ManageRoles,
    /// Read the command history.
    AccessCommandHistory,
    /// Undo the most recent command.
    UndoCommand,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Self; 25] = [
        Self::AccessCourseName,
        Self::UpdateCourseName,
        Self::AccessCourseGradeSchema,
        Self::UpdateCourseGradeSchema,
        Self::AccessCourseLatePolicy,
        Self::UpdateCourseLatePolicy,
        Self::AccessAssignment,
        Self::AccessAssignmentCategory,
        Self::AccessAssignmentSubmission,
        Self::AccessAssignmentGrade,
        Self::AddAssignment,
        Self::UpdateAssignment,
        Self::AddAssignmentCategory,
        Self::UpdateAssignmentCategory,
        Self::AddAssignmentSubmission,
        Self::UpdateAssignmentSubmission,
        Self::UpdateAssignmentGrade,
        Self::CreateCourseSnapshot,
        Self::AccessCourseSnapshot,
        Self::AccessStudentRecord,
        Self::AddStudent,
        Self::RemoveStudent,
        Self::ManageRoles,
        Self::AccessCommandHistory,
        Self::UndoCommand,
    ];

    /// Converts this permission to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AccessCourseName => "ACCESS_COURSE_NAME",
            Self::UpdateCourseName => "UPDATE_COURSE_NAME",
            Self::AccessCourseGradeSchema => "ACCESS_COURSE_GRADE_SCHEMA",
            Self::UpdateCourseGradeSchema => "UPDATE_COURSE_GRADE_SCHEMA",
            Self::AccessCourseLatePolicy => "ACCESS_COURSE_LATE_POLICY",
            Self::UpdateCourseLatePolicy => "UPDATE_COURSE_LATE_POLICY",
            Self::AccessAssignment => "ACCESS_ASSIGNMENT",
            Self::AccessAssignmentCategory => "ACCESS_ASSIGNMENT_CATEGORY",
            Self::AccessAssignmentSubmission => "ACCESS_ASSIGNMENT_SUBMISSION",
            Self::AccessAssignmentGrade => "ACCESS_ASSIGNMENT_GRADE",
            Self::AddAssignment => "ADD_ASSIGNMENT",
            Self::UpdateAssignment => "UPDATE_ASSIGNMENT",
            Self::AddAssignmentCategory => "ADD_ASSIGNMENT_CATEGORY",
            Self::UpdateAssignmentCategory => "UPDATE_ASSIGNMENT_CATEGORY",
            Self::AddAssignmentSubmission => "ADD_ASSIGNMENT_SUBMISSION",
            Self::UpdateAssignmentSubmission => "UPDATE_ASSIGNMENT_SUBMISSION",
            Self::UpdateAssignmentGrade => "UPDATE_ASSIGNMENT_GRADE",
            Self::CreateCourseSnapshot => "CREATE_COURSE_SNAPSHOT",
            Self::AccessCourseSnapshot => "ACCESS_COURSE_SNAPSHOT",
            Self::AccessStudentRecord => "ACCESS_STUDENT_RECORD",
            Self::AddStudent => "ADD_STUDENT",
            Self::RemoveStudent => "REMOVE_STUDENT",
            Self::ManageRoles => "MANAGE_ROLES",
            Self::AccessCommandHistory => "ACCESS_COMMAND_HISTORY",
            Self::UndoCommand => "UNDO_COMMAND",
        }
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::InvalidPermission(s.to_string()))
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of permissions granted to a role.
///
/// A `PermissionSet` is immutable once constructed. Combining sets with
/// [`PermissionSet::union`] produces a new set and leaves both inputs intact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: BTreeSet<Permission>,
}

impl PermissionSet {
    /// Creates a permission set from any collection of permissions.
    #[must_use]
    pub fn new(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Creates an empty permission set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            permissions: BTreeSet::new(),
        }
    }

    /// Creates a permission set holding every permission.
    #[must_use]
    pub fn all() -> Self {
        Self::new(Permission::ALL)
    }

    /// Returns whether the set grants `permission`.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Returns the union of this set and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            permissions: self
                .permissions
                .union(&other.permissions)
                .copied()
                .collect(),
        }
    }

    /// Iterates over the permissions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    /// Number of permissions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Returns whether the set grants nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Returns the built-in permission set for a role.
///
/// - Students read course metadata, categories, assignments and snapshots,
///   and may submit their own work.
/// - Teaching assistants additionally read records, submissions and grades,
///   and may update submissions and grades.
/// - Professors hold every permission.
#[must_use]
pub fn default_permissions(role: Role) -> PermissionSet {
    const STUDENT: [Permission; 8] = [
        Permission::AccessCourseName,
        Permission::AccessCourseGradeSchema,
        Permission::AccessCourseLatePolicy,
        Permission::AccessAssignment,
        Permission::AccessAssignmentCategory,
        Permission::AccessCourseSnapshot,
        Permission::AddAssignmentSubmission,
        Permission::UpdateAssignmentSubmission,
    ];
    const STAFF: [Permission; 5] = [
        Permission::AccessStudentRecord,
        Permission::AccessAssignmentSubmission,
        Permission::AccessAssignmentGrade,
        Permission::UpdateAssignmentGrade,
        Permission::CreateCourseSnapshot,
    ];

    match role {
        Role::Student => PermissionSet::new(STUDENT),
        Role::TeachingAssistant => PermissionSet::new(STUDENT.into_iter().chain(STAFF)),
        Role::Professor => PermissionSet::all(),
    }
}
