// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::role_manager::RoleManager;
use crate::state::CourseState;
use gradebook_domain::{
    Assignment, AssignmentCategory, CategoryId, GradeSchemaRef, LatePolicyRef, StudentRecord,
    UserId,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Read-only, point-in-time copy of a course for student-facing reads.
///
/// A snapshot owns its data. Later changes to the live course are never
/// visible through it, and it offers no way to write back.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSnapshot {
    name: String,
    grade_schema: GradeSchemaRef,
    late_policy: LatePolicyRef,
    role_manager: RoleManager,
    student_records: BTreeMap<UserId, StudentRecord>,
    assignment_categories: BTreeMap<CategoryId, AssignmentCategory>,
    created_at: OffsetDateTime,
    created_by: UserId,
}

impl CourseSnapshot {
    /// Copies the snapshotted fields of `state`.
    pub(crate) fn capture(state: &CourseState, created_by: UserId, created_at: OffsetDateTime) -> Self {
        Self {
            name: state.name.clone(),
            grade_schema: state.grade_schema.clone(),
            late_policy: state.late_policy.clone(),
            role_manager: state.role_manager.clone(),
            student_records: state.student_records.clone(),
            assignment_categories: state.assignment_categories.clone(),
            created_at,
            created_by,
        }
    }

    /// Course name at snapshot time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grade schema at snapshot time.
    #[must_use]
    pub const fn grade_schema(&self) -> &GradeSchemaRef {
        &self.grade_schema
    }

    /// Late policy at snapshot time.
    #[must_use]
    pub const fn late_policy(&self) -> &LatePolicyRef {
        &self.late_policy
    }

    /// Role assignments at snapshot time.
    #[must_use]
    pub const fn role_manager(&self) -> &RoleManager {
        &self.role_manager
    }

    /// Student records at snapshot time.
    #[must_use]
    pub const fn student_records(&self) -> &BTreeMap<UserId, StudentRecord> {
        &self.student_records
    }

    /// A single student's record at snapshot time.
    #[must_use]
    pub fn student_record(&self, student: &UserId) -> Option<&StudentRecord> {
        self.student_records.get(student)
    }

    /// Assignment categories at snapshot time.
    #[must_use]
    pub const fn assignment_categories(&self) -> &BTreeMap<CategoryId, AssignmentCategory> {
        &self.assignment_categories
    }

    /// Every assignment across all categories at snapshot time.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignment_categories
            .values()
            .flat_map(|category| category.assignments.values())
    }

    /// When the snapshot was taken.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Who took the snapshot.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }
}
