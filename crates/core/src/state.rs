// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::Inverse;
use crate::config::RemovalPolicy;
use crate::role_manager::RoleManager;
use gradebook_audit::{AuditEvent, StateSnapshot};
use gradebook_domain::{
    Assignment, AssignmentCategory, AssignmentGrade, AssignmentId, AssignmentSubmission,
    CategoryId, GradeSchemaRef, LatePolicyRef, StudentRecord, UserId,
};
use std::collections::BTreeMap;

/// Key of the per-`(assignment, student)` submission and grade maps.
pub type WorkKey = (AssignmentId, UserId);

/// The complete mutable state of one course offering.
///
/// `CourseState` is a plain value: cloning it yields a fully independent
/// copy. Transitions never edit a state in place; they produce a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseState {
    /// Name of the course.
    pub name: String,
    /// Converts scores into letter grades.
    pub grade_schema: GradeSchemaRef,
    /// Penalizes late submissions.
    pub late_policy: LatePolicyRef,
    /// Who holds which role in this course.
    pub role_manager: RoleManager,
    /// One record per enrolled student.
    pub student_records: BTreeMap<UserId, StudentRecord>,
    /// Categories, each owning its assignments.
    pub assignment_categories: BTreeMap<CategoryId, AssignmentCategory>,
    /// At most one submission per `(assignment, student)`.
    pub submissions: BTreeMap<WorkKey, AssignmentSubmission>,
    /// At most one grade per `(assignment, student)`.
    pub grades: BTreeMap<WorkKey, AssignmentGrade>,
}

impl CourseState {
    /// Creates an empty course state.
    #[must_use]
    pub const fn new(
        name: String,
        grade_schema: GradeSchemaRef,
        late_policy: LatePolicyRef,
        role_manager: RoleManager,
    ) -> Self {
        Self {
            name,
            grade_schema,
            late_policy,
            role_manager,
            student_records: BTreeMap::new(),
            assignment_categories: BTreeMap::new(),
            submissions: BTreeMap::new(),
            grades: BTreeMap::new(),
        }
    }

    /// Whether `student` has a record in this course.
    #[must_use]
    pub fn is_enrolled(&self, student: &UserId) -> bool {
        self.student_records.contains_key(student)
    }

    /// Whether any submission or grade belongs to `student`.
    ///
    /// Under [`RemovalPolicy::Retain`] this can hold for a student who is no
    /// longer enrolled.
    #[must_use]
    pub fn has_work(&self, student: &UserId) -> bool {
        self.submissions
            .keys()
            .chain(self.grades.keys())
            .any(|(_, owner)| owner == student)
    }

    /// Finds an assignment in any category, with the id of its category.
    #[must_use]
    pub fn find_assignment(&self, id: &AssignmentId) -> Option<(&CategoryId, &Assignment)> {
        self.assignment_categories
            .iter()
            .find_map(|(category_id, category)| {
                category.assignment(id).map(|a| (category_id, a))
            })
    }

    /// Iterates over every assignment across all categories.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignment_categories
            .values()
            .flat_map(|category| category.assignments.values())
    }

    /// Checks the cross-collection invariants of the course.
    ///
    /// - Every enrolled student has a role entry.
    /// - Every student a submission or grade belongs to has a role entry,
    ///   enrolled or not.
    /// - Every submission and grade references an existing assignment.
    /// - Under [`RemovalPolicy::Purge`], every submission and grade
    ///   references an enrolled student.
    #[must_use]
    pub fn invariants_hold(&self, removal_policy: RemovalPolicy) -> bool {
        let records_registered: bool = self
            .student_records
            .keys()
            .all(|student| self.role_manager.is_registered(student));

        let work_keys = || self.submissions.keys().chain(self.grades.keys());

        let work_registered: bool =
            work_keys().all(|(_, student)| self.role_manager.is_registered(student));

        let assignments_exist: bool =
            work_keys().all(|(assignment, _)| self.find_assignment(assignment).is_some());

        let students_enrolled: bool = match removal_policy {
            RemovalPolicy::Retain => true,
            RemovalPolicy::Purge => work_keys().all(|(_, student)| self.is_enrolled(student)),
        };

        records_registered && work_registered && assignments_exist && students_enrolled
    }

    /// Converts the state to a compact summary for audit purposes.
    #[must_use]
    pub fn to_audit_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "name={},students_count={},categories_count={},assignments_count={},submissions_count={},grades_count={},users_count={},grade_schema={},late_policy={}",
            self.name,
            self.student_records.len(),
            self.assignment_categories.len(),
            self.assignments().count(),
            self.submissions.len(),
            self.grades.len(),
            self.role_manager.users().count(),
            self.grade_schema.name(),
            self.late_policy.name(),
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: CourseState,
    /// Restores the prior state, unless the command was terminal.
    pub inverse: Option<Inverse>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
