// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, Reversibility};
use crate::config::RemovalPolicy;
use crate::error::CoreError;
use crate::state::{CourseState, TransitionResult, WorkKey};
use gradebook_audit::{Action, Actor, AuditEvent};
use gradebook_domain::{
    Assignment, AssignmentCategory, AssignmentGrade, AssignmentId, AssignmentSubmission,
    CategoryId, DomainError, GradeSchemaRef, LatePolicyRef, LetterGrade, Role, StudentRecord,
    UserId, validate_assignment, validate_category, validate_course_name, validate_score,
    validate_student_record,
};
use std::collections::{BTreeMap, BTreeSet};
use time::{Duration, OffsetDateTime};

/// Restores the exact slot of course state a command touched.
///
/// An inverse is captured from the state a command was applied to, so
/// `revert(apply(s, c).new_state, inverse) == s` for every reversible command.
#[derive(Debug, Clone, PartialEq)]
pub enum Inverse {
    /// Put back the previous course name.
    RestoreName(String),
    /// Put back the previous grade schema.
    RestoreGradeSchema(GradeSchemaRef),
    /// Put back the previous late policy.
    RestoreLatePolicy(LatePolicyRef),
    /// Put back a category as it was; `None` removes it.
    RestoreCategory {
        /// The category slot.
        id: CategoryId,
        /// Its previous content.
        previous: Option<AssignmentCategory>,
    },
    /// Put back a submission as it was; `None` removes it.
    RestoreSubmission {
        /// The `(assignment, student)` slot.
        key: WorkKey,
        /// Its previous content.
        previous: Option<AssignmentSubmission>,
    },
    /// Put back a grade as it was; `None` removes it.
    RestoreGrade {
        /// The `(assignment, student)` slot.
        key: WorkKey,
        /// Its previous content.
        previous: Option<AssignmentGrade>,
    },
    /// Put back a student's record and role entry as they were.
    RestoreEnrollment {
        /// The student.
        student: UserId,
        /// The previous record; `None` un-enrolls.
        record: Option<StudentRecord>,
        /// The previous role entry; `None` unregisters.
        roles: Option<BTreeSet<Role>>,
    },
    /// Put back a user's role entry as it was.
    RestoreRoles {
        /// The user.
        user: UserId,
        /// The previous role entry; `None` unregisters.
        roles: Option<BTreeSet<Role>>,
    },
}

/// Applies a command to the current state, producing a new state and audit event.
///
/// The input state is never modified. On error nothing changes.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `removal_policy` - How student removal treats submissions and grades
/// * `at` - The instant recorded on the audit event
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, its inverse and the audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - A referenced category, assignment, submission or student does not exist
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &CourseState,
    command: &Command,
    actor: Actor,
    removal_policy: RemovalPolicy,
    at: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let mut new_state: CourseState = state.clone();

    let (inverse, details): (Inverse, String) = match command {
        Command::SetName { name } => {
            validate_course_name(name)?;
            new_state.name.clone_from(name);
            (
                Inverse::RestoreName(state.name.clone()),
                format!("Renamed course from '{}' to '{name}'", state.name),
            )
        }
        Command::SetGradeSchema { schema } => {
            new_state.grade_schema = schema.clone();
            (
                Inverse::RestoreGradeSchema(state.grade_schema.clone()),
                format!(
                    "Replaced grade schema '{}' with '{}'",
                    state.grade_schema.name(),
                    schema.name()
                ),
            )
        }
        Command::SetLatePolicy { policy } => {
            new_state.late_policy = policy.clone();
            (
                Inverse::RestoreLatePolicy(state.late_policy.clone()),
                format!(
                    "Replaced late policy '{}' with '{}'",
                    state.late_policy.name(),
                    policy.name()
                ),
            )
        }
        Command::AddAssignmentCategory { category } => {
            validate_category(category)?;
            if state.assignment_categories.contains_key(&category.id) {
                return Err(DomainError::DuplicateCategory(category.id.clone()).into());
            }
            if let Some(duplicate) = category
                .assignments
                .keys()
                .find(|id| state.find_assignment(id).is_some())
            {
                return Err(DomainError::DuplicateAssignment(duplicate.clone()).into());
            }
            new_state
                .assignment_categories
                .insert(category.id.clone(), category.clone());
            (
                Inverse::RestoreCategory {
                    id: category.id.clone(),
                    previous: None,
                },
                format!(
                    "Added category '{}' ({}%, {} assignments)",
                    category.id,
                    category.weight,
                    category.assignments.len()
                ),
            )
        }
        Command::UpdateAssignmentCategory {
            category,
            name,
            weight,
        } => {
            let existing: &AssignmentCategory = require_category(state, category)?;
            let mut updated: AssignmentCategory = existing.clone();
            updated.name.clone_from(name);
            updated.weight = *weight;
            validate_category(&updated)?;
            new_state
                .assignment_categories
                .insert(category.clone(), updated);
            (
                Inverse::RestoreCategory {
                    id: category.clone(),
                    previous: Some(existing.clone()),
                },
                format!("Updated category '{category}' to '{name}' ({weight}%)"),
            )
        }
        Command::AddAssignment {
            category,
            assignment,
        } => {
            validate_assignment(assignment)?;
            let existing: &AssignmentCategory = require_category(state, category)?;
            if state.find_assignment(&assignment.id).is_some() {
                return Err(DomainError::DuplicateAssignment(assignment.id.clone()).into());
            }
            let mut updated: AssignmentCategory = existing.clone();
            updated
                .assignments
                .insert(assignment.id.clone(), assignment.clone());
            new_state
                .assignment_categories
                .insert(category.clone(), updated);
            (
                Inverse::RestoreCategory {
                    id: category.clone(),
                    previous: Some(existing.clone()),
                },
                format!("Added assignment '{}' to category '{category}'", assignment.id),
            )
        }
        Command::UpdateAssignment { assignment } => {
            validate_assignment(assignment)?;
            let existing: &AssignmentCategory = state
                .assignment_categories
                .values()
                .find(|c| c.assignments.contains_key(&assignment.id))
                .ok_or_else(|| CoreError::AssignmentNotFound(assignment.id.clone()))?;
            let mut updated: AssignmentCategory = existing.clone();
            updated
                .assignments
                .insert(assignment.id.clone(), assignment.clone());
            new_state
                .assignment_categories
                .insert(existing.id.clone(), updated);
            (
                Inverse::RestoreCategory {
                    id: existing.id.clone(),
                    previous: Some(existing.clone()),
                },
                format!("Updated assignment '{}'", assignment.id),
            )
        }
        Command::AddAssignmentSubmission { submission } => {
            require_assignment(state, &submission.assignment)?;
            require_enrolled(state, &submission.student)?;
            let key: WorkKey = (submission.assignment.clone(), submission.student.clone());
            if state.submissions.contains_key(&key) {
                return Err(DomainError::DuplicateSubmission {
                    assignment: key.0,
                    student: key.1,
                }
                .into());
            }
            new_state.submissions.insert(key.clone(), submission.clone());
            (
                Inverse::RestoreSubmission {
                    key,
                    previous: None,
                },
                format!(
                    "Recorded submission for '{}' by '{}'",
                    submission.assignment, submission.student
                ),
            )
        }
        Command::UpdateAssignmentSubmission { submission } => {
            require_assignment(state, &submission.assignment)?;
            require_enrolled(state, &submission.student)?;
            let key: WorkKey = (submission.assignment.clone(), submission.student.clone());
            let previous: AssignmentSubmission =
                state.submissions.get(&key).cloned().ok_or_else(|| {
                    CoreError::SubmissionNotFound {
                        assignment: key.0.clone(),
                        student: key.1.clone(),
                    }
                })?;
            new_state.submissions.insert(key.clone(), submission.clone());
            (
                Inverse::RestoreSubmission {
                    key,
                    previous: Some(previous),
                },
                format!(
                    "Replaced submission for '{}' by '{}'",
                    submission.assignment, submission.student
                ),
            )
        }
        Command::UpdateAssignmentGrade {
            assignment,
            student,
            raw_score,
        } => {
            validate_score(*raw_score)?;
            let graded: &Assignment = require_assignment(state, assignment)?;
            require_enrolled(state, student)?;
            let key: WorkKey = (assignment.clone(), student.clone());

            let lateness: Duration = state
                .submissions
                .get(&key)
                .map_or(Duration::ZERO, |s| graded.lateness(s.submitted_at));
            let adjusted_score: f64 = state.late_policy.apply_penalty(*raw_score, lateness);
            let letter: LetterGrade = state.grade_schema.to_letter_grade(adjusted_score);

            let grade: AssignmentGrade = AssignmentGrade {
                assignment: assignment.clone(),
                student: student.clone(),
                raw_score: *raw_score,
                adjusted_score,
                letter,
            };
            new_state.grades.insert(key.clone(), grade);
            (
                Inverse::RestoreGrade {
                    previous: state.grades.get(&key).cloned(),
                    key,
                },
                format!(
                    "Graded '{assignment}' for '{student}': raw {raw_score}, adjusted {adjusted_score}, letter {letter}"
                ),
            )
        }
        Command::AddStudent { record } => {
            validate_student_record(record)?;
            if state.is_enrolled(&record.student) {
                return Err(DomainError::DuplicateStudent(record.student.clone()).into());
            }
            if !state.role_manager.has_role(&record.student, Role::Student) {
                new_state
                    .role_manager
                    .grant_role(&record.student, Role::Student)?;
            }
            new_state
                .student_records
                .insert(record.student.clone(), record.clone());
            (
                Inverse::RestoreEnrollment {
                    student: record.student.clone(),
                    record: None,
                    roles: state.role_manager.role_entry(&record.student),
                },
                format!("Enrolled student '{}'", record.student),
            )
        }
        Command::RemoveStudent { student } => {
            let record: StudentRecord = state
                .student_records
                .get(student)
                .cloned()
                .ok_or_else(|| CoreError::StudentNotFound(student.clone()))?;
            new_state.student_records.remove(student);
            if removal_policy == RemovalPolicy::Purge {
                new_state.submissions.retain(|(_, s), _| s != student);
                new_state.grades.retain(|(_, s), _| s != student);
            }
            (
                Inverse::RestoreEnrollment {
                    student: student.clone(),
                    record: Some(record),
                    roles: state.role_manager.role_entry(student),
                },
                format!("Removed student '{student}' (policy: {removal_policy})"),
            )
        }
        Command::GrantRole { user, role } => {
            new_state.role_manager.grant_role(user, *role)?;
            (
                Inverse::RestoreRoles {
                    user: user.clone(),
                    roles: state.role_manager.role_entry(user),
                },
                format!("Granted role {role} to '{user}'"),
            )
        }
        Command::RevokeRole { user, role } => {
            new_state.role_manager.revoke_role(user, *role)?;
            if !new_state.role_manager.is_registered(user) {
                if state.is_enrolled(user) {
                    return Err(DomainError::LastRoleOfEnrolledStudent(user.clone()).into());
                }
                if state.has_work(user) {
                    return Err(DomainError::LastRoleOfReferencedUser(user.clone()).into());
                }
            }
            (
                Inverse::RestoreRoles {
                    user: user.clone(),
                    roles: state.role_manager.role_entry(user),
                },
                format!("Revoked role {role} from '{user}'"),
            )
        }
    };

    let inverse: Option<Inverse> = match command.reversibility(removal_policy) {
        Reversibility::Reversible => Some(inverse),
        Reversibility::Terminal => None,
    };

    let action: Action = Action::new(command.name().to_string(), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        action,
        state.to_audit_snapshot(),
        new_state.to_audit_snapshot(),
        at,
    );

    Ok(TransitionResult {
        new_state,
        inverse,
        audit_event,
    })
}

/// Applies an inverse to `state`, producing the state it was captured from.
#[must_use]
pub fn revert(state: &CourseState, inverse: &Inverse) -> CourseState {
    let mut restored: CourseState = state.clone();

    match inverse {
        Inverse::RestoreName(name) => restored.name.clone_from(name),
        Inverse::RestoreGradeSchema(schema) => restored.grade_schema = schema.clone(),
        Inverse::RestoreLatePolicy(policy) => restored.late_policy = policy.clone(),
        Inverse::RestoreCategory { id, previous } => {
            restore_slot(&mut restored.assignment_categories, id, previous.as_ref());
        }
        Inverse::RestoreSubmission { key, previous } => {
            restore_slot(&mut restored.submissions, key, previous.as_ref());
        }
        Inverse::RestoreGrade { key, previous } => {
            restore_slot(&mut restored.grades, key, previous.as_ref());
        }
        Inverse::RestoreEnrollment {
            student,
            record,
            roles,
        } => {
            restore_slot(&mut restored.student_records, student, record.as_ref());
            restored.role_manager.restore_roles(student, roles.clone());
        }
        Inverse::RestoreRoles { user, roles } => {
            restored.role_manager.restore_roles(user, roles.clone());
        }
    }

    restored
}

fn restore_slot<K: Ord + Clone, V: Clone>(map: &mut BTreeMap<K, V>, key: &K, previous: Option<&V>) {
    match previous {
        Some(value) => {
            map.insert(key.clone(), value.clone());
        }
        None => {
            map.remove(key);
        }
    }
}

fn require_category<'a>(
    state: &'a CourseState,
    id: &CategoryId,
) -> Result<&'a AssignmentCategory, CoreError> {
    state
        .assignment_categories
        .get(id)
        .ok_or_else(|| CoreError::CategoryNotFound(id.clone()))
}

pub(crate) fn require_assignment<'a>(
    state: &'a CourseState,
    id: &AssignmentId,
) -> Result<&'a Assignment, CoreError> {
    state
        .find_assignment(id)
        .map(|(_, assignment)| assignment)
        .ok_or_else(|| CoreError::AssignmentNotFound(id.clone()))
}

fn require_enrolled(state: &CourseState, student: &UserId) -> Result<(), CoreError> {
    if state.is_enrolled(student) {
        Ok(())
    } else {
        Err(CoreError::StudentNotFound(student.clone()))
    }
}
