// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The course aggregate.
//!
//! Every accessor and mutator follows the same shape:
//! 1. Look up the caller's permissions in the course's role manager.
//! 2. On failure, release the lock, notify the observer and return a typed
//!    error. Nothing changes.
//! 3. On success, run the operation in full under the course lock. Mutations
//!    are appended to the command history with the acting user and a timestamp.
//!
//! Mutations and snapshot creation take the lock exclusively; plain reads
//! share it. The observer is never called with the lock held.

use crate::apply::{Inverse, apply, require_assignment, revert};
use crate::command::Command;
use crate::config::CourseConfig;
use crate::error::CoreError;
use crate::history::{CommandHistory, HistoryEntry};
use crate::observer::{AccessObserver, TracingObserver};
use crate::session::Session;
use crate::snapshot::CourseSnapshot;
use crate::state::{CourseState, TransitionResult};
use crate::target::{AuditTarget, CommandTarget};
use gradebook_audit::{AccessDenial, Actor};
use gradebook_domain::{
    Assignment, AssignmentCategory, AssignmentGrade, AssignmentId, AssignmentSubmission,
    CategoryId, GradeSchemaRef, LatePolicyRef, NoLatePenalty, Permission, PermissionSet, Role,
    StudentRecord, ThresholdGradeSchema, UserId, validate_course_name,
};
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use time::OffsetDateTime;
use tracing::{debug, info};

struct CourseInner {
    state: CourseState,
    history: CommandHistory,
    snapshot: Option<Arc<CourseSnapshot>>,
}

/// A failed permission check, captured under the lock and reported once the
/// lock is released.
struct Refusal {
    error: CoreError,
    denial: AccessDenial,
}

/// One course offering: the aggregate root of the gradebook.
///
/// A `Course` is safe to share between threads (`Arc<Course>`); all
/// operations take `&self` and are serialized by an internal lock.
pub struct Course {
    inner: RwLock<CourseInner>,
    config: CourseConfig,
    observer: Arc<dyn AccessObserver>,
}

impl Course {
    /// Creates a course owned by `owner`, who is granted the professor role.
    ///
    /// The course starts with a [`ThresholdGradeSchema`] and [`NoLatePenalty`].
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the owner id is invalid.
    pub fn new(name: &str, owner: &UserId, config: CourseConfig) -> Result<Self, CoreError> {
        validate_course_name(name)?;

        let mut role_manager = config.role_manager();
        role_manager.grant_role(owner, Role::Professor)?;

        let state: CourseState = CourseState::new(
            name.to_string(),
            GradeSchemaRef::new(ThresholdGradeSchema::default()),
            LatePolicyRef::new(NoLatePenalty),
            role_manager,
        );

        info!(
            course = name,
            owner = %owner,
            removal_policy = %config.removal_policy,
            "Created course"
        );

        Ok(Self {
            inner: RwLock::new(CourseInner {
                state,
                history: CommandHistory::new(),
                snapshot: None,
            }),
            config,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replaces the observer notified of denied attempts and recorded events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn AccessObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The configuration this course was created with.
    #[must_use]
    pub const fn config(&self) -> &CourseConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the course name.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_COURSE_NAME`.
    pub fn name(&self, session: &Session) -> Result<String, CoreError> {
        self.read_gated(session, "GetName", Permission::AccessCourseName, |state| {
            Ok(state.name.clone())
        })
    }

    /// Returns the grade schema.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_COURSE_GRADE_SCHEMA`.
    pub fn grade_schema(&self, session: &Session) -> Result<GradeSchemaRef, CoreError> {
        self.read_gated(
            session,
            "GetGradeSchema",
            Permission::AccessCourseGradeSchema,
            |state| Ok(state.grade_schema.clone()),
        )
    }

    /// Returns the late policy.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_COURSE_LATE_POLICY`.
    pub fn late_policy(&self, session: &Session) -> Result<LatePolicyRef, CoreError> {
        self.read_gated(
            session,
            "GetLatePolicy",
            Permission::AccessCourseLatePolicy,
            |state| Ok(state.late_policy.clone()),
        )
    }

    /// Returns every student record.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_STUDENT_RECORD`.
    pub fn student_records(&self, session: &Session) -> Result<Vec<StudentRecord>, CoreError> {
        self.read_gated(
            session,
            "GetStudentRecords",
            Permission::AccessStudentRecord,
            |state| Ok(state.student_records.values().cloned().collect()),
        )
    }

    /// Returns the record of one student.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_STUDENT_RECORD`; fails with `StudentNotFound` if the
    /// student is not enrolled.
    pub fn student_record(
        &self,
        session: &Session,
        student: &UserId,
    ) -> Result<StudentRecord, CoreError> {
        self.read_gated(
            session,
            "GetStudentRecord",
            Permission::AccessStudentRecord,
            |state| {
                state
                    .student_records
                    .get(student)
                    .cloned()
                    .ok_or_else(|| CoreError::StudentNotFound(student.clone()))
            },
        )
    }

    /// Returns every assignment across all categories.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_ASSIGNMENT`.
    pub fn assignments(&self, session: &Session) -> Result<Vec<Assignment>, CoreError> {
        self.read_gated(
            session,
            "GetAssignments",
            Permission::AccessAssignment,
            |state| Ok(state.assignments().cloned().collect()),
        )
    }

    /// Returns one assignment.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_ASSIGNMENT`; fails with `AssignmentNotFound` if it
    /// does not exist.
    pub fn assignment(
        &self,
        session: &Session,
        assignment: &AssignmentId,
    ) -> Result<Assignment, CoreError> {
        self.read_gated(
            session,
            "GetAssignment",
            Permission::AccessAssignment,
            |state| {
                state
                    .find_assignment(assignment)
                    .map(|(_, a)| a.clone())
                    .ok_or_else(|| CoreError::AssignmentNotFound(assignment.clone()))
            },
        )
    }

    /// Returns every assignment category with its assignments.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_ASSIGNMENT_CATEGORY`.
    pub fn assignment_categories(
        &self,
        session: &Session,
    ) -> Result<Vec<AssignmentCategory>, CoreError> {
        self.read_gated(
            session,
            "GetAssignmentCategories",
            Permission::AccessAssignmentCategory,
            |state| Ok(state.assignment_categories.values().cloned().collect()),
        )
    }

    /// Returns every submission for an assignment.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_ASSIGNMENT_SUBMISSION`; fails with
    /// `AssignmentNotFound` if the assignment does not exist.
    pub fn assignment_submissions(
        &self,
        session: &Session,
        assignment: &AssignmentId,
    ) -> Result<Vec<AssignmentSubmission>, CoreError> {
        self.read_gated(
            session,
            "GetAssignmentSubmissions",
            Permission::AccessAssignmentSubmission,
            |state| {
                require_assignment(state, assignment)?;
                Ok(state
                    .submissions
                    .iter()
                    .filter(|((a, _), _)| a == assignment)
                    .map(|(_, submission)| submission.clone())
                    .collect())
            },
        )
    }

    /// Returns one student's submission for an assignment.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_ASSIGNMENT_SUBMISSION`; fails with a not-found error
    /// if the assignment or the submission does not exist.
    pub fn assignment_submission(
        &self,
        session: &Session,
        assignment: &AssignmentId,
        student: &UserId,
    ) -> Result<AssignmentSubmission, CoreError> {
        self.read_gated(
            session,
            "GetAssignmentSubmission",
            Permission::AccessAssignmentSubmission,
            |state| {
                require_assignment(state, assignment)?;
                state
                    .submissions
                    .get(&(assignment.clone(), student.clone()))
                    .cloned()
                    .ok_or_else(|| CoreError::SubmissionNotFound {
                        assignment: assignment.clone(),
                        student: student.clone(),
                    })
            },
        )
    }

    /// Returns every grade recorded for an assignment.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_ASSIGNMENT_GRADE`; fails with `AssignmentNotFound`
    /// if the assignment does not exist.
    pub fn assignment_grades(
        &self,
        session: &Session,
        assignment: &AssignmentId,
    ) -> Result<Vec<AssignmentGrade>, CoreError> {
        self.read_gated(
            session,
            "GetAssignmentGrades",
            Permission::AccessAssignmentGrade,
            |state| {
                require_assignment(state, assignment)?;
                Ok(state
                    .grades
                    .iter()
                    .filter(|((a, _), _)| a == assignment)
                    .map(|(_, grade)| grade.clone())
                    .collect())
            },
        )
    }

    /// Returns one student's grade for an assignment.
    ///
    /// Unlike every other accessor, this one admits self-access: a caller
    /// holding the student role may read their own grade without
    /// `ACCESS_ASSIGNMENT_GRADE`.
    ///
    /// # Errors
    ///
    /// Fails with `PermissionDenied` unless the caller holds
    /// `ACCESS_ASSIGNMENT_GRADE` or is `student` acting as a student. Fails
    /// with a not-found error if the assignment or the grade does not exist.
    pub fn assignment_grade(
        &self,
        session: &Session,
        assignment: &AssignmentId,
        student: &UserId,
    ) -> Result<AssignmentGrade, CoreError> {
        const OPERATION: &str = "GetAssignmentGrade";
        const REQUIRED: Permission = Permission::AccessAssignmentGrade;

        let inner = self.read();
        let state: &CourseState = &inner.state;
        let user: &UserId = session.current_user();

        let access: Result<bool, Refusal> =
            known_perms(state, user, OPERATION, REQUIRED).and_then(|perms| {
                let self_access: bool =
                    user == student && state.role_manager.has_role(user, Role::Student);
                if perms.contains(REQUIRED) || self_access {
                    Ok(self_access)
                } else {
                    Err(denied(state, user, OPERATION, REQUIRED))
                }
            });
        let self_access: bool = match access {
            Ok(self_access) => self_access,
            Err(refusal) => {
                drop(inner);
                return Err(self.refuse(refusal));
            }
        };

        debug!(user = %user, operation = OPERATION, self_access, "Read");
        require_assignment(state, assignment)?;
        state
            .grades
            .get(&(assignment.clone(), student.clone()))
            .cloned()
            .ok_or_else(|| CoreError::GradeNotFound {
                assignment: assignment.clone(),
                student: student.clone(),
            })
    }

    /// Returns the most recently created snapshot, or `None` if no snapshot
    /// has been created yet.
    ///
    /// # Errors
    ///
    /// Requires `ACCESS_COURSE_SNAPSHOT`.
    pub fn snapshot(&self, session: &Session) -> Result<Option<Arc<CourseSnapshot>>, CoreError> {
        let inner = self.gate(
            self.read(),
            session,
            "GetSnapshot",
            Permission::AccessCourseSnapshot,
        )?;
        Ok(inner.snapshot.clone())
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Renames the course.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_COURSE_NAME`; the name must not be blank.
    pub fn set_name(&self, session: &Session, name: &str) -> Result<(), CoreError> {
        self.execute(
            session,
            Command::SetName {
                name: name.to_string(),
            },
        )
    }

    /// Replaces the grade schema.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_COURSE_GRADE_SCHEMA`.
    pub fn set_grade_schema(
        &self,
        session: &Session,
        schema: GradeSchemaRef,
    ) -> Result<(), CoreError> {
        self.execute(session, Command::SetGradeSchema { schema })
    }

    /// Replaces the late policy.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_COURSE_LATE_POLICY`.
    pub fn set_late_policy(&self, session: &Session, policy: LatePolicyRef) -> Result<(), CoreError> {
        self.execute(session, Command::SetLatePolicy { policy })
    }

    /// Adds an assignment category.
    ///
    /// # Errors
    ///
    /// Requires `ADD_ASSIGNMENT_CATEGORY`; the category id and the ids of any
    /// assignments it carries must be new to the course.
    pub fn add_assignment_category(
        &self,
        session: &Session,
        category: AssignmentCategory,
    ) -> Result<(), CoreError> {
        self.execute(session, Command::AddAssignmentCategory { category })
    }

    /// Renames or reweights a category.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_ASSIGNMENT_CATEGORY`; the category must exist.
    pub fn update_assignment_category(
        &self,
        session: &Session,
        category: &CategoryId,
        name: &str,
        weight: u8,
    ) -> Result<(), CoreError> {
        self.execute(
            session,
            Command::UpdateAssignmentCategory {
                category: category.clone(),
                name: name.to_string(),
                weight,
            },
        )
    }

    /// Adds an assignment to a category.
    ///
    /// # Errors
    ///
    /// Requires `ADD_ASSIGNMENT`; the category must exist and the assignment
    /// id must be new to the course.
    pub fn add_assignment(
        &self,
        session: &Session,
        category: &CategoryId,
        assignment: Assignment,
    ) -> Result<(), CoreError> {
        self.execute(
            session,
            Command::AddAssignment {
                category: category.clone(),
                assignment,
            },
        )
    }

    /// Replaces an existing assignment.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_ASSIGNMENT`; the assignment must exist.
    pub fn update_assignment(
        &self,
        session: &Session,
        assignment: Assignment,
    ) -> Result<(), CoreError> {
        self.execute(session, Command::UpdateAssignment { assignment })
    }

    /// Records a first submission.
    ///
    /// # Errors
    ///
    /// Requires `ADD_ASSIGNMENT_SUBMISSION`; the assignment must exist, the
    /// student must be enrolled and must not have submitted yet.
    pub fn add_assignment_submission(
        &self,
        session: &Session,
        submission: AssignmentSubmission,
    ) -> Result<(), CoreError> {
        self.execute(session, Command::AddAssignmentSubmission { submission })
    }

    /// Replaces an existing submission.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_ASSIGNMENT_SUBMISSION`; a submission must already exist.
    pub fn update_assignment_submission(
        &self,
        session: &Session,
        submission: AssignmentSubmission,
    ) -> Result<(), CoreError> {
        self.execute(session, Command::UpdateAssignmentSubmission { submission })
    }

    /// Records or replaces a grade, applying the late policy and grade schema.
    ///
    /// # Errors
    ///
    /// Requires `UPDATE_ASSIGNMENT_GRADE`; the assignment must exist, the
    /// student must be enrolled and the score must be valid.
    pub fn update_assignment_grade(
        &self,
        session: &Session,
        assignment: &AssignmentId,
        student: &UserId,
        raw_score: f64,
    ) -> Result<(), CoreError> {
        self.execute(
            session,
            Command::UpdateAssignmentGrade {
                assignment: assignment.clone(),
                student: student.clone(),
                raw_score,
            },
        )
    }

    /// Enrolls a student, granting them the student role if needed.
    ///
    /// # Errors
    ///
    /// Requires `ADD_STUDENT`; the student must not already be enrolled.
    pub fn add_student(&self, session: &Session, record: StudentRecord) -> Result<(), CoreError> {
        self.execute(session, Command::AddStudent { record })
    }

    /// Removes a student.
    ///
    /// Returns `false` without recording anything if the student was not
    /// enrolled, so repeating a removal is harmless.
    ///
    /// # Errors
    ///
    /// Requires `REMOVE_STUDENT`.
    pub fn remove_student(&self, session: &Session, student: &UserId) -> Result<bool, CoreError> {
        let command: Command = Command::RemoveStudent {
            student: student.clone(),
        };
        match self.execute(session, command) {
            Ok(()) => Ok(true),
            Err(CoreError::StudentNotFound(missing)) if &missing == student => {
                debug!(student = %student, "Student not enrolled; nothing removed");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Grants a role to a user.
    ///
    /// # Errors
    ///
    /// Requires `MANAGE_ROLES`; the user must not already hold the role.
    pub fn grant_role(&self, session: &Session, user: &UserId, role: Role) -> Result<(), CoreError> {
        self.execute(
            session,
            Command::GrantRole {
                user: user.clone(),
                role,
            },
        )
    }

    /// Revokes a role from a user.
    ///
    /// # Errors
    ///
    /// Requires `MANAGE_ROLES`; the user must hold the role, and an enrolled
    /// student cannot lose their last role.
    pub fn revoke_role(&self, session: &Session, user: &UserId, role: Role) -> Result<(), CoreError> {
        self.execute(
            session,
            Command::RevokeRole {
                user: user.clone(),
                role,
            },
        )
    }

    /// Materializes a new snapshot and makes it the course's current one.
    ///
    /// The copy is taken under the exclusive lock, so it reflects exactly
    /// one point between mutations.
    ///
    /// # Errors
    ///
    /// Requires `CREATE_COURSE_SNAPSHOT`.
    pub fn create_snapshot(&self, session: &Session) -> Result<Arc<CourseSnapshot>, CoreError> {
        let mut inner = self.gate(
            self.write(),
            session,
            "CreateSnapshot",
            Permission::CreateCourseSnapshot,
        )?;

        let snapshot: Arc<CourseSnapshot> = Arc::new(CourseSnapshot::capture(
            &inner.state,
            session.current_user().clone(),
            OffsetDateTime::now_utc(),
        ));
        inner.snapshot = Some(Arc::clone(&snapshot));
        drop(inner);

        info!(
            user = %session.current_user(),
            students_count = snapshot.student_records().len(),
            categories_count = snapshot.assignment_categories().len(),
            "Created course snapshot"
        );
        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn read(&self) -> RwLockReadGuard<'_, CourseInner> {
        // Transitions are computed on a copy and swapped in, so a poisoned
        // lock never guards a half-applied state.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CourseInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_gated<T>(
        &self,
        session: &Session,
        operation: &str,
        required: Permission,
        read: impl FnOnce(&CourseState) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let inner = self.gate(self.read(), session, operation, required)?;
        debug!(user = %session.current_user(), operation, "Read");
        read(&inner.state)
    }

    /// Passes `guard` through if the caller holds `required`. Otherwise the
    /// guard is dropped before the observer hears about the denial.
    fn gate<G: Deref<Target = CourseInner>>(
        &self,
        guard: G,
        session: &Session,
        operation: &str,
        required: Permission,
    ) -> Result<G, CoreError> {
        match authorize(&guard.state, session.current_user(), operation, required) {
            Ok(()) => Ok(guard),
            Err(refusal) => {
                drop(guard);
                Err(self.refuse(refusal))
            }
        }
    }

    fn refuse(&self, refusal: Refusal) -> CoreError {
        self.observer.on_denied(&refusal.denial);
        refusal.error
    }
}

impl CommandTarget for Course {
    fn execute(&self, session: &Session, command: Command) -> Result<(), CoreError> {
        let mut inner = self.gate(
            self.write(),
            session,
            command.name(),
            command.required_permission(),
        )?;

        let user: UserId = session.current_user().clone();
        let executed_at: OffsetDateTime = OffsetDateTime::now_utc();
        let transition: TransitionResult = apply(
            &inner.state,
            &command,
            actor_for(&inner.state, &user),
            self.config.removal_policy,
            executed_at,
        )?;
        debug_assert!(
            transition
                .new_state
                .invariants_hold(self.config.removal_policy),
            "transition broke course invariants"
        );

        inner.state = transition.new_state;
        let reversible: bool = transition.inverse.is_some();
        let action: &'static str = command.name();
        inner.history.append(HistoryEntry {
            command,
            actor: user.clone(),
            executed_at,
            inverse: transition.inverse,
            audit_event: transition.audit_event.clone(),
        });
        drop(inner);

        info!(actor = %user, action, reversible, "Command executed");
        self.observer.on_recorded(&transition.audit_event);
        Ok(())
    }

    fn undo(&self, session: &Session) -> Result<Command, CoreError> {
        const OPERATION: &str = "Undo";

        let inner = self.gate(self.write(), session, OPERATION, Permission::UndoCommand)?;

        // Undoing a command also requires the permission to have issued it.
        let required: Permission = inner.history.peek_undoable()?.command.required_permission();
        let mut inner = self.gate(inner, session, OPERATION, required)?;

        let (command, inverse): (Command, Inverse) = inner.history.pop_for_undo()?;
        inner.state = revert(&inner.state, &inverse);
        debug_assert!(
            inner.state.invariants_hold(self.config.removal_policy),
            "undo broke course invariants"
        );

        info!(
            actor = %session.current_user(),
            action = command.name(),
            remaining = inner.history.len(),
            "Command undone"
        );
        Ok(command)
    }
}

impl AuditTarget for Course {
    fn history(&self, session: &Session) -> Result<Vec<HistoryEntry>, CoreError> {
        let inner = self.gate(
            self.read(),
            session,
            "GetHistory",
            Permission::AccessCommandHistory,
        )?;
        Ok(inner.history.entries().to_vec())
    }

    fn inspect(&self, session: &Session) -> Result<CourseState, CoreError> {
        self.read_gated(
            session,
            "Inspect",
            Permission::AccessCommandHistory,
            |state| Ok(state.clone()),
        )
    }
}

/// Captures `user` with the roles they hold right now.
fn actor_for(state: &CourseState, user: &UserId) -> Actor {
    state.role_manager.get_roles(user).map_or_else(
        |_| Actor::unregistered(user.clone()),
        |roles| Actor::new(user.clone(), roles.into_iter().collect()),
    )
}

fn authorize(
    state: &CourseState,
    user: &UserId,
    operation: &str,
    required: Permission,
) -> Result<(), Refusal> {
    let perms: PermissionSet = known_perms(state, user, operation, required)?;
    if perms.contains(required) {
        Ok(())
    } else {
        Err(denied(state, user, operation, required))
    }
}

/// Looks up the caller's permissions, refusing unknown callers.
fn known_perms(
    state: &CourseState,
    user: &UserId,
    operation: &str,
    required: Permission,
) -> Result<PermissionSet, Refusal> {
    state
        .role_manager
        .get_perms(user)
        .map_err(|error| refusal(state, user, operation, required, error))
}

fn denied(state: &CourseState, user: &UserId, operation: &str, required: Permission) -> Refusal {
    let error: CoreError = CoreError::PermissionDenied {
        user: user.clone(),
        operation: operation.to_string(),
        required,
    };
    refusal(state, user, operation, required, error)
}

fn refusal(
    state: &CourseState,
    user: &UserId,
    operation: &str,
    required: Permission,
    error: CoreError,
) -> Refusal {
    Refusal {
        error,
        denial: AccessDenial::new(
            actor_for(state, user),
            operation,
            required,
            OffsetDateTime::now_utc(),
        ),
    }
}
