// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AccessObserver, Command, Course, CourseConfig, CourseState, RemovalPolicy, RoleManager,
    Session, TransitionResult, apply,
};
use gradebook_audit::{AccessDenial, Actor, AuditEvent};
use gradebook_domain::{
    Assignment, AssignmentCategory, AssignmentId, CategoryId, GradeSchemaRef, LatePolicyRef,
    NoLatePenalty, Role, StudentRecord, ThresholdGradeSchema, UserId,
};
use std::sync::Mutex;
use time::OffsetDateTime;
use time::macros::datetime;

pub const PROFESSOR: &str = "prof";
pub const ASSISTANT: &str = "ta";
pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const STRANGER: &str = "mallory";

pub fn session(user: &str) -> Session {
    Session::new(UserId::new(user))
}

pub fn user(id: &str) -> UserId {
    UserId::new(id)
}

pub fn homework_id() -> CategoryId {
    CategoryId::new("homework")
}

pub fn hw1_id() -> AssignmentId {
    AssignmentId::new("hw1")
}

pub fn due_date() -> OffsetDateTime {
    datetime!(2026-09-15 23:59 UTC)
}

pub fn test_time() -> OffsetDateTime {
    datetime!(2026-09-01 09:00 UTC)
}

pub fn create_test_assignment() -> Assignment {
    Assignment::new(hw1_id(), "Homework 1", 100, Some(due_date()))
}

pub fn create_test_category() -> AssignmentCategory {
    AssignmentCategory::new(homework_id(), "Homework", 40)
}

pub fn create_test_actor() -> Actor {
    Actor::new(user(PROFESSOR), vec![Role::Professor])
}

/// A bare state owned by a professor, with no students or categories.
pub fn create_test_state() -> CourseState {
    let mut role_manager: RoleManager = RoleManager::new();
    role_manager.grant_role(&user(PROFESSOR), Role::Professor).unwrap();
    CourseState::new(
        String::from("CS 101"),
        GradeSchemaRef::new(ThresholdGradeSchema::default()),
        LatePolicyRef::new(NoLatePenalty),
        role_manager,
    )
}

/// Applies `command` as the test professor and returns the new state.
pub fn apply_ok(state: &CourseState, command: &Command) -> CourseState {
    let transition: TransitionResult = apply(
        state,
        command,
        create_test_actor(),
        RemovalPolicy::Retain,
        test_time(),
    )
    .unwrap();
    transition.new_state
}

/// A state with the homework category, `hw1` and `alice` enrolled.
pub fn create_populated_state() -> CourseState {
    let mut state: CourseState = create_test_state();
    let mut category: AssignmentCategory = create_test_category();
    category
        .assignments
        .insert(hw1_id(), create_test_assignment());
    state = apply_ok(&state, &Command::AddAssignmentCategory { category });
    apply_ok(
        &state,
        &Command::AddStudent {
            record: StudentRecord::new(user(ALICE), "Alice Liddell"),
        },
    )
}

/// CS 101 with a professor, a teaching assistant, one homework category
/// holding `hw1`, and `alice` and `bob` enrolled.
pub fn create_test_course(config: CourseConfig) -> Course {
    let course: Course = Course::new("CS 101", &user(PROFESSOR), config).unwrap();
    let professor: Session = session(PROFESSOR);

    course
        .grant_role(&professor, &user(ASSISTANT), Role::TeachingAssistant)
        .unwrap();
    course
        .add_assignment_category(&professor, create_test_category())
        .unwrap();
    course
        .add_assignment(&professor, &homework_id(), create_test_assignment())
        .unwrap();
    course
        .add_student(&professor, StudentRecord::new(user(ALICE), "Alice Liddell"))
        .unwrap();
    course
        .add_student(&professor, StudentRecord::new(user(BOB), "Bob Dobbs"))
        .unwrap();
    course
}

/// Observer that keeps everything it is told.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub denials: Mutex<Vec<AccessDenial>>,
    pub events: Mutex<Vec<AuditEvent>>,
}

impl AccessObserver for RecordingObserver {
    fn on_denied(&self, denial: &AccessDenial) {
        self.denials.lock().unwrap().push(denial.clone());
    }

    fn on_recorded(&self, event: &AuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
