// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    ALICE, ASSISTANT, BOB, PROFESSOR, create_test_course, hw1_id, session, user,
};
use crate::{
    AuditTarget, Course, CourseConfig, CourseSnapshot, CourseState, RemovalPolicy, Session,
};
use gradebook_domain::StudentRecord;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_enrollments_are_all_recorded() {
    let course: Course = create_test_course(CourseConfig::default());
    let before: usize = course.history(&session(PROFESSOR)).unwrap().len();

    thread::scope(|scope| {
        for worker in 0..8 {
            let course: &Course = &course;
            scope.spawn(move || {
                let professor: Session = session(PROFESSOR);
                for n in 0..10 {
                    let id: String = format!("student-{worker}-{n}");
                    course
                        .add_student(&professor, StudentRecord::new(user(&id), &id))
                        .unwrap();
                }
            });
        }
    });

    let state: CourseState = course.inspect(&session(PROFESSOR)).unwrap();
    assert_eq!(state.student_records.len(), 2 + 80);
    assert_eq!(
        course.history(&session(PROFESSOR)).unwrap().len(),
        before + 80
    );
    assert!(state.invariants_hold(RemovalPolicy::Retain));
}

#[test]
fn test_readers_never_observe_a_partial_removal() {
    let config: CourseConfig = CourseConfig {
        removal_policy: RemovalPolicy::Purge,
        ..CourseConfig::default()
    };
    let course: Course = create_test_course(config);
    let professor: Session = session(PROFESSOR);
    course
        .update_assignment_grade(&professor, &hw1_id(), &user(ALICE), 90.0)
        .unwrap();
    course
        .update_assignment_grade(&professor, &hw1_id(), &user(BOB), 80.0)
        .unwrap();

    thread::scope(|scope| {
        let course: &Course = &course;
        scope.spawn(move || {
            let professor: Session = session(PROFESSOR);
            course.remove_student(&professor, &user(ALICE)).unwrap();
            course.remove_student(&professor, &user(BOB)).unwrap();
        });
        for _ in 0..4 {
            scope.spawn(move || {
                let assistant: Session = session(ASSISTANT);
                for _ in 0..50 {
                    let state: CourseState = course.inspect(&session(PROFESSOR)).unwrap();
                    assert!(state.invariants_hold(RemovalPolicy::Purge));
                    assert_eq!(state.grades.len(), state.student_records.len());
                    let snapshot: Arc<CourseSnapshot> =
                        course.create_snapshot(&assistant).unwrap();
                    assert!(snapshot.student_records().len() <= 2);
                }
            });
        }
    });

    let state: CourseState = course.inspect(&professor).unwrap();
    assert!(state.student_records.is_empty());
    assert!(state.grades.is_empty());
}
