// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignment, AssignmentCategory, AssignmentId, CategoryId, DomainError, StudentRecord, UserId,
    validate_assignment, validate_category, validate_course_name, validate_score,
    validate_student_record, validate_user_id,
};

#[test]
fn test_validate_user_id_rejects_empty() {
    let result: Result<(), DomainError> = validate_user_id(&UserId::new(""));
    assert!(matches!(result, Err(DomainError::InvalidUserId(_))));
}

#[test]
fn test_validate_user_id_rejects_whitespace() {
    let result: Result<(), DomainError> = validate_user_id(&UserId::new("a b"));
    assert!(matches!(result, Err(DomainError::InvalidUserId(_))));
}

#[test]
fn test_validate_student_record_accepts_valid_record() {
    let record: StudentRecord = StudentRecord::new(UserId::new("s1"), "Sam Student");
    assert!(validate_student_record(&record).is_ok());
}

#[test]
fn test_validate_student_record_rejects_blank_name() {
    let record: StudentRecord = StudentRecord::new(UserId::new("s1"), "   ");
    assert!(matches!(
        validate_student_record(&record),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_course_name_rejects_blank() {
    assert!(validate_course_name("CS 101").is_ok());
    assert!(validate_course_name("").is_err());
}

#[test]
fn test_validate_category_rejects_excess_weight() {
    let category: AssignmentCategory = AssignmentCategory::new(CategoryId::new("hw"), "Homework", 101);
    assert_eq!(
        validate_category(&category),
        Err(DomainError::InvalidWeight { weight: 101 })
    );
}

#[test]
fn test_validate_category_checks_contained_assignments() {
    let mut category: AssignmentCategory = AssignmentCategory::new(CategoryId::new("hw"), "Homework", 40);
    let bad: Assignment = Assignment::new(AssignmentId::new("hw1"), "Homework 1", 0, None);
    category.assignments.insert(bad.id.clone(), bad);

    assert!(matches!(
        validate_category(&category),
        Err(DomainError::InvalidPoints(_))
    ));
}

#[test]
fn test_validate_assignment_accepts_valid_assignment() {
    let assignment: Assignment = Assignment::new(AssignmentId::new("hw1"), "Homework 1", 10, None);
    assert!(validate_assignment(&assignment).is_ok());
}

#[test]
fn test_validate_score_bounds() {
    assert!(validate_score(0.0).is_ok());
    assert!(validate_score(105.0).is_ok());
    assert!(validate_score(-1.0).is_err());
    assert!(validate_score(f64::NAN).is_err());
    assert!(validate_score(f64::INFINITY).is_err());
}
