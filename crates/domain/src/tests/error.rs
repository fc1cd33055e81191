// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentId, CategoryId, DomainError, UserId};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidUserId(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid user id: test");

    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");

    let err: DomainError = DomainError::InvalidWeight { weight: 120 };
    assert_eq!(
        format!("{err}"),
        "Invalid category weight 120: must be between 0 and 100"
    );

    let err: DomainError = DomainError::DuplicateStudent(UserId::new("s1"));
    assert_eq!(format!("{err}"), "Student 's1' is already enrolled");

    let err: DomainError = DomainError::DuplicateCategory(CategoryId::new("hw"));
    assert_eq!(format!("{err}"), "Assignment category 'hw' already exists");

    let err: DomainError = DomainError::DuplicateAssignment(AssignmentId::new("hw1"));
    assert_eq!(format!("{err}"), "Assignment 'hw1' already exists");

    let err: DomainError = DomainError::DuplicateSubmission {
        assignment: AssignmentId::new("hw1"),
        student: UserId::new("s1"),
    };
    assert_eq!(
        format!("{err}"),
        "Submission for assignment 'hw1' by 's1' already exists"
    );

    let err: DomainError = DomainError::RoleNotHeld {
        user: UserId::new("s1"),
        role: String::from("Professor"),
    };
    assert_eq!(format!("{err}"), "User 's1' does not hold role Professor");

    let err: DomainError = DomainError::LastRoleOfEnrolledStudent(UserId::new("s1"));
    assert_eq!(
        format!("{err}"),
        "Cannot revoke the last role of enrolled student 's1'"
    );

    let err: DomainError = DomainError::LastRoleOfReferencedUser(UserId::new("s1"));
    assert_eq!(
        format!("{err}"),
        "Cannot revoke the last role of 's1': submissions or grades still reference them"
    );
}

#[test]
fn test_domain_error_equality() {
    let a: DomainError = DomainError::DuplicateStudent(UserId::new("s1"));
    let b: DomainError = DomainError::DuplicateStudent(UserId::new("s1"));
    let c: DomainError = DomainError::DuplicateStudent(UserId::new("s2"));

    assert_eq!(a, b);
    assert_ne!(a, c);
}
