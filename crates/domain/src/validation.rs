// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::records::{Assignment, AssignmentCategory, StudentRecord};
use crate::types::UserId;

/// Validates that a user identifier is usable.
///
/// # Errors
///
/// Returns an error if the identifier is empty or contains whitespace.
pub fn validate_user_id(user: &UserId) -> Result<(), DomainError> {
    if user.value().is_empty() {
        return Err(DomainError::InvalidUserId(String::from(
            "User id cannot be empty",
        )));
    }
    if user.value().chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUserId(format!(
            "User id '{user}' cannot contain whitespace"
        )));
    }
    Ok(())
}

/// Validates that a student record's basic field constraints are met.
///
/// This does NOT check for uniqueness (that requires course context).
///
/// # Errors
///
/// Returns an error if:
/// - The student id is invalid
/// - The display name is empty
pub fn validate_student_record(record: &StudentRecord) -> Result<(), DomainError> {
    validate_user_id(&record.student)?;

    if record.display_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Display name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a course name.
///
/// # Errors
///
/// Returns an error if the name is empty or only whitespace.
pub fn validate_course_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Course name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates an assignment category's own fields.
///
/// Assignments carried by the category are validated individually.
///
/// # Errors
///
/// Returns an error if the name is empty, the weight exceeds 100, or any
/// contained assignment is invalid.
pub fn validate_category(category: &AssignmentCategory) -> Result<(), DomainError> {
    if category.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Category name cannot be empty",
        )));
    }
    if category.weight > 100 {
        return Err(DomainError::InvalidWeight {
            weight: category.weight,
        });
    }
    category
        .assignments
        .values()
        .try_for_each(validate_assignment)
}

/// Validates an assignment's fields.
///
/// # Errors
///
/// Returns an error if the name is empty or the assignment is worth no points.
pub fn validate_assignment(assignment: &Assignment) -> Result<(), DomainError> {
    if assignment.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Assignment name cannot be empty",
        )));
    }
    if assignment.points_possible == 0 {
        return Err(DomainError::InvalidPoints(format!(
            "Assignment '{}' must be worth at least one point",
            assignment.id
        )));
    }
    Ok(())
}

/// Validates a raw percentage score.
///
/// Scores above 100 are allowed to support extra credit.
///
/// # Errors
///
/// Returns an error if the score is negative, NaN or infinite.
pub fn validate_score(raw_score: f64) -> Result<(), DomainError> {
    if !raw_score.is_finite() || raw_score < 0.0 {
        return Err(DomainError::InvalidScore(format!(
            "Score {raw_score} must be a finite, non-negative number"
        )));
    }
    Ok(())
}
