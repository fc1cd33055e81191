// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod permission;
mod policy;
mod records;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use permission::{Permission, PermissionSet, default_permissions};
pub use policy::{
    GradeSchema, GradeSchemaRef, LatePolicy, LatePolicyRef, NoLatePenalty, PercentPerDayPenalty,
    ThresholdGradeSchema,
};
pub use records::{
    Assignment, AssignmentCategory, AssignmentGrade, AssignmentSubmission, LetterGrade,
    StudentRecord,
};
pub use types::{AssignmentId, CategoryId, Role, UserId};
pub use validation::{
    validate_assignment, validate_category, validate_course_name, validate_score,
    validate_student_record, validate_user_id,
};
