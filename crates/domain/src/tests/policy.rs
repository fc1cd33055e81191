// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    GradeSchema, GradeSchemaRef, LatePolicy, LatePolicyRef, LetterGrade, NoLatePenalty,
    PercentPerDayPenalty, ThresholdGradeSchema,
};
use time::Duration;

#[test]
fn test_threshold_schema_boundaries() {
    let schema: ThresholdGradeSchema = ThresholdGradeSchema::default();

    assert_eq!(schema.to_letter_grade(100.0), LetterGrade::A);
    assert_eq!(schema.to_letter_grade(90.0), LetterGrade::A);
    assert_eq!(schema.to_letter_grade(89.9), LetterGrade::B);
    assert_eq!(schema.to_letter_grade(70.0), LetterGrade::C);
    assert_eq!(schema.to_letter_grade(60.0), LetterGrade::D);
    assert_eq!(schema.to_letter_grade(59.9), LetterGrade::F);
}

#[test]
fn test_no_late_penalty_is_identity() {
    let policy: NoLatePenalty = NoLatePenalty;

    assert!((policy.apply_penalty(87.5, Duration::days(3)) - 87.5).abs() < f64::EPSILON);
}

#[test]
fn test_percent_per_day_counts_started_days() {
    let policy: PercentPerDayPenalty = PercentPerDayPenalty::new(10.0);

    assert!((policy.apply_penalty(90.0, Duration::ZERO) - 90.0).abs() < f64::EPSILON);
    assert!((policy.apply_penalty(90.0, Duration::hours(1)) - 80.0).abs() < f64::EPSILON);
    assert!((policy.apply_penalty(90.0, Duration::hours(25)) - 70.0).abs() < f64::EPSILON);
}

#[test]
fn test_percent_per_day_never_goes_negative() {
    let policy: PercentPerDayPenalty = PercentPerDayPenalty::new(50.0);

    assert!(policy.apply_penalty(40.0, Duration::days(5)).abs() < f64::EPSILON);
}

#[test]
fn test_policy_handles_compare_by_identity() {
    let first: GradeSchemaRef = GradeSchemaRef::new(ThresholdGradeSchema::default());
    let copy: GradeSchemaRef = first.clone();
    let other: GradeSchemaRef = GradeSchemaRef::new(ThresholdGradeSchema::default());

    assert_eq!(first, copy);
    assert_ne!(first, other);
    assert_eq!(first.name(), "threshold");

    let late: LatePolicyRef = LatePolicyRef::new(NoLatePenalty);
    assert_eq!(late, late.clone());
    assert_eq!(late.name(), "none");
}
