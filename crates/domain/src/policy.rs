// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pluggable grading policies.
//!
//! A course consumes two policies: a [`GradeSchema`] converting a score to a
//! [`LetterGrade`], and a [`LatePolicy`] penalizing late work. Both must be
//! pure and deterministic. Policies are shared behind an `Arc` and never
//! mutated, so copying a handle into a snapshot or a history entry is a
//! value copy for all observable purposes.

use crate::records::LetterGrade;
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;
use time::Duration;

/// Converts a percentage score into a letter grade.
pub trait GradeSchema: Send + Sync + Debug {
    /// Short label used in audit records.
    fn name(&self) -> &str;

    /// Converts `raw_score` into a letter grade.
    fn to_letter_grade(&self, raw_score: f64) -> LetterGrade;
}

/// Penalizes work handed in after its deadline.
pub trait LatePolicy: Send + Sync + Debug {
    /// Short label used in audit records.
    fn name(&self) -> &str;

    /// Returns `raw_score` after the penalty for `lateness`.
    fn apply_penalty(&self, raw_score: f64, lateness: Duration) -> f64;
}

/// Shared handle to an immutable grade schema.
///
/// Two handles are equal only when they point at the same schema instance.
#[derive(Debug, Clone)]
pub struct GradeSchemaRef(Arc<dyn GradeSchema>);

impl GradeSchemaRef {
    /// Wraps a schema in a shared handle.
    pub fn new(schema: impl GradeSchema + 'static) -> Self {
        Self(Arc::new(schema))
    }
}

impl Deref for GradeSchemaRef {
    type Target = dyn GradeSchema;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for GradeSchemaRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared handle to an immutable late policy.
///
/// Two handles are equal only when they point at the same policy instance.
#[derive(Debug, Clone)]
pub struct LatePolicyRef(Arc<dyn LatePolicy>);

impl LatePolicyRef {
    /// Wraps a policy in a shared handle.
    pub fn new(policy: impl LatePolicy + 'static) -> Self {
        Self(Arc::new(policy))
    }
}

impl Deref for LatePolicyRef {
    type Target = dyn LatePolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for LatePolicyRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Grade schema with fixed lower bounds for A, B, C and D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdGradeSchema {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl ThresholdGradeSchema {
    /// Creates a schema from the minimum score of each passing letter.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }
}

impl Default for ThresholdGradeSchema {
    fn default() -> Self {
        Self::new(90.0, 80.0, 70.0, 60.0)
    }
}

impl GradeSchema for ThresholdGradeSchema {
    fn name(&self) -> &str {
        "threshold"
    }

    fn to_letter_grade(&self, raw_score: f64) -> LetterGrade {
        if raw_score >= self.a {
            LetterGrade::A
        } else if raw_score >= self.b {
            LetterGrade::B
        } else if raw_score >= self.c {
            LetterGrade::C
        } else if raw_score >= self.d {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }
}

/// Late policy that never penalizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLatePenalty;

impl LatePolicy for NoLatePenalty {
    fn name(&self) -> &str {
        "none"
    }

    fn apply_penalty(&self, raw_score: f64, _lateness: Duration) -> f64 {
        raw_score
    }
}

/// Deducts a fixed number of percentage points per started day of lateness.
///
/// Scores never drop below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPerDayPenalty {
    points_per_day: f64,
}

impl PercentPerDayPenalty {
    /// Creates a policy deducting `points_per_day` for each started day late.
    #[must_use]
    pub const fn new(points_per_day: f64) -> Self {
        Self { points_per_day }
    }
}

impl LatePolicy for PercentPerDayPenalty {
    fn name(&self) -> &str {
        "percent-per-day"
    }

    #[allow(clippy::cast_precision_loss)]
    fn apply_penalty(&self, raw_score: f64, lateness: Duration) -> f64 {
        if lateness <= Duration::ZERO {
            return raw_score;
        }
        let seconds: i64 = lateness.whole_seconds();
        let started_days: i64 = (seconds + 86_399) / 86_400;
        (raw_score - self.points_per_day * started_days as f64).max(0.0)
    }
}
