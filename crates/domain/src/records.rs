// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gradebook records: students, categories, assignments, submissions and grades.

use crate::types::{AssignmentId, CategoryId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Duration, OffsetDateTime};

/// The gradebook row for one enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// The enrolled student.
    pub student: UserId,
    /// Display name shown in the gradebook.
    pub display_name: String,
}

impl StudentRecord {
    /// Creates a new student record.
    ///
    /// # Arguments
    ///
    /// * `student` - The enrolled user
    /// * `display_name` - The name shown in the gradebook
    #[must_use]
    pub fn new(student: UserId, display_name: &str) -> Self {
        Self {
            student,
            display_name: display_name.to_string(),
        }
    }
}

/// A gradable unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Course-wide unique identifier.
    pub id: AssignmentId,
    /// Human-readable title.
    pub name: String,
    /// Maximum attainable points.
    pub points_possible: u32,
    /// Due instant, if the assignment has a deadline.
    pub due: Option<OffsetDateTime>,
}

impl Assignment {
    /// Creates a new assignment.
    #[must_use]
    pub fn new(
        id: AssignmentId,
        name: &str,
        points_possible: u32,
        due: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            points_possible,
            due,
        }
    }

    /// How late a submission made at `submitted_at` is.
    ///
    /// Returns `Duration::ZERO` when the assignment has no deadline or the
    /// submission arrived on time.
    #[must_use]
    pub fn lateness(&self, submitted_at: OffsetDateTime) -> Duration {
        match self.due {
            Some(due) if submitted_at > due => submitted_at - due,
            _ => Duration::ZERO,
        }
    }
}

/// A weighted group of assignments (e.g. "Homework", "Exams").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCategory {
    /// Identifier of the category.
    pub id: CategoryId,
    /// Human-readable name.
    pub name: String,
    /// Weight of the category in the final grade, in percent.
    pub weight: u8,
    /// Assignments owned by this category.
    pub assignments: BTreeMap<AssignmentId, Assignment>,
}

impl AssignmentCategory {
    /// Creates an empty category.
    #[must_use]
    pub fn new(id: CategoryId, name: &str, weight: u8) -> Self {
        Self {
            id,
            name: name.to_string(),
            weight,
            assignments: BTreeMap::new(),
        }
    }

    /// Looks up an assignment owned by this category.
    #[must_use]
    pub fn assignment(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.get(id)
    }
}

/// Work handed in by a student for an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSubmission {
    /// The assignment being submitted.
    pub assignment: AssignmentId,
    /// The submitting student.
    pub student: UserId,
    /// When the work was handed in.
    pub submitted_at: OffsetDateTime,
    /// Submitted content or a reference to it.
    pub content: String,
}

impl AssignmentSubmission {
    /// Creates a new submission.
    #[must_use]
    pub fn new(
        assignment: AssignmentId,
        student: UserId,
        submitted_at: OffsetDateTime,
        content: &str,
    ) -> Self {
        Self {
            assignment,
            student,
            submitted_at,
            content: content.to_string(),
        }
    }
}

/// Letter grade produced by a grade schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// Excellent.
    A,
    /// Good.
    B,
    /// Satisfactory.
    C,
    /// Passing.
    D,
    /// Failing.
    F,
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter: &str = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// The grade recorded for one `(assignment, student)` pair.
///
/// Scores are percentages. `adjusted_score` is `raw_score` after the late
/// policy has been applied; `letter` is derived from `adjusted_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentGrade {
    /// The graded assignment.
    pub assignment: AssignmentId,
    /// The graded student.
    pub student: UserId,
    /// Score as entered by the grader.
    pub raw_score: f64,
    /// Score after late penalties.
    pub adjusted_score: f64,
    /// Letter grade for the adjusted score.
    pub letter: LetterGrade,
}
