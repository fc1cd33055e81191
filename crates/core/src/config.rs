// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-course configuration.

use crate::role_manager::RoleManager;
use gradebook_domain::{PermissionSet, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// What happens to a student's submissions and grades when the student is
/// removed from the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Keep submissions and grades as orphaned data. Removal is undoable.
    #[default]
    Retain,
    /// Delete submissions and grades together with the record. Removal is
    /// terminal and cannot be undone.
    Purge,
}

impl RemovalPolicy {
    /// Converts this policy to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Purge => "purge",
        }
    }
}

impl FromStr for RemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retain" => Ok(Self::Retain),
            "purge" => Ok(Self::Purge),
            _ => Err(format!("Invalid removal policy: {s}")),
        }
    }
}

impl std::fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a single course instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// How `remove_student` treats the student's submissions and grades.
    pub removal_policy: RemovalPolicy,
    /// Replaces the built-in role permission table when set.
    pub role_permissions: Option<BTreeMap<Role, PermissionSet>>,
}

impl CourseConfig {
    /// Builds an empty role manager from this configuration.
    #[must_use]
    pub fn role_manager(&self) -> RoleManager {
        self.role_permissions
            .as_ref()
            .map_or_else(RoleManager::new, |grants| {
                RoleManager::with_grants(grants.clone())
            })
    }
}
