// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-course role assignments and authorization queries.

use crate::error::CoreError;
use gradebook_domain::{
    DomainError, PermissionSet, Role, UserId, default_permissions, validate_user_id,
};
use std::collections::{BTreeMap, BTreeSet};

/// Maps users to roles, and roles to permission sets, for one course.
///
/// A user's effective permissions are the union over every role they hold.
/// Users with no role entry are unknown: authorization queries about them
/// fail with [`CoreError::UnknownUser`] instead of answering "no permissions".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleManager {
    grants: BTreeMap<Role, PermissionSet>,
    assignments: BTreeMap<UserId, BTreeSet<Role>>,
}

impl RoleManager {
    /// Creates a role manager using the built-in role permission table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grants(
            Role::ALL
                .into_iter()
                .map(|role| (role, default_permissions(role)))
                .collect(),
        )
    }

    /// Creates a role manager with an explicit role permission table.
    ///
    /// Roles absent from `grants` confer no permissions.
    #[must_use]
    pub const fn with_grants(grants: BTreeMap<Role, PermissionSet>) -> Self {
        Self {
            grants,
            assignments: BTreeMap::new(),
        }
    }

    /// The permission set granted by a single role.
    #[must_use]
    pub fn role_permissions(&self, role: Role) -> PermissionSet {
        self.grants.get(&role).cloned().unwrap_or_default()
    }

    /// Returns the union of the permissions of every role `user` holds.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownUser` if the user holds no role.
    pub fn get_perms(&self, user: &UserId) -> Result<PermissionSet, CoreError> {
        let roles: &BTreeSet<Role> = self.roles_of(user)?;
        Ok(roles
            .iter()
            .fold(PermissionSet::empty(), |acc, role| {
                acc.union(&self.role_permissions(*role))
            }))
    }

    /// Returns the roles held by `user`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownUser` if the user holds no role.
    pub fn get_roles(&self, user: &UserId) -> Result<BTreeSet<Role>, CoreError> {
        self.roles_of(user).cloned()
    }

    /// Whether `user` currently holds `role`. Unknown users hold nothing.
    #[must_use]
    pub fn has_role(&self, user: &UserId, role: Role) -> bool {
        self.assignments
            .get(user)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Whether `user` has any role entry.
    #[must_use]
    pub fn is_registered(&self, user: &UserId) -> bool {
        self.assignments.contains_key(user)
    }

    /// Iterates over every user with a role entry.
    pub fn users(&self) -> impl Iterator<Item = &UserId> {
        self.assignments.keys()
    }

    /// Grants `role` to `user`, registering the user if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is invalid or the role is already held.
    pub fn grant_role(&mut self, user: &UserId, role: Role) -> Result<(), CoreError> {
        validate_user_id(user)?;
        let roles: &mut BTreeSet<Role> = self.assignments.entry(user.clone()).or_default();
        if !roles.insert(role) {
            return Err(DomainError::RoleAlreadyGranted {
                user: user.clone(),
                role: role.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Revokes `role` from `user`.
    ///
    /// Revoking a user's last role removes their entry entirely, after which
    /// the user is unknown to this course.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or does not hold the role.
    pub fn revoke_role(&mut self, user: &UserId, role: Role) -> Result<(), CoreError> {
        let roles: &mut BTreeSet<Role> = self
            .assignments
            .get_mut(user)
            .ok_or_else(|| CoreError::UnknownUser(user.clone()))?;
        if !roles.remove(&role) {
            return Err(DomainError::RoleNotHeld {
                user: user.clone(),
                role: role.to_string(),
            }
            .into());
        }
        if roles.is_empty() {
            self.assignments.remove(user);
        }
        Ok(())
    }

    /// Replaces the role entry of `user` wholesale. `None` removes the entry.
    pub(crate) fn restore_roles(&mut self, user: &UserId, roles: Option<BTreeSet<Role>>) {
        match roles {
            Some(roles) if !roles.is_empty() => {
                self.assignments.insert(user.clone(), roles);
            }
            _ => {
                self.assignments.remove(user);
            }
        }
    }

    /// The current role entry of `user`, if any.
    pub(crate) fn role_entry(&self, user: &UserId) -> Option<BTreeSet<Role>> {
        self.assignments.get(user).cloned()
    }

    fn roles_of(&self, user: &UserId) -> Result<&BTreeSet<Role>, CoreError> {
        self.assignments
            .get(user)
            .ok_or_else(|| CoreError::UnknownUser(user.clone()))
    }
}

impl Default for RoleManager {
    fn default() -> Self {
        Self::new()
    }
}
