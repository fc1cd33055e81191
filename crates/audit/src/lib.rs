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
    clippy::all
)]

#[cfg(test)]
mod tests;

use gradebook_domain::{Permission, Role, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Represents the user performing an action.
///
/// An actor is captured at the moment of the action, together with the
/// roles it held at that moment, so later role changes do not rewrite
/// the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user.
    pub user: UserId,
    /// The roles held by the user when the action was attempted.
    pub roles: Vec<Role>,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `user` - The acting user
    /// * `roles` - The roles held by the user at the time of the action
    #[must_use]
    pub const fn new(user: UserId, roles: Vec<Role>) -> Self {
        Self { user, roles }
    }

    /// Creates an actor for a user with no known roles.
    #[must_use]
    pub const fn unregistered(user: UserId) -> Self {
        Self {
            user,
            roles: Vec::new(),
        }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`SetName`", "`AddStudent`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact summary of course state at a point in time.
///
/// This is not a copy of the state; it records counts and identifying
/// fields so an audit reader can see what a transition changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful mutation produces exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - When the transition was committed (`recorded_at`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// When the transition was committed.
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `recorded_at` - When the change was committed
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            actor,
            action,
            before,
            after,
            recorded_at,
        }
    }
}

/// A rejected attempt to perform a permission-gated operation.
///
/// Denials never change course state. They are handed to an observer so a
/// host application can log or alert on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDenial {
    /// The caller whose attempt was rejected.
    pub actor: Actor,
    /// The operation that was attempted (e.g., "`SetName`" or "`GetName`").
    pub operation: String,
    /// The permission the operation required.
    pub required: Permission,
    /// When the attempt was rejected.
    pub attempted_at: OffsetDateTime,
}

impl AccessDenial {
    /// Creates a new `AccessDenial`.
    #[must_use]
    pub fn new(
        actor: Actor,
        operation: &str,
        required: Permission,
        attempted_at: OffsetDateTime,
    ) -> Self {
        Self {
            actor,
            operation: operation.to_string(),
            required,
            attempted_at,
        }
    }
}
