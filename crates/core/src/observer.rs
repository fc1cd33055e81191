// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hooks for observing authorization outcomes.

use gradebook_audit::{AccessDenial, AuditEvent};
use tracing::warn;

/// Receives authorization outcomes from a course.
///
/// Observers are called after the course lock has been released, so they may
/// read from the course. When several writers race, events can arrive in a
/// different order than the history records them.
pub trait AccessObserver: Send + Sync {
    /// Called for every rejected permission check, before the error is returned.
    fn on_denied(&self, denial: &AccessDenial);

    /// Called once a mutation has been committed to the history.
    fn on_recorded(&self, _event: &AuditEvent) {}
}

/// Default observer: logs denied attempts through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AccessObserver for TracingObserver {
    fn on_denied(&self, denial: &AccessDenial) {
        warn!(
            user = %denial.actor.user,
            operation = %denial.operation,
            required = %denial.required,
            "Permission denied"
        );
    }
}
