// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Permission-gated course gradebook.
//!
//! A [`Course`] holds its state behind a role-based authorization layer.
//! Every change is a [`Command`] applied as a pure transition and recorded
//! in a [`CommandHistory`] together with the data needed to undo it.
//! Student-facing reads can be served from an immutable [`CourseSnapshot`].

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

mod apply;
mod command;
mod config;
mod course;
mod error;
mod history;
mod observer;
mod role_manager;
mod session;
mod snapshot;
mod state;
mod target;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{Inverse, apply, revert};
pub use command::{Command, Reversibility};
pub use config::{CourseConfig, RemovalPolicy};
pub use course::Course;
pub use error::CoreError;
pub use history::{CommandHistory, HistoryEntry};
pub use observer::{AccessObserver, TracingObserver};
pub use role_manager::RoleManager;
pub use session::Session;
pub use snapshot::CourseSnapshot;
pub use state::{CourseState, TransitionResult, WorkKey};
pub use target::{AuditTarget, CommandTarget};
