// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gradebook_domain::UserId;

/// The identity context under which course operations are authorized.
///
/// A session names exactly one current user, fixed at construction. It is
/// owned by whoever drives the course and passed by reference to every
/// call; the course never keeps an implicit "current" session of its own.
///
/// `Session` has no `Default`; every session names a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session {
    current_user: UserId,
}

impl Session {
    /// Opens a session for `user`.
    #[must_use]
    pub const fn new(user: UserId) -> Self {
        Self { current_user: user }
    }

    /// The user acting in this session.
    #[must_use]
    pub const fn current_user(&self) -> &UserId {
        &self.current_user
    }
}
