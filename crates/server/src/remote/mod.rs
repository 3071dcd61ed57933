// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

mod fixed;

pub use fixed::Static;

use gatehouse_type::{Permission, Repository, User};

use axum::async_trait;

/// Hosting remote, the system of record for who may read or write a repository.
#[async_trait]
pub trait Remote: Send + Sync {
    /// Computes the permissions of `user`, or of an anonymous caller if `None`, on `repo`.
    ///
    /// Failures must be reported as [Permission::NONE].
    async fn permission(&self, user: Option<&User>, repo: &Repository) -> Permission;
}
