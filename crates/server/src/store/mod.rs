// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

mod memory;

pub use memory::*;

use gatehouse_type::{Repository, RepositoryContext, TokenRecord, User, UserName};

use std::fmt;

use axum::async_trait;

#[derive(Debug)]
pub enum GetError {
    NotFound,
    Internal(anyhow::Error),
}

impl fmt::Display for GetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetError::NotFound => write!(f, "record not found"),
            GetError::Internal(e) => write!(f, "storage backend failure: {e}"),
        }
    }
}

impl std::error::Error for GetError {}

/// Read-only view of the users, repositories and credentials known to the service.
///
/// Implementations are shared across all concurrent requests.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Finds a user by login.
    async fn user(&self, login: &UserName) -> Result<User, GetError>;

    /// Finds a repository by owner and name.
    async fn repository(&self, cx: &RepositoryContext) -> Result<Repository, GetError>;

    /// Finds the credential record `user` currently holds under `label`.
    async fn token(&self, user: &User, label: &str) -> Result<TokenRecord, GetError>;
}
