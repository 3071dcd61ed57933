// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Datastore, GetError};
use crate::Fixture;

use gatehouse_type::{Repository, RepositoryContext, TokenRecord, User, UserName};

use std::collections::HashMap;

use axum::async_trait;
use tracing::trace;

/// [Datastore] backed by in-memory maps.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    users: HashMap<UserName, User>,
    repos: HashMap<RepositoryContext, Repository>,
    tokens: HashMap<(UserName, String), TokenRecord>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `user`, replacing any user with the same login.
    pub fn insert_user(&mut self, user: User) -> &mut Self {
        let _ = self.users.insert(user.login.clone(), user);
        self
    }

    /// Inserts `repo`, replacing any repository with the same owner and name.
    pub fn insert_repository(&mut self, repo: Repository) -> &mut Self {
        let _ = self.repos.insert(repo.context(), repo);
        self
    }

    /// Inserts `token`. Inserting a record under an existing label rotates it.
    pub fn insert_token(&mut self, token: TokenRecord) -> &mut Self {
        let _ = self
            .tokens
            .insert((token.login.clone(), token.label.clone()), token);
        self
    }
}

impl From<&Fixture> for Memory {
    fn from(fixture: &Fixture) -> Self {
        let mut store = Self::new();
        fixture.users.iter().cloned().for_each(|user| {
            let _ = store.insert_user(user);
        });
        fixture.repos.iter().for_each(|repo| {
            let _ = store.insert_repository(repo.record());
        });
        fixture.tokens.iter().cloned().for_each(|token| {
            let _ = store.insert_token(token);
        });
        store
    }
}

#[async_trait]
impl Datastore for Memory {
    async fn user(&self, login: &UserName) -> Result<User, GetError> {
        trace!(target: "app::store::memory", "get user `{login}`");
        self.users.get(login).cloned().ok_or(GetError::NotFound)
    }

    async fn repository(&self, cx: &RepositoryContext) -> Result<Repository, GetError> {
        trace!(target: "app::store::memory", "get repository `{cx}`");
        self.repos.get(cx).cloned().ok_or(GetError::NotFound)
    }

    async fn token(&self, user: &User, label: &str) -> Result<TokenRecord, GetError> {
        trace!(target: "app::store::memory", "get token `{label}` of `{}`", user.login);
        self.tokens
            .get(&(user.login.clone(), label.to_string()))
            .cloned()
            .ok_or(GetError::NotFound)
    }
}
