// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::Remote;
use crate::Fixture;

use gatehouse_type::{Permission, Repository, RepositoryContext, Role, User, UserName};

use std::collections::{BTreeMap, HashMap};

use axum::async_trait;
use tracing::trace;

/// [Remote] answering from a fixed collaborator table.
///
/// Anonymous callers may pull public repositories only. Installation
/// administrators hold every permission. Other users get their collaborator
/// role, falling back to what an anonymous caller would get.
#[derive(Clone, Debug, Default)]
pub struct Static {
    collaborators: HashMap<RepositoryContext, BTreeMap<UserName, Role>>,
}

impl Static {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `role` on `repo` to `login`.
    pub fn grant(&mut self, repo: RepositoryContext, login: UserName, role: Role) -> &mut Self {
        let _ = self
            .collaborators
            .entry(repo)
            .or_default()
            .insert(login, role);
        self
    }

    fn role(&self, repo: &RepositoryContext, login: &UserName) -> Option<Role> {
        self.collaborators.get(repo)?.get(login).copied()
    }
}

impl From<&Fixture> for Static {
    fn from(fixture: &Fixture) -> Self {
        let mut remote = Self::new();
        for repo in &fixture.repos {
            for (login, role) in &repo.collaborators {
                let _ = remote.grant(repo.record().context(), login.clone(), *role);
            }
        }
        remote
    }
}

#[async_trait]
impl Remote for Static {
    async fn permission(&self, user: Option<&User>, repo: &Repository) -> Permission {
        let public = if repo.private {
            Permission::NONE
        } else {
            Permission::PULL
        };
        let perm = match user {
            None => public,
            Some(User { admin: true, .. }) => Permission::ADMIN,
            Some(User { login, .. }) => self
                .role(&repo.context(), login)
                .map(Permission::from)
                .unwrap_or(public),
        };
        trace!(
            target: "app::remote::static",
            "permission on `{}/{}` for {user:?}: {perm:?}",
            repo.owner,
            repo.name
        );
        perm
    }
}
