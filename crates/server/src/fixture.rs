// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use gatehouse_type::{Repository, RepositoryName, Role, TokenRecord, User, UserName};

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

/// Repository entry of a [Fixture], with the collaborator table the hosting remote would report.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FixtureRepository {
    pub owner: UserName,
    pub name: RepositoryName,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub collaborators: BTreeMap<UserName, Role>,
}

impl FixtureRepository {
    pub fn record(&self) -> Repository {
        Repository {
            owner: self.owner.clone(),
            name: self.name.clone(),
            private: self.private,
        }
    }
}

/// Users, repositories and credentials used to seed the in-memory collaborators.
///
/// ```toml
/// [[users]]
/// login = "octocat"
/// admin = true
///
/// [[repos]]
/// owner = "octocat"
/// name = "hello-world"
/// private = true
/// collaborators = { hubot = "push" }
///
/// [[tokens]]
/// login = "octocat"
/// label = "ci"
/// issued = 1650000000
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub repos: Vec<FixtureRepository>,
    #[serde(default)]
    pub tokens: Vec<TokenRecord>,
}

impl Fixture {
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("failed to parse fixture")
    }

    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        read_to_string(path)
            .with_context(|| format!("failed to read fixture at `{}`", path.display()))
            .and_then(|s| Self::from_toml(&s))
    }
}
