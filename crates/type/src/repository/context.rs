// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::super::UserName;
use super::Name;

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context as _};
use serde::{Deserialize, Serialize};

/// Identifies a repository by its owner and name.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Context {
    pub owner: UserName,
    pub name: Name,
}

impl Context {
    /// Parses a context from separate `owner` and `name` route parameters.
    pub fn from_parts(owner: &str, name: &str) -> anyhow::Result<Self> {
        let owner = owner.parse().context("failed to parse repository owner")?;
        let name = name.parse().context("failed to parse repository name")?;
        Ok(Self { owner, name })
    }
}

impl FromStr for Context {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| anyhow!("`/` character not found"))?;
        Self::from_parts(owner, name)
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
