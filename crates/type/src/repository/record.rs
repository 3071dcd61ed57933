// SPDX-License-Identifier: Apache-2.0

use super::super::UserName;
use super::{Context, Name};

use serde::{Deserialize, Serialize};

/// A stored repository record
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    pub owner: UserName,
    pub name: Name,

    /// Private repositories are hidden from anonymous callers.
    #[serde(default)]
    pub private: bool,
}

impl Record {
    pub fn context(&self) -> Context {
        Context {
            owner: self.owner.clone(),
            name: self.name.clone(),
        }
    }
}
