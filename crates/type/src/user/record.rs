// SPDX-License-Identifier: Apache-2.0

use super::Name;

use serde::{Deserialize, Serialize};

/// A stored user record
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Login uniquely identifying the user
    pub login: Name,

    /// Whether the user administers the whole installation
    #[serde(default)]
    pub admin: bool,
}
