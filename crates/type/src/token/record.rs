// SPDX-License-Identifier: Apache-2.0

use super::super::UserName;

use serde::{Deserialize, Serialize};

/// A stored long-lived credential record
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub login: UserName,
    pub label: String,

    /// Issue time of the currently valid credential under `label`.
    pub issued: i64,
}
