// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

mod kind;
mod record;

pub use kind::*;
pub use record::*;

use serde::{Deserialize, Serialize};

/// A validated credential, as decoded from the request.
///
/// Tokens are produced by a session collaborator and live only for the
/// request they were presented with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Token {
    pub kind: Kind,

    /// Identity the token was issued to. Not validated until the user is loaded.
    pub login: String,

    /// Label of the long-lived credential, empty for sessions.
    #[serde(default)]
    pub label: String,

    /// Issue time in seconds since the Unix epoch.
    #[serde(rename = "iat", default)]
    pub issued: i64,

    /// Expiry time in seconds since the Unix epoch.
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}
