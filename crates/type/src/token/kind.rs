// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Classification of a validated credential.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Short-lived interactive session.
    Session,
    /// Named long-lived credential, revoked by rotating its label.
    Label,
    /// Machine credential of an automated worker.
    Agent,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Kind::Session => "session",
            Kind::Label => "label",
            Kind::Agent => "agent",
        })
    }
}
