// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Capabilities of a caller on a single repository.
///
/// Computed fresh for every request, never cached or persisted.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Permission {
    pub pull: bool,
    pub push: bool,
    pub admin: bool,
}

impl Permission {
    pub const NONE: Self = Self {
        pull: false,
        push: false,
        admin: false,
    };

    pub const PULL: Self = Self {
        pull: true,
        push: false,
        admin: false,
    };

    pub const PUSH: Self = Self {
        pull: true,
        push: true,
        admin: false,
    };

    pub const ADMIN: Self = Self {
        pull: true,
        push: true,
        admin: true,
    };
}

/// Collaborator role on a repository, as granted by the hosting remote.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pull,
    Push,
    Admin,
}

impl From<Role> for Permission {
    fn from(role: Role) -> Self {
        match role {
            Role::Pull => Permission::PULL,
            Role::Push => Permission::PUSH,
            Role::Admin => Permission::ADMIN,
        }
    }
}
