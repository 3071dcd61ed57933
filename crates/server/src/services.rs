// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Handles of subsystems the gate threads through to downstream handlers
//! without ever inspecting them.

use serde::{Deserialize, Serialize};

/// Build queue.
pub trait Queue: Send + Sync {}

/// Event bus.
pub trait EventBus: Send + Sync {}

/// Build runner.
pub trait Runner: Send + Sync {}

/// Installation settings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Public base URL of the service.
    #[serde(default)]
    pub url: Option<String>,

    /// Whether users may register themselves.
    #[serde(default)]
    pub open: bool,
}
