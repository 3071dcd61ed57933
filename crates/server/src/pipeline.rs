// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{identity, permission, repository, session, Context, Guard, Missing};

use axum::http::request::Parts;
use axum::http::StatusCode;
use tracing::trace;

/// Result of a single stage or guard.
#[must_use]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Flow {
    /// Proceed with the next stage.
    Continue,
    /// Stop processing and respond with the status.
    Terminate(StatusCode),
}

impl Flow {
    pub fn into_result(self) -> Result<(), StatusCode> {
        match self {
            Flow::Continue => Ok(()),
            Flow::Terminate(status) => Err(status),
        }
    }
}

impl From<Missing> for Flow {
    fn from(_: Missing) -> Self {
        Flow::Terminate(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Stages and guards run for one endpoint.
///
/// Stages always run in the same order: session resolution, identity
/// loading, repository resolution and permission evaluation (only if a
/// repository is configured), then the guards in the order they were added.
/// The first stage or guard that terminates stops the pipeline.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pipeline {
    repository: Option<(String, String)>,
    guards: Vec<Guard>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the repository named by `owner` and `name` and the caller's permission on it.
    pub fn repository(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.repository = Some((owner.into(), name.into()));
        self
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub async fn run(&self, cx: &mut Context, req: &Parts) -> Flow {
        match self.try_run(cx, req).await {
            Ok(()) => Flow::Continue,
            Err(status) => Flow::Terminate(status),
        }
    }

    async fn try_run(&self, cx: &mut Context, req: &Parts) -> Result<(), StatusCode> {
        trace!(target: "app::pipeline", "run {self:?} for {} {}", req.method, req.uri.path());
        session::resolve(cx, req).into_result()?;
        identity::load(cx).await.into_result()?;
        if let Some((owner, name)) = &self.repository {
            repository::resolve(cx, owner, name).await.into_result()?;
            permission::evaluate(cx).await.into_result()?;
        }
        self.guards
            .iter()
            .try_for_each(|guard| guard.check(cx, &req.method).into_result())
    }
}
