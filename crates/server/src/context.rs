// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Datastore, EventBus, Queue, Remote, Runner, Session, Settings};

use gatehouse_type::{Permission, Repository, Token, User};

use std::fmt;
use std::sync::Arc;

/// A mandatory [Context] value was read before it was set.
///
/// This is a wiring defect, never a runtime condition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Missing(pub &'static str);

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` missing from request context", self.0)
    }
}

impl std::error::Error for Missing {}

/// Values resolved for a single request, plus the collaborator handles needed to resolve them.
///
/// A value reads as `None` until the stage that sets it has run. Each request
/// owns exactly one context, cloned from the template configured on the
/// [Builder](crate::Builder).
#[derive(Clone, Default)]
pub struct Context {
    datastore: Option<Arc<dyn Datastore>>,
    session: Option<Arc<dyn Session>>,
    remote: Option<Arc<dyn Remote>>,
    queue: Option<Arc<dyn Queue>>,
    bus: Option<Arc<dyn EventBus>>,
    runner: Option<Arc<dyn Runner>>,
    settings: Option<Arc<Settings>>,

    token: Option<Token>,
    user: Option<User>,
    repository: Option<Repository>,
    permission: Option<Permission>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("datastore", &self.datastore.is_some())
            .field("session", &self.session.is_some())
            .field("remote", &self.remote.is_some())
            .field("queue", &self.queue.is_some())
            .field("bus", &self.bus.is_some())
            .field("runner", &self.runner.is_some())
            .field("settings", &self.settings)
            .field("token", &self.token)
            .field("user", &self.user)
            .field("repository", &self.repository)
            .field("permission", &self.permission)
            .finish()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_datastore(&mut self, datastore: Arc<dyn Datastore>) -> &mut Self {
        self.datastore = Some(datastore);
        self
    }

    pub fn set_session(&mut self, session: Arc<dyn Session>) -> &mut Self {
        self.session = Some(session);
        self
    }

    pub fn set_remote(&mut self, remote: Arc<dyn Remote>) -> &mut Self {
        self.remote = Some(remote);
        self
    }

    pub fn set_queue(&mut self, queue: Arc<dyn Queue>) -> &mut Self {
        self.queue = Some(queue);
        self
    }

    pub fn set_bus(&mut self, bus: Arc<dyn EventBus>) -> &mut Self {
        self.bus = Some(bus);
        self
    }

    pub fn set_runner(&mut self, runner: Arc<dyn Runner>) -> &mut Self {
        self.runner = Some(runner);
        self
    }

    pub fn set_settings(&mut self, settings: Arc<Settings>) -> &mut Self {
        self.settings = Some(settings);
        self
    }

    pub fn set_token(&mut self, token: Token) -> &mut Self {
        self.token = Some(token);
        self
    }

    pub fn set_user(&mut self, user: User) -> &mut Self {
        self.user = Some(user);
        self
    }

    pub fn set_repository(&mut self, repository: Repository) -> &mut Self {
        self.repository = Some(repository);
        self
    }

    pub fn set_permission(&mut self, permission: Permission) -> &mut Self {
        self.permission = Some(permission);
        self
    }

    pub fn datastore(&self) -> Result<&Arc<dyn Datastore>, Missing> {
        self.datastore.as_ref().ok_or(Missing("datastore"))
    }

    pub fn session(&self) -> Result<&Arc<dyn Session>, Missing> {
        self.session.as_ref().ok_or(Missing("session"))
    }

    pub fn remote(&self) -> Option<&Arc<dyn Remote>> {
        self.remote.as_ref()
    }

    pub fn queue(&self) -> Option<&Arc<dyn Queue>> {
        self.queue.as_ref()
    }

    pub fn bus(&self) -> Option<&Arc<dyn EventBus>> {
        self.bus.as_ref()
    }

    pub fn runner(&self) -> Option<&Arc<dyn Runner>> {
        self.runner.as_ref()
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_deref()
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    pub fn permission(&self) -> Option<&Permission> {
        self.permission.as_ref()
    }
}
