// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Guard, Pipeline};

/// API endpoint group a request path belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route<'a> {
    /// `/api/user[/...]`, the authenticated caller's own resources.
    User,
    /// `/api/users[/...]`, user administration.
    Users,
    /// `/api/repos/{owner}/{name}[/...]`, a repository and its builds.
    Repository { owner: &'a str, name: &'a str },
    /// `/api/badges/{owner}/{name}[/...]`, status badges of a repository.
    Badge { owner: &'a str, name: &'a str },
    /// `/api/queue[/...]`, the build queue served to agents.
    Queue,
}

impl<'a> Route<'a> {
    /// Parses the route of a request path. Empty segments are ignored.
    pub fn parse(path: &'a str) -> Option<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        if segments.next()? != "api" {
            return None;
        }
        match (segments.next()?, segments.next(), segments.next()) {
            ("user", ..) => Some(Route::User),
            ("users", ..) => Some(Route::Users),
            ("repos", Some(owner), Some(name)) => Some(Route::Repository { owner, name }),
            ("badges", Some(owner), Some(name)) => Some(Route::Badge { owner, name }),
            ("queue", ..) => Some(Route::Queue),
            _ => None,
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        match *self {
            Route::User => Pipeline::new().guard(Guard::User),
            Route::Users => Pipeline::new().guard(Guard::Admin),
            Route::Repository { owner, name } => Pipeline::new()
                .repository(owner, name)
                .guard(Guard::Pull)
                .guard(Guard::Push),
            Route::Badge { owner, name } => Pipeline::new().repository(owner, name),
            Route::Queue => Pipeline::new().guard(Guard::Agent),
        }
    }
}
