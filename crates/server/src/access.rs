// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::Context;

use gatehouse_type::{Permission, Repository, TokenKind, User};

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Access resolved for an admitted request.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Access {
    pub kind: Option<TokenKind>,
    pub user: Option<User>,
    pub repository: Option<Repository>,
    pub permission: Option<Permission>,
}

impl From<&Context> for Access {
    fn from(cx: &Context) -> Self {
        Self {
            kind: cx.token().map(|token| token.kind),
            user: cx.user().cloned(),
            repository: cx.repository().cloned(),
            permission: cx.permission().copied(),
        }
    }
}

/// Default downstream handler, describing the access granted to the caller.
pub async fn access(Extension(cx): Extension<Context>) -> Json<Access> {
    trace!(target: "app::access", "called with {cx:?}");
    Json(Access::from(&cx))
}
