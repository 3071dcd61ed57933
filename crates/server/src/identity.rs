// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Flow};

use gatehouse_type::{TokenKind, UserName};

use axum::http::StatusCode;
use tracing::{debug, error, trace, warn};

/// Loads the user the resolved token was issued to and stores it in `cx`.
///
/// Callers without a token, or whose login does not resolve to a user,
/// stay anonymous. Label and agent tokens are checked against the stored
/// credential record: a record that is missing or was issued at a different
/// time means the credential was revoked, and the request is forbidden.
pub async fn load(cx: &mut Context) -> Flow {
    let token = match cx.token() {
        Some(token) => token.clone(),
        None => return Flow::Continue,
    };
    let datastore = match cx.datastore() {
        Ok(datastore) => datastore.clone(),
        Err(e) => {
            error!(target: "app::identity", "{e}");
            return Flow::from(e);
        }
    };

    let login = match token.login.parse::<UserName>() {
        Ok(login) => login,
        Err(e) => {
            debug!(target: "app::identity", "invalid login `{}`: {e}", token.login);
            return Flow::Continue;
        }
    };
    let user = match datastore.user(&login).await {
        Ok(user) => user,
        Err(e) => {
            debug!(target: "app::identity", "failed to load user `{login}`: {e}");
            return Flow::Continue;
        }
    };

    if token.kind != TokenKind::Session {
        match datastore.token(&user, &token.label).await {
            Ok(record) if record.issued == token.issued => {}
            Ok(record) => {
                warn!(
                    target: "app::identity",
                    "{} token `{}` of `{login}` issued at {} does not match record issued at {}",
                    token.kind, token.label, token.issued, record.issued
                );
                return Flow::Terminate(StatusCode::FORBIDDEN);
            }
            Err(e) => {
                warn!(
                    target: "app::identity",
                    "{} token `{}` of `{login}` has no valid record: {e}",
                    token.kind, token.label
                );
                return Flow::Terminate(StatusCode::FORBIDDEN);
            }
        }
    }

    trace!(target: "app::identity", "authenticated `{login}` with {} token", token.kind);
    let _ = cx.set_user(user);
    Flow::Continue
}
