// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Flow};

use axum::http::StatusCode;
use tracing::{error, trace, warn};

/// Asks the hosting remote for the caller's permissions on the resolved repository
/// and stores them in `cx`.
///
/// Must run after repository resolution. Without a remote the permission
/// stays unset, which guards treat as no permission at all.
pub async fn evaluate(cx: &mut Context) -> Flow {
    let repo = match cx.repository() {
        Some(repo) => repo.clone(),
        None => {
            error!(target: "app::permission", "permission evaluated before repository resolution");
            return Flow::Terminate(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let remote = match cx.remote() {
        Some(remote) => remote.clone(),
        None => {
            warn!(target: "app::permission", "no remote configured, `{}/{}` is inaccessible", repo.owner, repo.name);
            return Flow::Continue;
        }
    };

    let perm = remote.permission(cx.user(), &repo).await;
    trace!(target: "app::permission", "evaluated {perm:?} on `{}/{}`", repo.owner, repo.name);
    let _ = cx.set_permission(perm);
    Flow::Continue
}
