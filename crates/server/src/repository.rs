// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Flow};

use gatehouse_type::RepositoryContext;

use axum::http::StatusCode;
use tracing::{debug, error, trace};

/// Loads the repository named by the `owner` and `name` route parameters and stores it in `cx`.
///
/// When the repository cannot be found, authenticated callers get
/// `404 Not Found` while anonymous callers get `401 Unauthorized`, so that
/// nobody learns whether a repository exists without authenticating first.
pub async fn resolve(cx: &mut Context, owner: &str, name: &str) -> Flow {
    let datastore = match cx.datastore() {
        Ok(datastore) => datastore.clone(),
        Err(e) => {
            error!(target: "app::repository", "{e}");
            return Flow::from(e);
        }
    };

    let found = match RepositoryContext::from_parts(owner, name) {
        Ok(repo) => datastore.repository(&repo).await.map_err(anyhow::Error::new),
        Err(e) => Err(e),
    };
    match found {
        Ok(repo) => {
            trace!(target: "app::repository", "resolved repository `{owner}/{name}`");
            let _ = cx.set_repository(repo);
            Flow::Continue
        }
        Err(e) if cx.user().is_some() => {
            debug!(target: "app::repository", "failed to resolve `{owner}/{name}`: {e:#}");
            Flow::Terminate(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            debug!(target: "app::repository", "failed to resolve `{owner}/{name}` anonymously: {e:#}");
            Flow::Terminate(StatusCode::UNAUTHORIZED)
        }
    }
}
