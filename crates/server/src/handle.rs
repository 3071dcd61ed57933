// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Flow, Route};

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceExt;
use tracing::{debug, trace};

/// Authenticates and authorizes `req` and forwards it to `downstream` if admitted.
///
/// The context of every request is cloned from `template`, and the resolved
/// context is attached to admitted requests as an extension.
pub(crate) async fn handle(
    template: Arc<Context>,
    downstream: Router,
    req: Request<Body>,
) -> Response {
    trace!(target: "app::handle", "begin HTTP request handling {} {}", req.method(), req.uri());
    let (parts, body) = req.into_parts();
    let pipeline = match Route::parse(parts.uri.path()) {
        Some(route) => route.pipeline(),
        None => {
            return (
                StatusCode::NOT_FOUND,
                format!("Route `{}` not found", parts.uri.path()),
            )
                .into_response()
        }
    };

    let mut cx = Context::clone(&template);
    if let Flow::Terminate(status) = pipeline.run(&mut cx, &parts).await {
        debug!(target: "app::handle", "{} {} terminated with {status}", parts.method, parts.uri.path());
        return status.into_response();
    }

    let mut req = Request::from_parts(parts, body);
    let _ = req.extensions_mut().insert(cx);
    match downstream.oneshot(req).await {
        Ok(res) => res,
        Err(e) => match e {},
    }
}
