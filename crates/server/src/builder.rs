// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{access, handle, set_headers, App, Context, TlsConfig};

use std::sync::Arc;

use axum::body::Body;
use axum::handler::Handler;
use axum::http::Request;
use axum::{middleware, Router};
use futures::lock::Mutex;
use futures_rustls::TlsAcceptor;

/// [App] builder.
pub struct Builder {
    cx: Context,
    tls: Option<TlsConfig>,
    downstream: Option<Router>,
}

impl Builder {
    /// Constructs a new [Builder]. The context is the template every request context is cloned from.
    pub fn new(cx: Context) -> Self {
        Self {
            cx,
            tls: None,
            downstream: None,
        }
    }

    /// Serves over TLS.
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Sets the router admitted requests are forwarded to.
    ///
    /// Defaults to a router answering every request with the resolved [Access](crate::Access).
    pub fn downstream(mut self, downstream: Router) -> Self {
        self.downstream = Some(downstream);
        self
    }

    /// Builds the gate as a [Router].
    pub fn build_router(self) -> Router {
        router(self.cx, self.downstream)
    }

    /// Builds the application.
    pub fn build(self) -> App {
        App {
            make_service: Mutex::new(router(self.cx, self.downstream).into_make_service()),
            tls: self.tls.map(|tls| TlsAcceptor::from(Arc::new(tls.into()))),
        }
    }
}

fn router(cx: Context, downstream: Option<Router>) -> Router {
    let template = Arc::new(cx);
    let downstream =
        downstream.unwrap_or_else(|| Router::new().fallback(access.into_service()));
    let gate = move |req: Request<Body>| handle(template.clone(), downstream.clone(), req);
    Router::new()
        .fallback(gate.into_service())
        .layer(middleware::from_fn(set_headers))
}
