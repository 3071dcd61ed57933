// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

#![warn(
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    clippy::all
)]
#![forbid(unsafe_code)]

mod access;
mod builder;
mod context;
mod fixture;
mod guard;
mod handle;
mod hardening;
mod pipeline;
mod route;
mod services;
mod tls;

pub mod identity;
pub mod permission;
pub mod remote;
pub mod repository;
pub mod session;
pub mod store;

pub use access::*;
pub use builder::*;
pub use context::*;
pub use fixture::*;
pub use guard::*;
pub(crate) use handle::*;
pub use hardening::*;
pub use pipeline::*;
pub use remote::{Remote, Static};
pub use route::*;
pub use services::*;
pub use session::{Jwt, Session};
pub use store::{Datastore, GetError, Memory};
pub use tls::Config as TlsConfig;

use anyhow::Context as _;
use axum::extract::Extension;
use axum::routing::IntoMakeService;
use axum::Router;
use futures::lock::Mutex;
use futures::{AsyncRead, AsyncWrite};
use futures_rustls::TlsAcceptor;
use hyper::server::conn::Http;
use tokio_util::compat::FuturesAsyncReadCompatExt;
use tower::MakeService;
use tracing::trace;

#[allow(missing_debug_implementations)] // TlsAcceptor does not implement Debug
pub struct App {
    make_service: Mutex<IntoMakeService<Router>>,
    tls: Option<TlsAcceptor>,
}

impl App {
    pub fn builder(cx: Context) -> Builder {
        Builder::new(cx)
    }

    pub async fn handle(
        &self,
        stream: impl 'static + Unpin + AsyncRead + AsyncWrite,
    ) -> anyhow::Result<()> {
        let svc = self
            .make_service
            .lock()
            .await
            .make_service(())
            .await
            .context("failed to create app service")?;
        match &self.tls {
            None => serve(svc, stream).await,
            Some(tls) => {
                trace!(target: "app::App::handle", "begin TLS handshake");
                let stream = tls
                    .accept(stream)
                    .await
                    .context("failed to accept TLS connection")?;
                trace!(target: "app::App::handle", "completed TLS handshake");
                serve(svc.layer(Extension(Encrypted)), stream).await
            }
        }
    }
}

async fn serve(
    svc: Router,
    stream: impl 'static + Unpin + AsyncRead + AsyncWrite,
) -> anyhow::Result<()> {
    trace!(target: "app::App::handle", "begin HTTP request serving");
    Http::new()
        .serve_connection(stream.compat(), svc)
        .await
        .context("failed to handle request")
}
