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

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gatehouse_server::{App, Context, Fixture, Jwt, Memory, Settings, Static, TlsConfig};

use anyhow::{bail, Context as _};
use async_std::net::TcpListener;
use clap::Parser;
use confargs::{args, prefix_char_filter, Toml};
use futures::StreamExt;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Authentication and authorization gate for a continuous integration API.
///
/// Any command-line options listed here may be specified by one or
/// more configuration files, which can be used by passing the
/// name of the file on the command-line with the syntax `@config.toml`.
/// The configuration file must contain valid TOML table mapping argument
/// names to their values.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Address to bind to.
    #[arg(long, default_value_t = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080))]
    addr: SocketAddr,

    /// Secret used to verify HS256-signed tokens.
    #[arg(long)]
    secret: String,

    /// Path to a TOML file with the users, repositories and credentials to serve.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Path to PEM-encoded server certificate. Requires `--key`.
    #[arg(long, requires = "key")]
    cert: Option<PathBuf>,

    /// Path to PEM-encoded server certificate key. Requires `--cert`.
    #[arg(long, requires = "cert")]
    key: Option<PathBuf>,

    /// Public base URL of the service.
    #[arg(long)]
    url: Option<String>,

    /// Allow users to register themselves.
    #[arg(long)]
    open: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

fn open_buffered(p: impl AsRef<Path>) -> io::Result<impl BufRead> {
    File::open(p).map(BufReader::new)
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        fmt.json().init()
    } else {
        fmt.init()
    }
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    let Args {
        addr,
        secret,
        data,
        cert,
        key,
        url,
        open,
        log_json,
    } = args::<Toml>(prefix_char_filter::<'@'>)
        .context("Failed to parse config")
        .map(Args::parse_from)?;

    init_logging(log_json);

    if secret.is_empty() {
        bail!("token secret must not be empty")
    }

    let fixture = match data {
        Some(path) => Fixture::read(path).context("Failed to load data")?,
        None => Fixture::default(),
    };

    let mut cx = Context::new();
    let _ = cx
        .set_datastore(Arc::new(Memory::from(&fixture)))
        .set_session(Arc::new(Jwt::new(secret.as_bytes())))
        .set_remote(Arc::new(Static::from(&fixture)))
        .set_settings(Arc::new(Settings { url, open }));

    let mut builder = App::builder(cx);
    if let (Some(cert), Some(key)) = (cert, key) {
        let cert = open_buffered(cert).context("Failed to open server certificate file")?;
        let key = open_buffered(key).context("Failed to open server key file")?;
        let tls = TlsConfig::read(cert, key).context("Failed to construct server TLS config")?;
        builder = builder.tls(tls);
    }
    let app = builder.build();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(target: "main", "listening on {addr}");
    listener
        .incoming()
        .for_each_concurrent(None, |stream| async {
            if let Err(e) = async {
                let stream = stream.context("failed to initialize connection")?;
                debug!(
                    target: "main",
                    "received TCP connection from {}",
                    stream
                        .peer_addr()
                        .map(|peer| peer.to_string())
                        .unwrap_or_else(|_| "unknown address".into())
                );
                app.handle(stream).await
            }
            .await
            {
                error!(target: "main", "failed to handle request: {e}");
            }
        })
        .await;
    Ok(())
}
