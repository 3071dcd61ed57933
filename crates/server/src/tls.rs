// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;
use std::ops::Deref;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use rustls::crypto::ring;
use rustls::ServerConfig;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

/// Server-side TLS configuration.
#[repr(transparent)]
#[derive(Clone, Debug)]
pub struct Config(ServerConfig);

impl Deref for Config {
    type Target = ServerConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Config> for ServerConfig {
    fn from(conf: Config) -> Self {
        conf.0
    }
}

impl Config {
    /// Reads a PEM-encoded certificate chain and private key.
    pub fn read(mut certs: impl BufRead, mut key: impl BufRead) -> anyhow::Result<Self> {
        let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut certs)
            .collect::<Result<_, _>>()
            .context("failed to read server certificate chain")?;
        if certs.is_empty() {
            bail!("server certificate chain missing")
        }
        let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut key)
            .context("failed to read server certificate key")?
            .ok_or_else(|| anyhow!("server certificate key missing"))?;

        ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
            .with_safe_default_protocol_versions()
            .context("failed to select TLS protocol versions")?
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .context("invalid server certificate key")
            .map(Self)
    }
}
