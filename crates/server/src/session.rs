// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Flow};

use gatehouse_type::{Token, TokenKind};

use std::fmt;

use axum::http::request::Parts;
use headers::authorization::Bearer;
use headers::{Authorization, Cookie, HeaderMapExt};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, error, trace};
use url::form_urlencoded;

/// Name of the cookie carrying an interactive session token.
pub const COOKIE_NAME: &str = "user_sess";

/// Name of the query parameter that may carry a token.
pub const QUERY_PARAMETER: &str = "access_token";

/// Extracts and validates the token presented with a request.
pub trait Session: Send + Sync {
    /// Returns the validated token, or `None` if the request carries no valid token.
    fn token(&self, req: &Parts) -> Option<Token>;
}

/// [Session] accepting HS256-signed JSON Web Tokens.
///
/// The token is taken from the `Authorization: Bearer` header, the
/// [QUERY_PARAMETER] query parameter or the [COOKIE_NAME] cookie, in that order.
pub struct Jwt {
    key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for Jwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwt")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl Jwt {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Label and agent tokens are long-lived and carry no expiry.
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

fn raw_token(req: &Parts) -> Option<String> {
    req.headers
        .typed_get::<Authorization<Bearer>>()
        .map(|Authorization(bearer)| bearer.token().to_string())
        .or_else(|| {
            form_urlencoded::parse(req.uri.query()?.as_bytes())
                .find(|(k, _)| k == QUERY_PARAMETER)
                .map(|(_, v)| v.into_owned())
        })
        .or_else(|| {
            req.headers
                .typed_get::<Cookie>()?
                .get(COOKIE_NAME)
                .map(Into::into)
        })
        .filter(|token| !token.is_empty())
}

impl Session for Jwt {
    fn token(&self, req: &Parts) -> Option<Token> {
        let raw = raw_token(req)?;
        let token = decode::<Token>(&raw, &self.key, &self.validation)
            .map_err(|e| debug!(target: "app::session", "rejected token: {e}"))
            .ok()?
            .claims;
        if token.login.is_empty() {
            debug!(target: "app::session", "rejected token without login");
            return None;
        }
        if token.kind == TokenKind::Session && token.expires.is_none() {
            debug!(target: "app::session", "rejected session token without expiry");
            return None;
        }
        Some(token)
    }
}

/// Resolves the token presented with the request and stores it in `cx`.
///
/// A missing or invalid token leaves the caller anonymous.
pub fn resolve(cx: &mut Context, req: &Parts) -> Flow {
    let session = match cx.session() {
        Ok(session) => session.clone(),
        Err(e) => {
            error!(target: "app::session", "{e}");
            return Flow::from(e);
        }
    };
    match session.token(req) {
        Some(token) => {
            trace!(target: "app::session", "resolved {} token for `{}`", token.kind, token.login);
            let _ = cx.set_token(token);
        }
        None => trace!(target: "app::session", "no valid token, caller is anonymous"),
    }
    Flow::Continue
}
