// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, STRICT_TRANSPORT_SECURITY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use headers::{Expires, HeaderMapExt, LastModified};

/// Request extension marking requests received over an encrypted connection.
#[derive(Clone, Copy, Debug)]
pub struct Encrypted;

/// Adds the security headers every response carries.
pub fn harden(headers: &mut HeaderMap, encrypted: bool) {
    let _ = headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    let _ = headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    let _ = headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    let _ = headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    let _ = headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, max-age=0, must-revalidate"),
    );
    headers.typed_insert(LastModified::from(SystemTime::now()));
    headers.typed_insert(Expires::from(UNIX_EPOCH));
    if encrypted {
        let _ = headers.insert(
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000"),
        );
    }
}

/// Middleware applying [harden] to every response, whatever its status.
pub async fn set_headers(req: Request<Body>, next: Next<Body>) -> Response {
    let encrypted = req.extensions().get::<Encrypted>().is_some();
    let mut res = next.run(req).await;
    harden(res.headers_mut(), encrypted);
    res
}
