// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use gatehouse_server::{Access, Builder, Context, Encrypted, Fixture, Jwt, Memory, Static};
use gatehouse_type::{Permission, Token, TokenKind};

use axum::body::Body;
use axum::extract::Extension;
use axum::http::header::STRICT_TRANSPORT_SECURITY;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::get;
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;

const SECRET: &[u8] = b"correct horse battery staple";

const FIXTURE: &str = r#"
[[users]]
login = "octocat"

[[users]]
login = "hubot"

[[users]]
login = "root"
admin = true

[[users]]
login = "drone"

[[repos]]
owner = "octocat"
name = "hello-world"

[[repos]]
owner = "octocat"
name = "secret"
private = true
collaborators = { octocat = "admin", hubot = "pull" }

[[tokens]]
login = "octocat"
label = "ci"
issued = 100

[[tokens]]
login = "drone"
label = "runner"
issued = 100
"#;

fn context() -> Context {
    let fixture = Fixture::from_toml(FIXTURE).unwrap();
    let mut cx = Context::new();
    let _ = cx
        .set_datastore(Arc::new(Memory::from(&fixture)))
        .set_session(Arc::new(Jwt::new(SECRET)))
        .set_remote(Arc::new(Static::from(&fixture)));
    cx
}

fn gate() -> Router {
    Builder::new(context()).build_router()
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn sign(kind: TokenKind, login: &str, label: &str, issued: i64) -> String {
    let token = Token {
        kind,
        login: login.into(),
        label: label.into(),
        issued,
        expires: (kind == TokenKind::Session).then(|| now() + 3600),
    };
    encode(&Header::default(), &token, &EncodingKey::from_secret(SECRET)).unwrap()
}

fn session(login: &str) -> String {
    sign(TokenKind::Session, login, "", now())
}

async fn call(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<String>,
) -> Response<axum::body::BoxBody> {
    let req = Request::builder().method(method).uri(uri);
    let req = match token {
        Some(token) => req.header("Authorization", format!("Bearer {token}")),
        None => req,
    };
    router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

async fn access(res: Response<axum::body::BoxBody>) -> Access {
    assert_eq!(res.status(), StatusCode::OK);
    let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn assert_hardened<B>(res: &Response<B>) {
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(
        headers["cache-control"],
        "no-cache, no-store, max-age=0, must-revalidate"
    );
    assert!(headers.contains_key("last-modified"));
    assert!(headers.contains_key("expires"));
}

#[async_std::test]
async fn anonymous_pull_of_public_repository() {
    let res = call(gate(), Method::GET, "/api/repos/octocat/hello-world", None).await;
    assert_hardened(&res);
    assert!(!res.headers().contains_key(STRICT_TRANSPORT_SECURITY));
    let access = access(res).await;
    assert_eq!(access.user, None);
    assert_eq!(access.repository.unwrap().name.as_str(), "hello-world");
    assert_eq!(access.permission, Some(Permission::PULL));
}

#[async_std::test]
async fn anonymous_push_to_public_repository() {
    let res = call(gate(), Method::POST, "/api/repos/octocat/hello-world", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_hardened(&res);
}

#[async_std::test]
async fn collaborator_access_to_private_repository() {
    let token = session("hubot");
    let res = call(
        gate(),
        Method::GET,
        "/api/repos/octocat/secret/builds",
        Some(token.clone()),
    )
    .await;
    assert_eq!(access(res).await.permission, Some(Permission::PULL));

    let res = call(
        gate(),
        Method::POST,
        "/api/repos/octocat/secret/builds",
        Some(token),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_hardened(&res);
}

#[async_std::test]
async fn private_repository_hidden() {
    let res = call(gate(), Method::GET, "/api/repos/octocat/secret", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = call(
        gate(),
        Method::GET,
        "/api/repos/octocat/missing",
        Some(session("hubot")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[async_std::test]
async fn label_token() {
    let token = sign(TokenKind::Label, "octocat", "ci", 100);
    let res = call(gate(), Method::POST, "/api/repos/octocat/secret", Some(token)).await;
    let access = access(res).await;
    assert_eq!(access.kind, Some(TokenKind::Label));
    assert_eq!(access.user.unwrap().login.as_str(), "octocat");
    assert_eq!(access.permission, Some(Permission::ADMIN));
}

#[async_std::test]
async fn revoked_label_token() {
    let token = sign(TokenKind::Label, "octocat", "ci", 99);
    let res = call(gate(), Method::GET, "/api/repos/octocat/hello-world", Some(token)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_hardened(&res);

    let token = sign(TokenKind::Label, "octocat", "deleted", 100);
    let res = call(gate(), Method::GET, "/api/user", Some(token)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[async_std::test]
async fn invalid_token_is_anonymous() {
    let res = call(
        gate(),
        Method::GET,
        "/api/repos/octocat/hello-world",
        Some("not.a.token".into()),
    )
    .await;
    assert_eq!(access(res).await.user, None);

    let res = call(gate(), Method::GET, "/api/user", Some("not.a.token".into())).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[async_std::test]
async fn user_routes() {
    let res = call(gate(), Method::GET, "/api/user", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = call(gate(), Method::GET, "/api/user/repos", Some(session("hubot"))).await;
    let access = access(res).await;
    assert_eq!(access.kind, Some(TokenKind::Session));
    assert_eq!(access.repository, None);
    assert_eq!(access.permission, None);
}

#[async_std::test]
async fn admin_routes() {
    let res = call(gate(), Method::GET, "/api/users", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = call(gate(), Method::GET, "/api/users", Some(session("hubot"))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = call(gate(), Method::DELETE, "/api/users/hubot", Some(session("root"))).await;
    assert!(access(res).await.user.unwrap().admin);
}

#[async_std::test]
async fn agent_routes() {
    let res = call(gate(), Method::GET, "/api/queue", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = call(gate(), Method::GET, "/api/queue", Some(session("hubot"))).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_hardened(&res);

    let token = sign(TokenKind::Agent, "drone", "runner", 100);
    let res = call(gate(), Method::POST, "/api/queue/pull", Some(token)).await;
    assert_eq!(access(res).await.kind, Some(TokenKind::Agent));
}

#[async_std::test]
async fn agent_token_without_user() {
    let token = sign(TokenKind::Agent, "drone", "runner", 99);
    let res = call(gate(), Method::POST, "/api/queue/pull", Some(token)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Revocation is checked against the user's records, so a login
    // without a user record is admitted as an anonymous agent.
    let token = sign(TokenKind::Agent, "ghost", "runner", 99);
    let res = call(gate(), Method::POST, "/api/queue/pull", Some(token)).await;
    let access = access(res).await;
    assert_eq!(access.kind, Some(TokenKind::Agent));
    assert_eq!(access.user, None);
}

#[async_std::test]
async fn badges_have_no_guard() {
    let res = call(gate(), Method::GET, "/api/badges/octocat/secret/status.svg", None).await;
    assert_eq!(access(res).await.permission, Some(Permission::NONE));

    let res = call(gate(), Method::GET, "/api/badges/octocat/missing/status.svg", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[async_std::test]
async fn unknown_route() {
    let res = call(gate(), Method::GET, "/api/unknown", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_hardened(&res);
}

#[async_std::test]
async fn token_sources() {
    let token = session("hubot");

    let req = Request::builder()
        .uri(format!("/api/user?access_token={token}"))
        .body(Body::empty())
        .unwrap();
    let res = gate().oneshot(req).await.unwrap();
    assert_eq!(access(res).await.user.unwrap().login.as_str(), "hubot");

    let req = Request::builder()
        .uri("/api/user")
        .header("Cookie", format!("user_sess={token}"))
        .body(Body::empty())
        .unwrap();
    let res = gate().oneshot(req).await.unwrap();
    assert_eq!(access(res).await.user.unwrap().login.as_str(), "hubot");
}

#[async_std::test]
async fn encrypted_connection() {
    let router = gate().layer(Extension(Encrypted));
    let res = call(router, Method::GET, "/api/unknown", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_hardened(&res);
    assert_eq!(res.headers()[STRICT_TRANSPORT_SECURITY], "max-age=31536000");
}

#[async_std::test]
async fn custom_downstream() {
    let downstream = Router::new().route(
        "/api/repos/:owner/:name",
        get(|Extension(cx): Extension<Context>| async move {
            cx.user()
                .map(|user| user.login.to_string())
                .unwrap_or_default()
        }),
    );
    let router = Builder::new(context()).downstream(downstream).build_router();

    let res = call(
        router.clone(),
        Method::GET,
        "/api/repos/octocat/secret",
        Some(session("octocat")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_hardened(&res);
    let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
    assert_eq!(&body[..], b"octocat");

    let res = call(router, Method::GET, "/api/repos/octocat/secret/logs", Some(session("octocat"))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
