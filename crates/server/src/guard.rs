// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::{Context, Flow};

use gatehouse_type::TokenKind;

use axum::http::{Method, StatusCode};
use tracing::{debug, error};

/// A precondition checked against an already-resolved [Context].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Guard {
    /// The caller is an authenticated user.
    User,
    /// The caller is an authenticated installation administrator.
    Admin,
    /// The caller presented an agent token.
    Agent,
    /// The caller may pull the resolved repository.
    Pull,
    /// The caller may push to the resolved repository, unless the method is safe.
    Push,
}

impl Guard {
    pub fn check(self, cx: &Context, method: &Method) -> Flow {
        let flow = match self {
            Guard::User => require_user(cx),
            Guard::Admin => require_admin(cx),
            Guard::Agent => require_agent(cx),
            Guard::Pull => require_pull(cx),
            Guard::Push => require_push(cx, method),
        };
        if let Flow::Terminate(status) = flow {
            debug!(target: "app::guard", "{self:?} guard rejected {method} request with {status}");
        }
        flow
    }
}

pub fn require_user(cx: &Context) -> Flow {
    match cx.user() {
        Some(_) => Flow::Continue,
        None => Flow::Terminate(StatusCode::UNAUTHORIZED),
    }
}

pub fn require_admin(cx: &Context) -> Flow {
    match cx.user() {
        None => Flow::Terminate(StatusCode::UNAUTHORIZED),
        Some(user) if !user.admin => Flow::Terminate(StatusCode::FORBIDDEN),
        Some(_) => Flow::Continue,
    }
}

/// Requires an agent token.
///
/// Agent routes are never reached by other callers, so any other kind of
/// token indicates a routing defect and fails with `500 Internal Server Error`.
pub fn require_agent(cx: &Context) -> Flow {
    match cx.token() {
        None => Flow::Terminate(StatusCode::UNAUTHORIZED),
        Some(token) if token.kind != TokenKind::Agent => {
            error!(target: "app::guard", "agent route reached with {} token of `{}`", token.kind, token.login);
            Flow::Terminate(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Some(_) => Flow::Continue,
    }
}

/// Anonymous callers are asked to authenticate, authenticated callers
/// without the capability are told the repository does not exist.
fn require_capability(cx: &Context, granted: bool) -> Flow {
    match (cx.user(), granted) {
        (_, true) => Flow::Continue,
        (None, false) => Flow::Terminate(StatusCode::UNAUTHORIZED),
        (Some(_), false) => Flow::Terminate(StatusCode::NOT_FOUND),
    }
}

pub fn require_pull(cx: &Context) -> Flow {
    require_capability(cx, cx.permission().map_or(false, |perm| perm.pull))
}

/// Like [require_pull] on the push capability. `GET` and `OPTIONS` requests always pass.
pub fn require_push(cx: &Context, method: &Method) -> Flow {
    if matches!(*method, Method::GET | Method::OPTIONS) {
        return Flow::Continue;
    }
    require_capability(cx, cx.permission().map_or(false, |perm| perm.push))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::{label_token, session_token};

    use gatehouse_type::{Permission, Token, User};

    fn context(user: Option<bool>, perm: Option<Permission>) -> Context {
        let mut cx = Context::new();
        if let Some(admin) = user {
            let _ = cx.set_user(User {
                login: "octocat".parse().unwrap(),
                admin,
            });
        }
        if let Some(perm) = perm {
            let _ = cx.set_permission(perm);
        }
        cx
    }

    const UNAUTHORIZED: Flow = Flow::Terminate(StatusCode::UNAUTHORIZED);
    const FORBIDDEN: Flow = Flow::Terminate(StatusCode::FORBIDDEN);
    const NOT_FOUND: Flow = Flow::Terminate(StatusCode::NOT_FOUND);

    #[test]
    fn user() {
        assert_eq!(require_user(&context(None, None)), UNAUTHORIZED);
        assert_eq!(require_user(&context(Some(false), None)), Flow::Continue);
    }

    #[test]
    fn admin() {
        assert_eq!(require_admin(&context(None, None)), UNAUTHORIZED);
        assert_eq!(require_admin(&context(Some(false), None)), FORBIDDEN);
        assert_eq!(require_admin(&context(Some(true), None)), Flow::Continue);
    }

    #[test]
    fn agent() {
        let mut cx = Context::new();
        assert_eq!(require_agent(&cx), UNAUTHORIZED);

        let _ = cx.set_token(session_token("octocat"));
        assert_eq!(
            require_agent(&cx),
            Flow::Terminate(StatusCode::INTERNAL_SERVER_ERROR)
        );

        let _ = cx.set_token(label_token("octocat", "ci", 100));
        assert_eq!(
            require_agent(&cx),
            Flow::Terminate(StatusCode::INTERNAL_SERVER_ERROR)
        );

        let _ = cx.set_token(Token {
            kind: TokenKind::Agent,
            ..label_token("agent", "worker-1", 100)
        });
        assert_eq!(require_agent(&cx), Flow::Continue);
    }

    #[test]
    fn pull() {
        assert_eq!(require_pull(&context(None, None)), UNAUTHORIZED);
        assert_eq!(require_pull(&context(None, Some(Permission::NONE))), UNAUTHORIZED);
        assert_eq!(require_pull(&context(Some(false), Some(Permission::NONE))), NOT_FOUND);
        assert_eq!(require_pull(&context(Some(false), None)), NOT_FOUND);
        assert_eq!(require_pull(&context(None, Some(Permission::PULL))), Flow::Continue);
        assert_eq!(
            require_pull(&context(Some(false), Some(Permission::PULL))),
            Flow::Continue
        );
    }

    #[test]
    fn push_safe_methods() {
        for method in [Method::GET, Method::OPTIONS] {
            assert_eq!(require_push(&context(None, None), &method), Flow::Continue);
            assert_eq!(
                require_push(&context(Some(false), Some(Permission::NONE)), &method),
                Flow::Continue
            );
        }
    }

    #[test]
    fn push() {
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::HEAD] {
            assert_eq!(require_push(&context(None, None), &method), UNAUTHORIZED);
            assert_eq!(
                require_push(&context(None, Some(Permission::PULL)), &method),
                UNAUTHORIZED
            );
            assert_eq!(
                require_push(&context(Some(false), Some(Permission::PULL)), &method),
                NOT_FOUND
            );
            assert_eq!(
                require_push(&context(Some(false), Some(Permission::PUSH)), &method),
                Flow::Continue
            );
        }
    }

    #[test]
    fn check_dispatches() {
        let cx = context(Some(false), Some(Permission::PULL));
        assert_eq!(Guard::User.check(&cx, &Method::POST), Flow::Continue);
        assert_eq!(Guard::Admin.check(&cx, &Method::POST), FORBIDDEN);
        assert_eq!(Guard::Agent.check(&cx, &Method::POST), UNAUTHORIZED);
        assert_eq!(Guard::Pull.check(&cx, &Method::POST), Flow::Continue);
        assert_eq!(Guard::Push.check(&cx, &Method::POST), NOT_FOUND);
        assert_eq!(Guard::Push.check(&cx, &Method::GET), Flow::Continue);
    }
}
