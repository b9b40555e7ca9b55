//! Session middleware: the login-required guard for account routes

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Name of the session cookie issued on login
pub const SESSION_COOKIE: &str = "session";

/// Where unauthenticated requests are sent
pub const LOGIN_PATH: &str = "/accounts/login/";

/// Authenticated user information, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Require a valid session for the wrapped routes
///
/// The token is taken from the session cookie or a Bearer header; anything
/// missing or invalid is redirected to the login path, matching the
/// original login-required behavior for every protected route, the JSON
/// one included.
pub async fn login_required(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers())
        .or_else(|| jar.get(SESSION_COOKIE).map(|c| c.value().to_string()));

    let Some(token) = token else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.jwt_service.validate_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser { id: claims.sub });
            next.run(req).await
        }
        Err(e) => {
            debug!("Rejecting invalid session token: {}", e);
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Build the HttpOnly session cookie for a freshly issued token
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}
