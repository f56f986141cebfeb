// OAuth callback and sign-out routes.
// Decision: every failure on these paths is an ordinary redirect back to
// /login, never an error response; the error flag is the only detail surfaced

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Redirect,
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use portico_auth::ServerSession;
use serde::Deserialize;

use crate::origin::request_origin;
use crate::AppState;

/// Query string of the identity provider's redirect
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/callback", get(callback))
        .route("/auth/signout", post(signout))
        .with_state(state)
}

/// GET /auth/callback - exchange the provider's authorization code for a session
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> (CookieJar, Redirect) {
    let origin = request_origin(&headers, state.config.site_url.as_deref());

    // No code means the flow was aborted at the provider; back to login
    // without an error flag.
    let Some(code) = query.code else {
        return (jar, Redirect::to(&format!("{origin}/login")));
    };

    let mut session = ServerSession::new(
        state.service.clone(),
        state.config.session_max_age,
        jar,
    );

    match session.exchange_code(&code).await {
        Ok(()) => (
            session.into_jar(),
            Redirect::to(&format!("{origin}/dashboard")),
        ),
        Err(err) => {
            // Invalid, expired and reused codes all land here; the login page
            // only ever learns that something went wrong.
            tracing::warn!("code exchange failed: {}", err);
            (
                session.into_jar(),
                Redirect::to(&format!("{origin}/login?error=oauth")),
            )
        }
    }
}

/// POST /auth/signout - revoke the session and return to the login page
pub async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let origin = request_origin(&headers, state.config.site_url.as_deref());

    let mut session = ServerSession::new(
        state.service.clone(),
        state.config.session_max_age,
        jar,
    );
    session.sign_out().await;

    (session.into_jar(), Redirect::to(&format!("{origin}/login")))
}
