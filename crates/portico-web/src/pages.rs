// Login and dashboard pages.
// Decision: the dashboard re-checks the session on every render; nothing about
// the authentication decision is cached between requests

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;
use portico_auth::ServerSession;
use serde::Deserialize;

use crate::origin::request_origin;
use crate::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    /// Hosted auth service base URL, used by the sign-in script.
    auth_url: String,
    /// Origin override for the callback URL; empty means use the browser's origin.
    site_url: String,
    /// Whether the previous sign-in attempt failed.
    oauth_error: bool,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/login", get(login_page))
        .route("/dashboard", get(dashboard_page))
        .with_state(state)
}

/// GET /login - sign-in page with the provider trigger
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Response {
    render(LoginTemplate {
        auth_url: state.config.auth_url.clone(),
        site_url: state.config.site_url.clone().unwrap_or_default(),
        oauth_error: query.error.as_deref() == Some("oauth"),
    })
}

/// GET /dashboard - protected page; unauthenticated visitors are redirected
/// to the login page before any content is produced
pub async fn dashboard_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let origin = request_origin(&headers, state.config.site_url.as_deref());

    let mut session = ServerSession::new(
        state.service.clone(),
        state.config.session_max_age,
        jar,
    );

    match session.current_user().await {
        Some(user) => {
            // The jar may carry refreshed tokens; return it either way.
            (
                session.into_jar(),
                render(DashboardTemplate { email: user.email }),
            )
                .into_response()
        }
        None => (
            session.into_jar(),
            Redirect::to(&format!("{origin}/login")),
        )
            .into_response(),
    }
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!("template render failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
