// Shared fixtures for route tests: a configurable stand-in for the hosted
// auth service plus request/response helpers.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use portico_auth::{AuthApiError, AuthUser, SessionService, TokenBundle};

pub fn tokens(access: &str, refresh: &str) -> TokenBundle {
    TokenBundle {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        expires_in: 3600,
        token_type: "bearer".to_string(),
    }
}

pub fn user(email: &str) -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        email: email.to_string(),
    }
}

fn rejected() -> AuthApiError {
    AuthApiError::Rejected {
        status: 401,
        detail: "invalid token".to_string(),
    }
}

/// Stand-in auth service; unset fields reject the corresponding call.
#[derive(Default)]
pub struct StubService {
    /// Bundle handed out for any code; `None` rejects every exchange.
    pub exchange: Option<TokenBundle>,
    /// Bundle handed out for any refresh token; `None` rejects every refresh.
    pub refresh: Option<TokenBundle>,
    /// Identity returned for any access token; `None` treats all tokens as invalid.
    pub user: Option<AuthUser>,
    /// Make the revoke call report a service failure.
    pub sign_out_fails: bool,
}

#[async_trait]
impl SessionService for StubService {
    async fn exchange_code(&self, _code: &str) -> Result<TokenBundle, AuthApiError> {
        self.exchange.clone().ok_or_else(rejected)
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenBundle, AuthApiError> {
        self.refresh.clone().ok_or_else(rejected)
    }

    async fn user_info(&self, _access_token: &str) -> Result<AuthUser, AuthApiError> {
        self.user.clone().ok_or_else(rejected)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthApiError> {
        if self.sign_out_fails {
            Err(rejected())
        } else {
            Ok(())
        }
    }
}

/// Request with the headers a proxied browser request would carry.
pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "app.example.com")
        .header("x-forwarded-proto", "https");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// All Set-Cookie header values of a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
