// Per-request session handle over the hosted auth service.
// Decision: the handle is built fresh for every request from that request's
// cookie jar and never cached; the service is the only shared piece.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::client::{AuthUser, SessionService, TokenBundle};
use crate::error::AuthApiError;

/// Cookie holding the service-issued access token
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie holding the service-issued refresh token
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Server-context session handle, bound to one request's cookies.
///
/// Every operation reads and writes the jar it was constructed with; the
/// handler returns the jar with its response so the browser sees any cookies
/// the service caused us to update.
pub struct ServerSession {
    service: Arc<dyn SessionService>,
    refresh_max_age: time::Duration,
    jar: CookieJar,
}

impl ServerSession {
    pub fn new(
        service: Arc<dyn SessionService>,
        session_max_age: std::time::Duration,
        jar: CookieJar,
    ) -> Self {
        Self {
            service,
            refresh_max_age: time::Duration::seconds(session_max_age.as_secs() as i64),
            jar,
        }
    }

    /// Exchange an authorization code for a session. On success the session
    /// cookies are installed into the jar.
    pub async fn exchange_code(&mut self, code: &str) -> Result<(), AuthApiError> {
        let tokens = self.service.exchange_code(code).await?;
        self.install(&tokens);
        Ok(())
    }

    /// Read the identity behind the current session, or `None` if there is no
    /// usable session.
    ///
    /// An expired access token is retried once through the refresh token; the
    /// refreshed cookies land in the jar so the response carries them forward.
    pub async fn current_user(&mut self) -> Option<AuthUser> {
        let access = self.cookie_value(ACCESS_COOKIE);

        if let Some(token) = &access {
            match self.service.user_info(token).await {
                Ok(user) => return Some(user),
                Err(err) if err.is_unauthorized() => {
                    tracing::debug!("access token rejected, attempting refresh");
                }
                Err(err) => {
                    tracing::debug!("identity read failed: {}", err);
                    return None;
                }
            }
        }

        // Missing or expired access token; the refresh token is the last resort.
        let refresh = self.cookie_value(REFRESH_COOKIE)?;
        let tokens = match self.service.refresh(&refresh).await {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::debug!("session refresh failed: {}", err);
                return None;
            }
        };
        self.install(&tokens);

        match self.service.user_info(&tokens.access_token).await {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::debug!("identity read failed after refresh: {}", err);
                None
            }
        }
    }

    /// Terminate the current session. The revoke call is best-effort; the
    /// session cookies are cleared from the jar regardless of its outcome.
    pub async fn sign_out(&mut self) {
        if let Some(token) = self.cookie_value(ACCESS_COOKIE) {
            if let Err(err) = self.service.sign_out(&token).await {
                tracing::debug!("sign-out call failed, clearing session anyway: {}", err);
            }
        }
        self.jar = clear_session_cookies(std::mem::take(&mut self.jar));
    }

    /// Hand the (possibly updated) jar back for the response
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn cookie_value(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value().to_string())
    }

    fn install(&mut self, tokens: &TokenBundle) {
        self.jar = session_cookies(
            std::mem::take(&mut self.jar),
            tokens,
            self.refresh_max_age,
        );
    }
}

/// Install the session cookies for a token bundle
pub fn session_cookies(
    jar: CookieJar,
    tokens: &TokenBundle,
    refresh_max_age: time::Duration,
) -> CookieJar {
    let access = Cookie::build((ACCESS_COOKIE, tokens.access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(tokens.expires_in))
        .build();

    let refresh = Cookie::build((REFRESH_COOKIE, tokens.refresh_token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(refresh_max_age)
        .build();

    jar.add(access).add(refresh)
}

/// Remove both session cookies
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"))
}
