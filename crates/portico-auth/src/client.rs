// Hosted auth service client (GoTrue-style HTTP API)
// Decision: manual HTTP calls over reqwest; the app uses four endpoints and
// nothing else, so a full SDK dependency is not worth carrying

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AuthApiError;

/// Token bundle issued by the service's `/token` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenBundle {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

/// Identity returned by the service's `/user` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// Service-assigned user ID
    pub id: String,
    /// User email
    pub email: String,
}

/// Operations this application delegates to the hosted auth service.
///
/// The trait is the seam for tests; production code uses [`HttpSessionService`].
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Exchange a single-use authorization code for a session
    async fn exchange_code(&self, code: &str) -> Result<TokenBundle, AuthApiError>;

    /// Trade a refresh token for a fresh token bundle
    async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle, AuthApiError>;

    /// Look up the identity behind an access token
    async fn user_info(&self, access_token: &str) -> Result<AuthUser, AuthApiError>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthApiError>;
}

/// reqwest-backed implementation against the service's HTTP API
pub struct HttpSessionService {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpSessionService {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn token_request(
        &self,
        grant_type: &str,
        form: &[(&str, &str)],
    ) -> Result<TokenBundle, AuthApiError> {
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.api_key)
            .form(form)
            .send()
            .await?;

        let tokens = expect_success(response).await?.json().await?;
        Ok(tokens)
    }
}

#[async_trait]
impl SessionService for HttpSessionService {
    async fn exchange_code(&self, code: &str) -> Result<TokenBundle, AuthApiError> {
        self.token_request("authorization_code", &[("code", code)])
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle, AuthApiError> {
        self.token_request("refresh_token", &[("refresh_token", refresh_token)])
            .await
    }

    async fn user_info(&self, access_token: &str) -> Result<AuthUser, AuthApiError> {
        let response = self
            .client
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let user = expect_success(response).await?.json().await?;
        Ok(user)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthApiError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        expect_success(response).await?;
        Ok(())
    }
}

/// Map non-success statuses to [`AuthApiError::Rejected`], keeping the body
/// around for logging only
async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, AuthApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(AuthApiError::Rejected {
        status: status.as_u16(),
        detail,
    })
}
