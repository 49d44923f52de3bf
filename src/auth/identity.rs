use anyhow::Context;
use axum::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Caller identity as reported by the external identity service.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: Uuid,
    pub email: String,
}

/// Validates bearer tokens against the identity service.
///
/// `Ok(None)` means the token was rejected; `Err` means the service could not
/// be reached or answered with something unexpected.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn get_user(&self, token: &str) -> anyhow::Result<Option<AuthedUser>>;
}

#[derive(Clone)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityClient {
    pub fn new(http: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: String,
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn get_user(&self, token: &str) -> anyhow::Result<Option<AuthedUser>> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .context("identity service request")?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("identity service returned {}", response.status());
        }

        let user: UserResponse = response
            .json()
            .await
            .context("identity service response body")?;
        debug!(user_id = %user.id, email = %user.email, "token validated");
        Ok(Some(AuthedUser {
            id: user.id,
            email: user.email,
        }))
    }
}
