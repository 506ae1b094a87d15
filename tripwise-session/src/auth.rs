use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tripwise_core::{AuthError, Masked};

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: Masked<String>,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: Masked(password.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginSuccess {
    jwt_token: String,
}

#[derive(Debug, Deserialize)]
struct LoginFailure {
    error_msg: Option<String>,
}

/// Remote credential check
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session token
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

/// Calls `POST {base_url}/login` with a JSON body
pub struct HttpAuthService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn login_url(&self) -> String {
        format!("{}/login", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let response = self
            .client
            .post(self.login_url())
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                warn!("Login request failed: {}", e);
                AuthError::Transport
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Reading login response failed: {}", e);
            AuthError::Transport
        })?;

        if !status.is_success() {
            let failure: LoginFailure = serde_json::from_slice(&body).map_err(|e| {
                warn!("Malformed login rejection with status {}: {}", status, e);
                AuthError::Transport
            })?;
            info!("Login for {} rejected with status {}", credentials.username, status);
            return Err(AuthError::rejected(failure.error_msg));
        }

        match serde_json::from_slice::<LoginSuccess>(&body) {
            Ok(success) if !success.jwt_token.is_empty() => Ok(success.jwt_token),
            Ok(_) => {
                warn!("Login response carried an empty token");
                Err(AuthError::Transport)
            }
            Err(e) => {
                warn!("Malformed login response: {}", e);
                Err(AuthError::Transport)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_joins_cleanly() {
        assert_eq!(HttpAuthService::new("http://host/api").login_url(), "http://host/api/login");
        assert_eq!(HttpAuthService::new("http://host/api/").login_url(), "http://host/api/login");
    }

    #[test]
    fn test_credentials_body() {
        let credentials = Credentials::new("rahul", "rahul@2021");
        let body = serde_json::to_value(&credentials).unwrap();
        assert_eq!(body, serde_json::json!({"username": "rahul", "password": "rahul@2021"}));
        assert!(!format!("{:?}", credentials).contains("rahul@2021"));
    }
}
