use crate::errors::ServiceError;
use serde::Deserialize;
use std::collections::HashMap;

const OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Token payload returned by Google's OAuth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Minimal OAuth2 client for the Drive scope: authorization-code and
/// refresh-token exchanges as plain form POSTs.
#[derive(Clone)]
pub struct GoogleOAuth {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuth {
    pub fn new(client_id: String, client_secret: String) -> Result<Self, ServiceError> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ServiceError::ValidationError(
                "Client ID and client secret must be provided".to_string(),
            ));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
        })
    }

    /// Exchange an authorization code for tokens. The response carries the
    /// refresh token to persist on the backup account.
    pub async fn authorize(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, ServiceError> {
        let mut form = HashMap::new();
        form.insert("code", code);
        form.insert("client_id", self.client_id.as_str());
        form.insert("client_secret", self.client_secret.as_str());
        form.insert("grant_type", "authorization_code");
        form.insert("scope", DRIVE_SCOPE);
        form.insert("redirect_uri", redirect_uri);

        self.token_request(&form).await
    }

    /// Exchange a stored refresh token for a fresh access token.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, ServiceError> {
        let mut form = HashMap::new();
        form.insert("client_id", self.client_id.as_str());
        form.insert("client_secret", self.client_secret.as_str());
        form.insert("refresh_token", refresh_token);
        form.insert("grant_type", "refresh_token");
        form.insert("scope", DRIVE_SCOPE);

        self.token_request(&form).await
    }

    /// Consent URL for connecting a new account; offline access so a refresh
    /// token is issued.
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "https://accounts.google.com/o/oauth2/v2/auth?access_type=offline&response_type=code&prompt=consent&include_granted_scopes=true&client_id={}&scope={}&redirect_uri={}&state={}",
            self.client_id, DRIVE_SCOPE, redirect_uri, state
        )
    }

    async fn token_request(
        &self,
        form: &HashMap<&str, &str>,
    ) -> Result<TokenResponse, ServiceError> {
        let response = self
            .http
            .post(OAUTH_TOKEN_URL)
            .form(form)
            .send()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("Google OAuth: {}", e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("Google OAuth: {}", e)))?;

        if let Ok(err) = serde_json::from_slice::<TokenError>(&body) {
            if !err.error.is_empty() {
                return Err(ServiceError::ExternalServiceError(format!(
                    "Google OAuth error: {}",
                    err.error_description.unwrap_or(err.error)
                )));
            }
        }

        serde_json::from_slice(&body).map_err(|e| {
            ServiceError::ExternalServiceError(format!("Google OAuth: unreadable response: {}", e))
        })
    }
}
