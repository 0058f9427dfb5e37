//! OAuth provider seam.
//!
//! [`OAuthClient`] is injected into the app shell; `AuthStore` only ever
//! sees the profile once the provider has returned one.

use async_trait::async_trait;
use reqwest::Url;
use tracing::{info, warn};

use crate::config::OAuthSettings;
use crate::error::AuthError;
use crate::state::data::UserProfile;

#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// URL the user opens to grant access.
    fn begin_login(&self) -> String;

    /// Profile of the user owning `access_token`.
    async fn current_profile(&self, access_token: &str) -> Result<UserProfile, AuthError>;

    /// Invalidate `access_token` at the provider.
    async fn logout(&self, access_token: &str) -> Result<(), AuthError>;
}

/// Provider endpoints, overridable for tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authorize: String,
    pub userinfo: String,
    pub revoke: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            userinfo: "https://openidconnect.googleapis.com/v1/userinfo".to_string(),
            revoke: "https://oauth2.googleapis.com/revoke".to_string(),
        }
    }
}

/// Google sign-in using the implicit (`response_type=token`) grant.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    client: reqwest::Client,
    settings: OAuthSettings,
    endpoints: Endpoints,
}

impl GoogleOAuth {
    pub fn new(client: reqwest::Client, settings: OAuthSettings) -> Self {
        Self::with_endpoints(client, settings, Endpoints::default())
    }

    pub fn with_endpoints(client: reqwest::Client, settings: OAuthSettings, endpoints: Endpoints) -> Self {
        Self {
            client,
            settings,
            endpoints,
        }
    }
}

#[async_trait]
impl OAuthClient for GoogleOAuth {
    fn begin_login(&self) -> String {
        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("response_type", "token"),
            ("scope", self.settings.scope.as_str()),
        ];
        match Url::parse_with_params(&self.endpoints.authorize, &params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Bad authorize endpoint {}: {}", self.endpoints.authorize, e);
                self.endpoints.authorize.clone()
            }
        }
    }

    async fn current_profile(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let token = access_token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let profile = self
            .client
            .get(&self.endpoints.userinfo)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json::<UserProfile>()
            .await?;

        info!("Provider returned profile for {}", profile.display_name());
        Ok(profile)
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let token = access_token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        self.client
            .post(&self.endpoints.revoke)
            .form(&[("token", token)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
