//! `/auth/*` endpoints. Successful calls update the client's session tokens.

use reqwest::Method;

use crate::api::client::ApiClient;
use crate::api::dto::{LoginRequest, SessionInfo, TokenResponse};
use crate::api::error::ApiError;
use crate::config::{AuthScope, SessionTokens};

impl ApiClient {
    /// `POST /auth/login` with the `client` header.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<SessionInfo, ApiError> {
        let response: TokenResponse = self
            .send(Method::POST, "/auth/login", Some(credentials), AuthScope::Login)
            .await?;
        tracing::info!(email = %credentials.email, "Signed in");
        Ok(self.store_tokens(response, None))
    }

    /// `POST /auth/refresh` with the `refreshtoken` and `client` headers.
    ///
    /// Keeps the current refresh token when the backend does not rotate it.
    pub async fn refresh_session(&self) -> Result<SessionInfo, ApiError> {
        let current = self.tokens();
        let Some(refresh_token) = current.refresh_token else {
            return Err(ApiError::MissingCredential("refresh token"));
        };

        let response: TokenResponse = self
            .send::<(), _>(Method::POST, "/auth/refresh", None, AuthScope::Refresh)
            .await?;
        tracing::info!("Session refreshed");
        Ok(self.store_tokens(response, Some(refresh_token.expose().to_string())))
    }

    fn store_tokens(
        &self,
        response: TokenResponse,
        fallback_refresh: Option<String>,
    ) -> SessionInfo {
        self.set_tokens(SessionTokens::new(
            Some(response.access_token),
            response.refresh_token.or(fallback_refresh),
        ));
        SessionInfo {
            user: response.user,
        }
    }
}
