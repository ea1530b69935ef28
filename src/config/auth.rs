//! Authentication header building for API requests.
//!
//! Regular endpoints carry the bearer token. Auth endpoints additionally
//! carry the configured client identifier, and the refresh flow sends the
//! refresh token in its own header.

use super::credentials::SessionTokens;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

pub const CLIENT_HEADER: &str = "client";
pub const REFRESH_TOKEN_HEADER: &str = "refreshtoken";

/// Which flavour of request the headers are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScope {
    /// Regular REST call.
    Api,
    /// `/auth/login` and other unauthenticated auth endpoints.
    Login,
    /// `/auth/refresh`.
    Refresh,
}

/// Build the authentication headers for a request.
///
/// Missing tokens simply produce no header; the backend answers 401 and the
/// failure lands in the request tracker like any other rejection.
pub fn build_auth_headers(
    tokens: &SessionTokens,
    client_id: &str,
    scope: AuthScope,
) -> Vec<AuthHeader> {
    let mut headers = Vec::new();

    if scope != AuthScope::Login {
        if let Some(token) = &tokens.access_token {
            headers.push((
                "Authorization".to_string(),
                format!("Bearer {}", token.expose()),
            ));
        }
    }

    if scope == AuthScope::Refresh {
        if let Some(token) = &tokens.refresh_token {
            headers.push((REFRESH_TOKEN_HEADER.to_string(), token.expose().to_string()));
        }
    }

    if scope != AuthScope::Api && !client_id.is_empty() {
        headers.push((CLIENT_HEADER.to_string(), client_id.to_string()));
    }

    headers
}
