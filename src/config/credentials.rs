//! Session credential handling.
//!
//! Tokens are wrapped in [`SecureString`] as soon as they leave the config
//! file or a login response, so they never end up in logs by accident.

use super::types::AuthConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Bearer and refresh tokens of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: Option<SecureString>,
    pub refresh_token: Option<SecureString>,
}

impl SessionTokens {
    /// Build tokens from raw strings. Empty or blank values count as missing.
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: non_blank(access_token),
            refresh_token: non_blank(refresh_token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<SecureString> {
    value
        .filter(|token| !token.trim().is_empty())
        .map(SecureString::new)
}

impl AuthConfig {
    /// Resolve the configured tokens.
    pub fn session_tokens(&self) -> SessionTokens {
        SessionTokens::new(self.access_token.clone(), self.refresh_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_string_never_prints_its_value() {
        let secret = SecureString::new("token-123".to_string());
        assert!(!format!("{:?}", secret).contains("token-123"));
        assert!(!format!("{}", secret).contains("token-123"));
        assert_eq!(secret.expose(), "token-123");
    }

    #[test]
    fn blank_tokens_are_missing() {
        let auth = AuthConfig {
            access_token: Some("   ".to_string()),
            refresh_token: Some("refresh".to_string()),
        };
        let tokens = auth.session_tokens();
        assert!(tokens.access_token.is_none());
        assert!(!tokens.is_authenticated());
        assert_eq!(
            tokens.refresh_token.as_ref().map(SecureString::expose),
            Some("refresh")
        );
    }

    #[test]
    fn auth_config_debug_is_masked() {
        let auth = AuthConfig {
            access_token: Some("abc".to_string()),
            refresh_token: None,
        };
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("abc"));
        assert!(rendered.contains("••••••••"));
    }
}
