//! Configuration: file format, loading and credentials.

mod auth;
mod credentials;
mod loader;
mod types;

pub use auth::{build_auth_headers, AuthHeader, AuthScope, CLIENT_HEADER, REFRESH_TOKEN_HEADER};
pub use credentials::{SecureString, SessionTokens};
pub use loader::ConfigError;
pub use types::{ApiConfig, AuthConfig, Config, ListingConfig, StoreConfig};
