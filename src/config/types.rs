use serde::{Deserialize, Serialize};

use crate::list::EndOfData;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// REST backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "https://hr.example.com/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Identifier sent in the `client` header on auth endpoints.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Stored session tokens. Both are optional; `login` fills them at runtime.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |token: &Option<String>| token.as_ref().map(|_| "••••••••");
        f.debug_struct("AuthConfig")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .finish()
    }
}

/// Paginated listing behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items requested per page (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Distance from the bottom that triggers the next page (default: 100).
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold_px: f64,
    /// Search debounce window in milliseconds (default: 400).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How the end of a listing is detected (default: short page).
    #[serde(default)]
    pub end_of_data: EndOfData,
}

/// Store actor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Capacity of the intent channel (default: 64).
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_client_id() -> String {
    "hrms-web".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u32 {
    10
}

fn default_scroll_threshold() -> f64 {
    crate::list::DEFAULT_SCROLL_THRESHOLD_PX
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_channel_capacity() -> usize {
    crate::store::DEFAULT_CHANNEL_CAPACITY
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: default_client_id(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold_px: default_scroll_threshold(),
            debounce_ms: default_debounce_ms(),
            end_of_data: EndOfData::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}
