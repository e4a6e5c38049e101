//! Client configuration

use std::path::{Path, PathBuf};

/// Client configuration for connecting to the order server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted cart session
    pub session_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            session_dir: PathBuf::from("./.bento"),
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the cart session directory
    pub fn with_session_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.session_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }

    /// Load the persisted cart for this configuration's session directory
    pub fn build_cart(&self) -> super::Cart {
        super::Cart::load(super::SessionStore::new(&self.session_dir))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
