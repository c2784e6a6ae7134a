//! Configuration for Git forge platform connections.
use secrecy::SecretString;

/// Default page size for paginated pull request and tag queries
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration for authenticating and
/// interacting with forge platforms.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication. `None` means anonymous access.
    pub token: Option<SecretString>,
    /// Explicit API base URL for enterprise or self-hosted instances.
    pub api_url: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: None,
            api_url: None,
        }
    }
}

impl RemoteConfig {
    /// Base URL of the host's web UI (e.g., "https://github.com").
    pub fn link_base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Web URL of the repository; issue and pull request links hang off it.
    pub fn repository_url(&self) -> String {
        format!("{}/{}/{}", self.link_base_url(), self.owner, self.repo)
    }

    /// API base URL, honoring an explicit override.
    pub fn api_base_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}://api.{}", self.scheme, self.host),
        }
    }
}
