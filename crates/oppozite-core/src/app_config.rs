use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shopify_store_domain: String,
    pub shopify_storefront_token: String,
    pub shopify_api_version: String,
    pub site_url: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub seo_trace_enabled: bool,
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Storefront GraphQL endpoint for the configured store and API version.
    #[must_use]
    pub fn storefront_url(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.shopify_store_domain, self.shopify_api_version
        )
    }

    /// Social-preview image used when the entity has none.
    #[must_use]
    pub fn default_image_url(&self) -> String {
        format!("{}/og-image.png", self.site_url)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shopify_store_domain", &self.shopify_store_domain)
            .field(
                "shopify_storefront_token",
                &if self.shopify_storefront_token.is_empty() {
                    "[unset]"
                } else {
                    "[redacted]"
                },
            )
            .field("shopify_api_version", &self.shopify_api_version)
            .field("site_url", &self.site_url)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("seo_trace_enabled", &self.seo_trace_enabled)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
