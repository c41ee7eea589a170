use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ChefConfig {
    /// Provider used when none is specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds; unset leaves timeouts to the transport
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Where ingredient "buy" links point
    #[serde(default)]
    pub search: SearchLinks,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash", "gpt-4.1-mini")
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Sampling temperature; the service default applies when unset
    pub temperature: Option<f32>,
}

impl ProviderConfig {
    /// Enabled provider entry for the given model with every optional field unset
    pub fn for_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            api_key: None,
            base_url: None,
            temperature: None,
        }
    }
}

/// URL template for the per-ingredient shop search link
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchLinks {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_query_param")]
    pub query_param: String,
}

impl Default for SearchLinks {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            query_param: default_search_query_param(),
        }
    }
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            timeout_secs: None,
            search: SearchLinks::default(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        ProviderConfig::for_model(default_model()),
    );
    providers
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_search_base_url() -> String {
    "https://www.coupang.com/np/search".to_string()
}

fn default_search_query_param() -> String {
    "q".to_string()
}

impl ChefConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FRIDGE_CHEF__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FRIDGE_CHEF__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ChefConfig::load`] for the source priority.
pub fn load_config() -> Result<ChefConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: FRIDGE_CHEF__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("FRIDGE_CHEF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> ChefConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "google");
        assert_eq!(default_model(), "gemini-2.5-flash");
        assert!(default_enabled());
        assert_eq!(default_search_query_param(), "q");
    }

    #[test]
    fn test_chef_config_default() {
        let config = ChefConfig::default();
        assert_eq!(config.default_provider, "google");
        assert!(config.timeout_secs.is_none());
        let google = config.providers.get("google").unwrap();
        assert!(google.enabled);
        assert_eq!(google.model, "gemini-2.5-flash");
        assert!(google.api_key.is_none());
        assert_eq!(config.search, SearchLinks::default());
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.default_provider, "google");
        assert!(config.providers.contains_key("google"));
        assert_eq!(config.search.base_url, "https://www.coupang.com/np/search");
    }

    #[test]
    fn test_toml_overrides() {
        let config = from_toml(
            r#"
            default_provider = "openai"
            timeout_secs = 20

            [providers.openai]
            model = "gpt-4.1-mini"
            api_key = "test-key"
            temperature = 0.4

            [search]
            base_url = "https://shop.example.com/search"
            query_param = "keyword"
            "#,
        );

        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.timeout_secs, Some(20));
        let openai = config.providers.get("openai").unwrap();
        assert!(openai.enabled);
        assert_eq!(openai.model, "gpt-4.1-mini");
        assert_eq!(openai.api_key.as_deref(), Some("test-key"));
        assert_eq!(openai.temperature, Some(0.4));
        assert_eq!(config.search.query_param, "keyword");
    }

    #[test]
    fn test_provider_config_for_model() {
        let config = ProviderConfig::for_model("gpt-4.1-mini");
        assert!(config.enabled);
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
        assert!(config.temperature.is_none());
    }
}
