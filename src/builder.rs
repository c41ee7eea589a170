use std::sync::Arc;
use std::time::Duration;

use crate::config::{ChefConfig, ProviderConfig};
use crate::controller::RecipeController;
use crate::providers::{ProviderFactory, RecipeProvider};
use crate::ChefError;

/// Supported recipe services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    OpenAI,
}

impl Provider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::OpenAI => "openai",
        }
    }
}

/// Builder for a configured recipe provider
///
/// Unset options come from the loaded [`ChefConfig`]; explicit settings win.
#[derive(Debug, Default)]
pub struct RecipeChefBuilder {
    config: Option<ChefConfig>,
    provider: Option<Provider>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RecipeChefBuilder {
    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: ChefConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Select the service
    ///
    /// # Example
    /// ```
    /// use fridge_chef::{Provider, RecipeChef};
    ///
    /// let builder = RecipeChef::builder().provider(Provider::OpenAI);
    /// ```
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key directly instead of relying on environment variables or config files
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name
    ///
    /// # Example
    /// ```
    /// use fridge_chef::RecipeChef;
    ///
    /// let builder = RecipeChef::builder().model("gemini-2.5-pro");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a custom or proxy endpoint
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build the provider
    ///
    /// # Errors
    /// Returns `ChefError` if the configuration cannot be loaded, the provider
    /// is unknown or disabled, or no API key can be found.
    pub fn build(self) -> Result<Box<dyn RecipeProvider>, ChefError> {
        let config = match self.config {
            Some(config) => config,
            None => ChefConfig::load()?,
        };

        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = match config.providers.get(&provider_name) {
            Some(existing) => existing.clone(),
            None if self.api_key.is_some() || self.model.is_some() => {
                ProviderConfig::for_model(default_model_for(&provider_name))
            }
            None => {
                return Err(ChefError::Configuration(format!(
                    "Provider '{}' not found in configuration",
                    provider_name
                )))
            }
        };

        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }
        let timeout = self
            .timeout
            .or(config.timeout_secs.map(Duration::from_secs));

        ProviderFactory::create(&provider_name, &provider_config, timeout)
    }

    /// Build the provider and wrap it in a controller
    pub fn build_controller(self) -> Result<RecipeController, ChefError> {
        let provider: Arc<dyn RecipeProvider> = Arc::from(self.build()?);
        Ok(RecipeController::new(provider))
    }
}

fn default_model_for(provider_name: &str) -> &'static str {
    match provider_name {
        "openai" => "gpt-4.1-mini",
        _ => "gemini-2.5-flash",
    }
}

/// Main entry point for the builder API
pub struct RecipeChef;

impl RecipeChef {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use fridge_chef::RecipeChef;
    ///
    /// let builder = RecipeChef::builder();
    /// ```
    pub fn builder() -> RecipeChefBuilder {
        RecipeChefBuilder::default()
    }
}
