use crate::config::{ChefConfig, ProviderConfig};
use crate::error::ChefError;
use crate::providers::{GoogleProvider, OpenAIProvider, RecipeProvider};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn RecipeProvider>, ChefError> {
        if !config.enabled {
            return Err(ChefError::Configuration(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            _ => Err(ChefError::Configuration(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &ChefConfig) -> Result<Box<dyn RecipeProvider>, ChefError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            ChefError::Configuration(format!(
                "Default provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        Self::create(
            provider_name,
            provider_config,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
