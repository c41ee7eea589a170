mod factory;
mod google;
mod open_ai;
mod prompt;
mod schema;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_prompt, SYSTEM_INSTRUCTION};
pub use schema::{gemini_recipe_schema, json_recipe_schema, RECIPE_FIELDS};

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::error::{ChefError, GenerationFailure};
use crate::model::Recipe;

/// Unified trait for every recipe-generating service
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Generate a recipe from free-text ingredients.
    ///
    /// Issues exactly one request to the service; there is no retry.
    async fn generate(&self, ingredients_text: &str) -> Result<Recipe, ChefError>;
}

/// Pick the API key from config, then from the first set environment variable
pub(crate) fn resolve_api_key(
    configured: Option<&str>,
    env_vars: &[&str],
) -> Result<String, ChefError> {
    configured
        .map(str::to_string)
        .or_else(|| env_vars.iter().find_map(|name| std::env::var(name).ok()))
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            ChefError::Configuration(format!(
                "{} not found in config or environment",
                env_vars.join(" / ")
            ))
        })
}

pub(crate) fn http_client(timeout: Option<Duration>) -> Result<Client, ChefError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ChefError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Read a JSON body, turning non-success statuses into failures
pub(crate) async fn read_json(response: Response) -> Result<Value, GenerationFailure> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationFailure::Status { status, body });
    }
    let body: Value = response.json().await?;
    debug!("{:?}", body);
    Ok(body)
}

/// Log the underlying cause and wrap it in the user-facing error
pub(crate) fn generation_failed(provider: &str, cause: GenerationFailure) -> ChefError {
    error!("Error calling {} API: {}", provider, cause);
    ChefError::Generation(cause)
}
