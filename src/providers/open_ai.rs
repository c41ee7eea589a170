use crate::config::ProviderConfig;
use crate::error::{ChefError, GenerationFailure};
use crate::model::Recipe;
use crate::providers::{
    build_user_prompt, generation_failed, http_client, json_recipe_schema, read_json,
    resolve_api_key, RecipeProvider, SYSTEM_INSTRUCTION,
};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = resolve_api_key(config.api_key.as_deref(), &["OPENAI_API_KEY"])?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: http_client(timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: None,
        }
    }

    fn request_body(&self, ingredients_text: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": build_user_prompt(ingredients_text)}
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "recipe",
                    "strict": true,
                    "schema": json_recipe_schema()
                }
            }
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    async fn request_recipe(&self, ingredients_text: &str) -> Result<Recipe, GenerationFailure> {
        let body = self.request_body(ingredients_text);
        debug!("OpenAI request: {}", body);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let response_body = read_json(response).await?;
        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationFailure::MissingText)?;
        Recipe::from_json_text(text)
    }
}

#[async_trait]
impl RecipeProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, ingredients_text: &str) -> Result<Recipe, ChefError> {
        let recipe = self
            .request_recipe(ingredients_text)
            .await
            .map_err(|cause| generation_failed("OpenAI", cause))?;
        info!("Generated recipe '{}' using {}", recipe.recipe_name, self.model);
        Ok(recipe)
    }
}
