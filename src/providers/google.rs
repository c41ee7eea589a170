use crate::config::ProviderConfig;
use crate::error::{ChefError, GenerationFailure};
use crate::model::Recipe;
use crate::providers::{
    build_user_prompt, gemini_recipe_schema, generation_failed, http_client, read_json,
    resolve_api_key, RecipeProvider, SYSTEM_INSTRUCTION,
};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variables
        let api_key = resolve_api_key(
            config.api_key.as_deref(),
            &["API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"],
        )?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GoogleProvider {
            client: http_client(timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: None,
        }
    }

    fn request_body(&self, ingredients_text: &str) -> Value {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": gemini_recipe_schema()
        });
        if let Some(temperature) = self.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        json!({
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_user_prompt(ingredients_text) }]
            }],
            "generationConfig": generation_config
        })
    }

    async fn request_recipe(&self, ingredients_text: &str) -> Result<Recipe, GenerationFailure> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = self.request_body(ingredients_text);
        debug!("Gemini request: {}", body);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response_body = read_json(response).await?;
        let text = extract_text(&response_body).ok_or(GenerationFailure::MissingText)?;
        Recipe::from_json_text(&text)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response_body: &Value) -> Option<String> {
    let parts = response_body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl RecipeProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, ingredients_text: &str) -> Result<Recipe, ChefError> {
        let recipe = self
            .request_recipe(ingredients_text)
            .await
            .map_err(|cause| generation_failed("Gemini", cause))?;
        info!("Generated recipe '{}' using {}", recipe.recipe_name, self.model);
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn gemini_reply(text: &str) -> String {
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    fn provider(server: &Server) -> GoogleProvider {
        GoogleProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gemini-2.5-flash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let recipe_json = r#"
            {"recipe_name":"김치찌개","description":"얼큰한 찌개","ingredients":[{"item":"돼지고기","amount":"200g"}],"instructions":["고기를 볶는다"],"youtube_url":"https://youtube.com/watch?v=abc"}
        "#;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "fake_api_key")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("돼지고기, 김치, 양파".to_string()),
                Matcher::PartialJson(json!({
                    "generationConfig": {
                        "responseMimeType": "application/json",
                        "responseSchema": { "required": crate::providers::RECIPE_FIELDS }
                    }
                })),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gemini_reply(recipe_json))
            .expect(1)
            .create_async()
            .await;

        let recipe = provider(&server)
            .generate("돼지고기, 김치, 양파")
            .await
            .unwrap();
        assert_eq!(recipe.recipe_name, "김치찌개");
        assert_eq!(recipe.ingredients[0].amount, "200g");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_sends_system_instruction() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::PartialJson(json!({
                "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] }
            })))
            .with_status(200)
            .with_body(gemini_reply("not json"))
            .create_async()
            .await;

        let _ = provider(&server).generate("두부").await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_joins_text_parts() {
        let mut server = Server::new_async().await;
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "{\"recipe_name\":\"계란말이\",\"description\":\"부드러운 반찬\"," },
                        { "text": "\"ingredients\":[],\"instructions\":[\"말아준다\"],\"youtube_url\":\"\"}" }
                    ]
                }
            }]
        });
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let recipe = provider(&server).generate("계란").await.unwrap();
        assert_eq!(recipe.recipe_name, "계란말이");
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .expect(1)
            .create_async()
            .await;

        let result = provider(&server).generate("양파").await;
        match result {
            Err(ChefError::Generation(GenerationFailure::Status { status, body })) => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("Expected status failure, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_malformed_payload() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(gemini_reply(r#"{"recipe_name": "김치"#))
            .create_async()
            .await;

        let result = provider(&server).generate("김치").await;
        assert!(matches!(
            result,
            Err(ChefError::Generation(GenerationFailure::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_generate_without_candidates() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let result = provider(&server).generate("김치").await;
        assert!(matches!(
            result,
            Err(ChefError::Generation(GenerationFailure::MissingText))
        ));
    }

    #[test]
    fn test_request_body_includes_temperature() {
        let mut config = ProviderConfig::for_model("gemini-2.5-flash");
        config.api_key = Some("test-key".to_string());
        config.temperature = Some(0.5);
        let provider = GoogleProvider::new(&config, None).unwrap();

        let body = provider.request_body("감자");
        assert_eq!(body["generationConfig"]["temperature"], json!(0.5f32));
        assert_eq!(body["contents"][0]["role"], "user");
    }

    #[test]
    fn test_provider_name() {
        let mut config = ProviderConfig::for_model("gemini-2.5-flash");
        config.api_key = Some("test-key".to_string());
        let provider = GoogleProvider::new(&config, None).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }
}
