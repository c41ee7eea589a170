use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::GenerationFailure;

/// One required component of a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
}

impl Ingredient {
    /// Link that searches a shop for this ingredient by name.
    ///
    /// Spaces are encoded as `%20` rather than `+`. Returns `None` when
    /// `base_url` is not a valid absolute URL.
    pub fn search_url(&self, base_url: &str, query_param: &str) -> Option<String> {
        let mut url = Url::parse(base_url).ok()?;
        url.query_pairs_mut().append_pair(query_param, &self.item);
        // Form encoding escapes a literal '+' as %2B, so any '+' left is a space
        let query = url.query().map(|q| q.replace('+', "%20"));
        url.set_query(query.as_deref());
        Some(url.to_string())
    }
}

/// A generated dish: name, description, ingredients, ordered steps and a video link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    /// Cooking steps, in order
    pub instructions: Vec<String>,
    /// Passed through as returned by the service, never checked for reachability
    pub youtube_url: String,
}

impl Recipe {
    /// Parse the text payload returned by the service.
    ///
    /// Leading and trailing whitespace is ignored, as is a Markdown code fence
    /// wrapped around the JSON.
    pub fn from_json_text(text: &str) -> Result<Self, GenerationFailure> {
        let json_text = strip_code_fence(text.trim());
        let recipe: Recipe = serde_json::from_str(json_text)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Shape check applied after deserialization
    pub fn validate(&self) -> Result<(), GenerationFailure> {
        if self.recipe_name.trim().is_empty() {
            return Err(GenerationFailure::InvalidShape(
                "recipe_name is blank".to_string(),
            ));
        }
        if self.instructions.is_empty() {
            return Err(GenerationFailure::InvalidShape(
                "instructions are empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Language tag, in any case: json, JSON, ...
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
