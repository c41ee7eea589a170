//! Generate a recipe from the ingredients you have on hand.
//!
//! A [`RecipeProvider`] sends the ingredient text to a hosted generative-AI
//! service together with a fixed prompt and a response schema, then parses
//! the JSON reply into a [`Recipe`]. A [`RecipeController`] tracks one
//! generation attempt at a time for a presentation layer.

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod providers;
pub mod render;

pub use builder::{Provider, RecipeChef, RecipeChefBuilder};
pub use config::{ChefConfig, ProviderConfig, SearchLinks};
pub use controller::{GenerationAttempt, RecipeController, StartOutcome, Status};
pub use error::{ChefError, GenerationFailure};
pub use model::{Ingredient, Recipe};
pub use providers::{ProviderFactory, RecipeProvider};

/// Generate a recipe with the configured default provider.
///
/// Loads configuration from `config.toml` and the environment on each call;
/// use [`RecipeChef::builder`] to keep a provider around instead.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = fridge_chef::generate_recipe("돼지고기, 김치, 양파").await?;
/// println!("{}", recipe.recipe_name);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(ingredients_text: &str) -> Result<Recipe, ChefError> {
    let provider = RecipeChef::builder().build()?;
    provider.generate(ingredients_text).await
}
