/// The system instruction sent with every recipe request.
///
/// Casts the model as a chef answering in Korean with a structured recipe and
/// a matching YouTube link. Loaded from `prompt.txt` at compile time.
pub const SYSTEM_INSTRUCTION: &str = include_str!("prompt.txt");

/// Build the user message for a list of ingredients.
///
/// The ingredient text is embedded verbatim.
pub fn build_user_prompt(ingredients_text: &str) -> String {
    format!(
        "I have the following ingredients: {}. Please create a unique recipe using them. \
         Feel free to add 1-3 common pantry staples if needed. \
         Also, find a suitable YouTube video link that shows how to cook a similar dish. \
         Provide the output in a structured JSON format.",
        ingredients_text
    )
}
