use std::fmt::Write;

use crate::config::SearchLinks;
use crate::controller::{GenerationAttempt, Status};
use crate::model::Recipe;

pub const INPUT_PROMPT: &str = "냉장고에 어떤 재료가 있나요?";
pub const INPUT_EXAMPLE: &str = "예: 돼지고기, 김치, 양파, 밥, 계란...";

const APP_TITLE: &str = "AI 셰프";
const APP_TAGLINE: &str = "냉장고 속 재료로 만드는 마법 같은 요리";

const PLACEHOLDER_TITLE: &str = "어떤 요리가 탄생할까요?";
const PLACEHOLDER_HINT: &str = "가지고 있는 재료를 알려주시면 AI 셰프가 레시피를 만들어 드려요!";
const PENDING_LINE: &str = "레시피 구상 중...";
const ERROR_TITLE: &str = "오류가 발생했습니다";

/// Title and tagline shown once when the interactive session starts
pub fn render_header() -> String {
    format!("{}\n{}\n", APP_TITLE, APP_TAGLINE)
}

/// Credit line naming the service behind the given provider
pub fn render_footer(provider_name: &str) -> String {
    let service = match provider_name {
        "google" => "Google Gemini",
        "openai" => "OpenAI",
        other => other,
    };
    format!("Powered by {}\n", service)
}

/// Render the current attempt for a terminal
pub fn render_attempt(attempt: &GenerationAttempt, links: &SearchLinks) -> String {
    match (attempt.status, &attempt.recipe) {
        (Status::Pending, _) => format!("{}\n", PENDING_LINE),
        (Status::Error, _) => format!(
            "{}\n{}\n",
            ERROR_TITLE,
            attempt.error_message.as_deref().unwrap_or_default()
        ),
        (Status::Success, Some(recipe)) => render_recipe(recipe, links),
        _ => format!("{}\n{}\n", PLACEHOLDER_TITLE, PLACEHOLDER_HINT),
    }
}

/// Render a recipe with its video link, shop links and numbered steps
pub fn render_recipe(recipe: &Recipe, links: &SearchLinks) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", recipe.recipe_name);
    let _ = writeln!(out, "{}", recipe.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "유튜브로 요리법 보기: {}", recipe.youtube_url);
    let _ = writeln!(out);

    let _ = writeln!(out, "준비 재료");
    for ingredient in &recipe.ingredients {
        let _ = write!(out, "- {} {}", ingredient.item, ingredient.amount);
        if let Some(url) = ingredient.search_url(&links.base_url, &links.query_param) {
            let _ = write!(out, " (구매하기: {})", url);
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "요리 순서");
    for (index, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, step);
    }
    out
}
