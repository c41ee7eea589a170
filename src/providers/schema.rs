use serde_json::{json, Value};

/// Names of the fields every recipe response must carry
pub const RECIPE_FIELDS: [&str; 5] = [
    "recipe_name",
    "description",
    "ingredients",
    "instructions",
    "youtube_url",
];

/// Recipe schema in the Gemini `responseSchema` dialect (OpenAPI subset, upper-case types)
pub fn gemini_recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipe_name": {
                "type": "STRING",
                "description": "A creative and appealing name for the dish in Korean."
            },
            "description": {
                "type": "STRING",
                "description": "A short, enticing description of the dish in Korean (within 2-3 sentences)."
            },
            "ingredients": {
                "type": "ARRAY",
                "description": "A list of all ingredients needed for the recipe.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "item": {
                            "type": "STRING",
                            "description": "The name of the ingredient in Korean."
                        },
                        "amount": {
                            "type": "STRING",
                            "description": "The quantity or measurement of the ingredient in Korean (e.g., '1개', '200g', '3큰술')."
                        }
                    },
                    "required": ["item", "amount"]
                }
            },
            "instructions": {
                "type": "ARRAY",
                "description": "Step-by-step cooking instructions in Korean.",
                "items": { "type": "STRING" }
            },
            "youtube_url": {
                "type": "STRING",
                "description": "A relevant YouTube URL for a video tutorial of a similar recipe. The URL must be a valid and publicly accessible YouTube link."
            }
        },
        "required": RECIPE_FIELDS
    })
}

/// Recipe schema as strict JSON Schema, for OpenAI `json_schema` response formats
pub fn json_recipe_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recipe_name": {
                "type": "string",
                "description": "A creative and appealing name for the dish in Korean."
            },
            "description": {
                "type": "string",
                "description": "A short, enticing description of the dish in Korean (within 2-3 sentences)."
            },
            "ingredients": {
                "type": "array",
                "description": "A list of all ingredients needed for the recipe.",
                "items": {
                    "type": "object",
                    "properties": {
                        "item": { "type": "string" },
                        "amount": { "type": "string" }
                    },
                    "required": ["item", "amount"],
                    "additionalProperties": false
                }
            },
            "instructions": {
                "type": "array",
                "description": "Step-by-step cooking instructions in Korean.",
                "items": { "type": "string" }
            },
            "youtube_url": {
                "type": "string",
                "description": "A relevant YouTube URL for a video tutorial of a similar recipe."
            }
        },
        "required": RECIPE_FIELDS,
        "additionalProperties": false
    })
}
