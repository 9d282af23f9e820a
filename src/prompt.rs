use crate::config::PromptConfig;
use crate::model::{Recipe, RecipeRequest};

/// The system prompt sent ahead of every recipe request.
///
/// Loaded from `system_prompt.txt` at compile time so it can be edited
/// without touching Rust string syntax.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

/// Tools assumed when the user leaves the tools field blank
pub const DEFAULT_TOOLS: &str =
    "Basic kitchen tools (knife, cutting board, stove, oven, basic cookware)";

const MAX_RECIPE_COUNT: u8 = 5;

const RECIPE_SCHEMA: &str = r#"{
  "recipes": [
    {
      "id": 1,
      "name": "Recipe Name",
      "description": "One or two sentences describing the dish",
      "cookingTime": "20 minutes",
      "difficulty": "Easy",
      "ingredients": ["2 large eggs", "1 tbsp butter"],
      "missingIngredients": ["1/4 tsp black pepper"],
      "steps": ["Crack 2 eggs into a bowl", "Whisk for 30 seconds"],
      "tips": "Optional tip for better results",
      "isIndianaRecipe": false
    }
  ]
}"#;

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Build the recipe suggestion prompt for a request.
pub fn build_recipe_prompt(request: &RecipeRequest, options: &PromptConfig) -> String {
    let tools = non_blank(&request.tools).unwrap_or(DEFAULT_TOOLS);
    let count = options.recipe_count.clamp(1, MAX_RECIPE_COUNT);
    let region = non_blank(&options.bonus_region).unwrap_or("Indiana");

    let mut prompt = format!(
        "I have these ingredients: {ingredients}\n\
         I have these kitchen tools: {tools}\n",
        ingredients = request.ingredients.trim(),
    );

    if let Some(style) = non_blank(&request.style) {
        prompt.push_str(&format!("Preferred cooking style or cuisine: {style}\n"));
    }

    prompt.push_str(&format!(
        "\nSuggest {count} recipes I can make mainly with these ingredients and tools. \
         Then add exactly one bonus recipe inspired by {region} cooking, and mark it with \
         \"isIndianaRecipe\": true. Regular recipes must not set that flag.\n\n\
         Requirements:\n\
         - Give every ingredient with a precise numeric measurement (for example \"2 cups\", \
         \"1 tbsp\", \"200 g\").\n\
         - List anything the recipe needs that I did not mention in \"missingIngredients\".\n\
         - Break the method into as many small steps as possible, one action per step, \
         including times and temperatures where they apply.\n\
         - Use \"Easy\", \"Medium\" or \"Hard\" for difficulty.\n\n\
         Return only JSON in exactly this format:\n{RECIPE_SCHEMA}\n"
    ));

    prompt
}

/// Build the prompt asking for a detailed method for one recipe.
pub fn build_steps_prompt(recipe: &Recipe) -> String {
    format!(
        "Provide detailed step-by-step instructions for making {name} using these \
         ingredients: {ingredients}.\n\
         Return the response as a JSON array of steps:\n[\"step1\", \"step2\", \"step3\"]",
        name = recipe.name,
        ingredients = recipe.ingredients.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_is_embedded() {
        assert!(!DEFAULT_SYSTEM_PROMPT.is_empty());
        assert!(DEFAULT_SYSTEM_PROMPT.contains("cooking assistant"));
    }

    #[test]
    fn test_blank_tools_use_default_phrase() {
        let request = RecipeRequest::new("eggs, bread, butter").with_tools("   ");
        let prompt = build_recipe_prompt(&request, &PromptConfig::default());
        assert!(prompt.contains("I have these ingredients: eggs, bread, butter"));
        assert!(prompt.contains(&format!("I have these kitchen tools: {}", DEFAULT_TOOLS)));
    }

    #[test]
    fn test_style_is_omitted_when_blank() {
        let request = RecipeRequest::new("rice");
        let prompt = build_recipe_prompt(&request, &PromptConfig::default());
        assert!(!prompt.contains("cuisine"));

        let prompt = build_recipe_prompt(&request.with_style("Thai"), &PromptConfig::default());
        assert!(prompt.contains("Preferred cooking style or cuisine: Thai"));
    }

    #[test]
    fn test_tools_are_verbatim() {
        let request = RecipeRequest::new("potatoes").with_tools("air fryer, wok");
        let prompt = build_recipe_prompt(&request, &PromptConfig::default());
        assert!(prompt.contains("I have these kitchen tools: air fryer, wok"));
        assert!(!prompt.contains(DEFAULT_TOOLS));
    }

    #[test]
    fn test_prompt_requests_schema_and_bonus() {
        let options = PromptConfig {
            recipe_count: 5,
            bonus_region: "Indiana".to_string(),
        };
        let prompt = build_recipe_prompt(&RecipeRequest::new("corn"), &options);
        assert!(prompt.contains("Suggest 5 recipes"));
        assert!(prompt.contains("inspired by Indiana cooking"));
        for field in [
            "\"recipes\"",
            "\"id\"",
            "\"name\"",
            "\"description\"",
            "\"cookingTime\"",
            "\"difficulty\"",
            "\"ingredients\"",
            "\"missingIngredients\"",
            "\"steps\"",
            "\"tips\"",
            "\"isIndianaRecipe\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_prompt_demands_measurements_and_small_steps() {
        let prompt = build_recipe_prompt(&RecipeRequest::new("flour"), &PromptConfig::default());
        assert!(prompt.contains("precise numeric measurement"));
        assert!(prompt.contains("\"2 cups\""));
        assert!(prompt.contains("as many small steps as possible, one action per step"));
        assert!(prompt.contains("times and temperatures"));
    }

    #[test]
    fn test_recipe_count_is_clamped() {
        let options = PromptConfig {
            recipe_count: 40,
            bonus_region: String::new(),
        };
        let prompt = build_recipe_prompt(&RecipeRequest::new("corn"), &options);
        assert!(prompt.contains("Suggest 5 recipes"));
        assert!(prompt.contains("inspired by Indiana cooking"));
    }

    #[test]
    fn test_steps_prompt() {
        let recipe = Recipe {
            name: "Simple Pasta".to_string(),
            ingredients: vec!["pasta".to_string(), "garlic".to_string()],
            ..Default::default()
        };
        let prompt = build_steps_prompt(&recipe);
        assert!(prompt.contains("making Simple Pasta using these ingredients: pasta, garlic"));
        assert!(prompt.contains("JSON array"));
    }
}
