use serde::{Deserialize, Serialize};
use std::fmt;

/// How hard a recipe is to cook, as reported by the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Unknown,
}

impl Difficulty {
    /// Case-insensitive parse; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A single suggested recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    /// Marks the regional bonus recipe
    #[serde(default, rename = "isIndianaRecipe")]
    pub is_regional_bonus: bool,
}

impl Recipe {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// One-line summary used in recipe lists
    pub fn summary(&self) -> String {
        let mut summary = format!("{} - {} guided steps", self.name, self.step_count());
        if let Some(time) = &self.cooking_time {
            summary.push_str(&format!(", {}", time));
        }
        if self.difficulty != Difficulty::Unknown {
            summary.push_str(&format!(", {}", self.difficulty));
        }
        if self.is_regional_bonus {
            summary.push_str(" (bonus)");
        }
        summary
    }
}

/// Recipes produced by one generation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeCollection {
    pub recipes: Vec<Recipe>,
}

impl RecipeCollection {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }
}

/// What the user typed on the input screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeRequest {
    pub ingredients: String,
    pub tools: String,
    pub style: String,
}

impl RecipeRequest {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    pub fn with_tools(mut self, tools: impl Into<String>) -> Self {
        self.tools = tools.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Reject blank ingredients before anything is sent
    pub fn validate(&self) -> Result<(), crate::CookAlongError> {
        if self.ingredients.trim().is_empty() {
            return Err(crate::CookAlongError::Validation(
                "Please enter at least one ingredient".to_string(),
            ));
        }
        Ok(())
    }

    /// Lowercased, comma-separated ingredient names
    pub fn ingredient_list(&self) -> Vec<String> {
        self.ingredients
            .split(',')
            .map(|item| item.trim().to_lowercase())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_label() {
        assert_eq!(Difficulty::from_label("Easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label(" MEDIUM "), Difficulty::Medium);
        assert_eq!(Difficulty::from_label("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from_label("expert"), Difficulty::Unknown);
    }

    #[test]
    fn test_ingredient_list() {
        let request = RecipeRequest::new("Eggs, bread ,, Butter ");
        assert_eq!(request.ingredient_list(), vec!["eggs", "bread", "butter"]);
    }

    #[test]
    fn test_validate_rejects_whitespace() {
        assert!(RecipeRequest::new("  \n\t").validate().is_err());
        assert!(RecipeRequest::new("eggs").validate().is_ok());
    }

    #[test]
    fn test_summary() {
        let recipe = Recipe {
            id: 1,
            name: "Pancakes".to_string(),
            cooking_time: Some("20 minutes".to_string()),
            difficulty: Difficulty::Easy,
            steps: vec!["Mix".to_string(), "Fry".to_string()],
            ..Default::default()
        };
        assert_eq!(recipe.summary(), "Pancakes - 2 guided steps, 20 minutes, Easy");
    }

    #[test]
    fn test_serializes_wire_names() {
        let recipe = Recipe {
            id: 7,
            name: "Sugar Cream Pie".to_string(),
            is_regional_bonus: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["isIndianaRecipe"], true);
        assert!(json.get("missingIngredients").is_some());
    }
}
