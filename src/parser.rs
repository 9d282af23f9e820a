use crate::error::{CookAlongError, ParseStage};
use crate::model::{Difficulty, Recipe, RecipeCollection};
use log::{debug, warn};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::OnceLock;

fn object_block() -> Option<&'static Regex> {
    static BLOCK: OnceLock<Option<Regex>> = OnceLock::new();
    BLOCK.get_or_init(|| Regex::new(r"(?s)\{.*\}").ok()).as_ref()
}

fn array_block() -> Option<&'static Regex> {
    static BLOCK: OnceLock<Option<Regex>> = OnceLock::new();
    BLOCK.get_or_init(|| Regex::new(r"(?s)\[.*\]").ok()).as_ref()
}

/// Parse the widest delimited block, or the whole text when there is none.
fn extract_json(raw: &str, block: Option<&Regex>) -> Result<Value, CookAlongError> {
    match block.and_then(|re| re.find(raw)) {
        Some(found) => serde_json::from_str(found.as_str())
            .map_err(|e| CookAlongError::format(ParseStage::EmbeddedBlock, e)),
        None => serde_json::from_str(raw.trim())
            .map_err(|e| CookAlongError::format(ParseStage::WholeText, e)),
    }
}

/// Parse a recipe suggestion response.
///
/// An empty `recipes` list is not an error here; the walkthrough decides what
/// to do with it.
pub fn parse_recipes(raw: &str) -> Result<RecipeCollection, CookAlongError> {
    let value = extract_json(raw, object_block())?;

    let entries = value
        .get("recipes")
        .ok_or_else(|| CookAlongError::Schema("response has no \"recipes\" field".to_string()))?
        .as_array()
        .ok_or_else(|| CookAlongError::Schema("\"recipes\" is not a list".to_string()))?;

    let mut recipes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let fields = entry.as_object().ok_or_else(|| {
            CookAlongError::Schema(format!("recipe {} is not an object", index + 1))
        })?;
        let recipe = recipe_from_fields(fields)
            .map_err(|e| CookAlongError::Schema(format!("recipe {}: {}", index + 1, e)))?;

        if recipe.steps.is_empty() {
            warn!("Dropping recipe '{}' because it has no steps", recipe.name);
            continue;
        }
        recipes.push((fields.get("id").and_then(Value::as_u64), recipe));
    }

    let collection = RecipeCollection::new(assign_ids(recipes));
    debug!("Parsed {} recipes", collection.len());
    Ok(collection)
}

/// Parse a detailed-steps response: a JSON array of strings.
pub fn parse_steps(raw: &str) -> Result<Vec<String>, CookAlongError> {
    let value = extract_json(raw, array_block())?;
    let items = value
        .as_array()
        .ok_or_else(|| CookAlongError::Schema("steps response is not a list".to_string()))?;
    Ok(string_list(items))
}

fn recipe_from_fields(fields: &Map<String, Value>) -> Result<Recipe, String> {
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or("missing name")?
        .to_string();

    Ok(Recipe {
        id: 0,
        name,
        description: optional_text(fields.get("description")),
        cooking_time: cooking_time(fields.get("cookingTime")),
        difficulty: fields
            .get("difficulty")
            .and_then(Value::as_str)
            .map(Difficulty::from_label)
            .unwrap_or_default(),
        ingredients: text_list(fields.get("ingredients")),
        missing_ingredients: text_list(fields.get("missingIngredients")),
        steps: text_list(fields.get("steps")),
        tips: match fields.get("tips") {
            Some(Value::Array(items)) => {
                Some(string_list(items).join(" ")).filter(|t| !t.is_empty())
            }
            other => optional_text(other),
        },
        is_regional_bonus: fields
            .get("isIndianaRecipe")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

/// Models sometimes answer with a bare number of minutes.
fn cooking_time(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Number(minutes)) => Some(format!("{} minutes", minutes)),
        other => optional_text(other),
    }
}

/// Arrays keep their string entries; a single string is split into lines.
fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => string_list(items),
        Some(Value::String(text)) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn string_list(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Keep positive, unique ids from the model and number the rest from 1.
fn assign_ids(recipes: Vec<(Option<u64>, Recipe)>) -> Vec<Recipe> {
    let mut used = HashSet::new();
    let mut pending = Vec::with_capacity(recipes.len());

    for (requested, recipe) in recipes {
        let id = requested
            .and_then(|id| u32::try_from(id).ok())
            .filter(|id| *id > 0 && used.insert(*id));
        pending.push((id, recipe));
    }

    let mut next = 1;
    pending
        .into_iter()
        .map(|(id, mut recipe)| {
            recipe.id = match id {
                Some(id) => id,
                None => {
                    while used.contains(&next) {
                        next += 1;
                    }
                    used.insert(next);
                    next
                }
            };
            recipe
        })
        .collect()
}
