use crate::model::{RecipeCollection, RecipeRequest};
use crate::parser::parse_recipes;
use log::{debug, warn};
use serde_json::json;

fn canned(name: &str, ingredients: &[&str], steps: &[&str]) -> serde_json::Value {
    json!({
        "name": name,
        "ingredients": ingredients,
        "steps": steps,
    })
}

/// The built-in recipes, in the same JSON shape the model is asked for
fn fallback_recipes_json() -> String {
    json!({
        "recipes": [
            canned(
                "Scrambled Eggs with Toast",
                &["eggs", "bread", "butter", "salt", "pepper"],
                &[
                    "Crack 2-3 eggs into a bowl and whisk them",
                    "Add a pinch of salt and pepper to the eggs",
                    "Heat a pan over medium heat and add butter",
                    "Pour the eggs into the pan and stir gently",
                    "Toast bread until golden brown",
                    "Serve eggs on top of toast",
                ],
            ),
            canned(
                "Simple Pasta",
                &["pasta", "olive oil", "garlic", "salt", "parmesan"],
                &[
                    "Bring a large pot of water to boil",
                    "Add salt to the water",
                    "Cook pasta according to package instructions",
                    "While pasta cooks, mince garlic",
                    "Heat olive oil in a pan and sauté garlic",
                    "Drain pasta and mix with garlic oil",
                    "Top with grated parmesan cheese",
                ],
            ),
            canned(
                "Grilled Cheese Sandwich",
                &["bread", "cheese", "butter"],
                &[
                    "Butter one side of each bread slice",
                    "Place cheese between the unbuttered sides",
                    "Heat a pan over medium heat",
                    "Place sandwich in pan and cook until golden",
                    "Flip and cook the other side",
                    "Cut diagonally and serve hot",
                ],
            ),
        ]
    })
    .to_string()
}

/// Every built-in recipe with ids assigned
fn fallback_recipes() -> RecipeCollection {
    match parse_recipes(&fallback_recipes_json()) {
        Ok(collection) => collection,
        Err(e) => {
            warn!("Built-in recipes failed to parse: {}", e);
            RecipeCollection::default()
        }
    }
}

/// Built-in recipes sharing at least one ingredient with the request.
///
/// Names match when either one contains the other, so "garlic cloves"
/// matches "garlic" and "egg" matches "eggs". The result may be empty.
pub fn fallback_recipes_for(request: &RecipeRequest) -> RecipeCollection {
    let wanted = request.ingredient_list();
    let recipes = fallback_recipes()
        .recipes
        .into_iter()
        .filter(|recipe| {
            recipe.ingredients.iter().any(|ingredient| {
                let ingredient = ingredient.to_lowercase();
                wanted
                    .iter()
                    .any(|item| item.contains(&ingredient) || ingredient.contains(item.as_str()))
            })
        })
        .collect::<Vec<_>>();

    debug!("{} built-in recipes match the request", recipes.len());
    RecipeCollection::new(recipes)
}
