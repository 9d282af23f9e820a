pub mod assistant;
pub mod builder;
pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod safety;
pub mod units;
pub mod walkthrough;

pub use assistant::RecipeAssistant;
pub use builder::{RecipeSuggester, RecipeSuggesterBuilder};
pub use config::{AssistantConfig, FailurePolicy};
pub use error::{CookAlongError, ParseStage, TransportError};
pub use model::{Difficulty, Recipe, RecipeCollection, RecipeRequest};
pub use units::{convert, Unit, UnitCategory};
pub use walkthrough::{Rating, Session, ViewState};

/// Suggest recipes for a comma-separated ingredient list using
/// `cook-along.toml` and the environment for configuration
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), cook_along::CookAlongError> {
/// let recipes = cook_along::suggest_recipes("eggs, bread, butter").await?;
/// for recipe in recipes.iter() {
///     println!("{}", recipe.summary());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn suggest_recipes(ingredients: &str) -> Result<RecipeCollection, CookAlongError> {
    RecipeSuggester::builder()
        .ingredients(ingredients)
        .build()
        .await
}

/// Ask for a more detailed method for one recipe
pub async fn detailed_steps(recipe: &Recipe) -> Result<Vec<String>, CookAlongError> {
    let config = AssistantConfig::load()?;
    let assistant = RecipeAssistant::from_config(&config)?;
    assistant.detailed_steps(recipe).await
}
