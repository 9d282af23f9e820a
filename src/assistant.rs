use crate::config::{AssistantConfig, FailurePolicy, PromptConfig};
use crate::error::TransportError;
use crate::fallback::fallback_recipes_for;
use crate::model::{Recipe, RecipeCollection, RecipeRequest};
use crate::parser::{parse_recipes, parse_steps};
use crate::prompt::{build_recipe_prompt, build_steps_prompt};
use crate::providers::{ChatProvider, ProviderFactory};
use crate::CookAlongError;
use log::{info, warn};
use std::time::Duration;
use tokio::time::timeout;

/// Turns recipe requests into parsed recipes through a chat provider.
pub struct RecipeAssistant {
    provider: Box<dyn ChatProvider>,
    policy: FailurePolicy,
    prompt: PromptConfig,
    timeout: Duration,
}

impl RecipeAssistant {
    pub fn new(provider: Box<dyn ChatProvider>, config: &AssistantConfig) -> Self {
        RecipeAssistant {
            provider,
            policy: config.fallback.policy,
            prompt: config.prompt.clone(),
            timeout: config.timeout(),
        }
    }

    /// Build the provider described by the configuration
    pub fn from_config(config: &AssistantConfig) -> Result<Self, CookAlongError> {
        Ok(Self::new(ProviderFactory::create(config)?, config))
    }

    async fn complete(&self, prompt: &str) -> Result<String, CookAlongError> {
        timeout(self.timeout, self.provider.complete(prompt))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))?
    }

    /// Ask for recipes matching the request.
    ///
    /// Blank ingredients are rejected before anything is sent. Under the
    /// fallback policy any later failure resolves to the built-in recipes
    /// that share an ingredient with the request, which may be none.
    pub async fn suggest(
        &self,
        request: &RecipeRequest,
    ) -> Result<RecipeCollection, CookAlongError> {
        request.validate()?;

        let prompt = build_recipe_prompt(request, &self.prompt);
        info!(
            "Requesting recipes from {} for: {}",
            self.provider.provider_name(),
            request.ingredients.trim()
        );

        let result = match self.complete(&prompt).await {
            Ok(raw) => parse_recipes(&raw),
            Err(e) => Err(e),
        };

        match result {
            Ok(recipes) => {
                info!("Received {} recipes", recipes.len());
                Ok(recipes)
            }
            Err(e) if self.policy == FailurePolicy::Fallback => {
                warn!("Falling back to built-in recipes: {}", e);
                Ok(fallback_recipes_for(request))
            }
            Err(e) => Err(e),
        }
    }

    /// Ask for a more detailed method for one recipe.
    ///
    /// Under the fallback policy a failure keeps the recipe's own steps.
    pub async fn detailed_steps(&self, recipe: &Recipe) -> Result<Vec<String>, CookAlongError> {
        let prompt = build_steps_prompt(recipe);

        let result = match self.complete(&prompt).await {
            Ok(raw) => parse_steps(&raw),
            Err(e) => Err(e),
        };

        match result {
            Ok(steps) if !steps.is_empty() => Ok(steps),
            Ok(_) if self.policy == FailurePolicy::Fallback => Ok(recipe.steps.clone()),
            Ok(_) => Err(CookAlongError::Schema(
                "steps response contained no steps".to_string(),
            )),
            Err(e) if self.policy == FailurePolicy::Fallback => {
                warn!("Keeping original steps for '{}': {}", recipe.name, e);
                Ok(recipe.steps.clone())
            }
            Err(e) => Err(e),
        }
    }
}
