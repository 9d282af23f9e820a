use crate::assistant::RecipeAssistant;
use crate::model::{Recipe, RecipeCollection, RecipeRequest};
use crate::CookAlongError;
use log::{debug, info};
use std::fmt;
use std::str::FromStr;

/// Message shown when a request succeeds but suggests nothing
pub const NO_RECIPES_MESSAGE: &str = "No recipes found. Try adding more ingredients!";

/// Reaction recorded at the end of a walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Happy,
    Neutral,
    Sad,
}

impl Rating {
    pub fn emoji(&self) -> &'static str {
        match self {
            Rating::Happy => "😋",
            Rating::Neutral => "😐",
            Rating::Sad => "😞",
        }
    }
}

impl FromStr for Rating {
    type Err = CookAlongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" | "😋" => Ok(Rating::Happy),
            "neutral" | "😐" => Ok(Rating::Neutral),
            "sad" | "😞" => Ok(Rating::Sad),
            other => Err(CookAlongError::Validation(format!(
                "Unknown rating '{}', use happy, neutral or sad",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Input {
        error: Option<String>,
    },
    Loading,
    Recipes {
        recipes: RecipeCollection,
    },
    Walkthrough {
        recipes: RecipeCollection,
        recipe_id: u32,
        step: usize,
    },
    Finished {
        recipes: RecipeCollection,
        recipe_id: u32,
        rating: Option<Rating>,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Input { .. } => "input",
            ViewState::Loading => "loading",
            ViewState::Recipes { .. } => "recipes",
            ViewState::Walkthrough { .. } => "walkthrough",
            ViewState::Finished { .. } => "finished",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One user's cooking session
///
/// Transitions asked for from the wrong screen return
/// [`CookAlongError::State`] and change nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    request: RecipeRequest,
    state: ViewState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            request: RecipeRequest::default(),
            state: ViewState::Input { error: None },
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn request(&self) -> &RecipeRequest {
        &self.request
    }

    pub fn set_ingredients(&mut self, ingredients: impl Into<String>) {
        self.request.ingredients = ingredients.into();
    }

    pub fn set_tools(&mut self, tools: impl Into<String>) {
        self.request.tools = tools.into();
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.request.style = style.into();
    }

    /// Error from the last failed submission, if any
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Input { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Recipes currently on screen
    pub fn recipes(&self) -> Option<&RecipeCollection> {
        match &self.state {
            ViewState::Recipes { recipes }
            | ViewState::Walkthrough { recipes, .. }
            | ViewState::Finished { recipes, .. } => Some(recipes),
            _ => None,
        }
    }

    /// The recipe being cooked or just finished
    pub fn current_recipe(&self) -> Option<&Recipe> {
        match &self.state {
            ViewState::Walkthrough {
                recipes, recipe_id, ..
            }
            | ViewState::Finished {
                recipes, recipe_id, ..
            } => recipes.get(*recipe_id),
            _ => None,
        }
    }

    pub fn current_step(&self) -> Option<usize> {
        match &self.state {
            ViewState::Walkthrough { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn current_step_text(&self) -> Option<&str> {
        let step = self.current_step()?;
        self.current_recipe()?.steps.get(step).map(String::as_str)
    }

    /// "Step X of N" for the walkthrough header
    pub fn progress(&self) -> Option<String> {
        let step = self.current_step()?;
        let total = self.current_recipe()?.step_count();
        Some(format!("Step {} of {}", step + 1, total))
    }

    pub fn is_last_step(&self) -> bool {
        match (self.current_step(), self.current_recipe()) {
            (Some(step), Some(recipe)) => step + 1 >= recipe.step_count(),
            _ => false,
        }
    }

    pub fn rating(&self) -> Option<Rating> {
        match &self.state {
            ViewState::Finished { rating, .. } => *rating,
            _ => None,
        }
    }

    fn wrong_state(&self, action: &'static str) -> CookAlongError {
        CookAlongError::State {
            action,
            state: self.state.name(),
        }
    }

    fn transition(&mut self, next: ViewState) {
        debug!("Session {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// input → loading. Returns the request to send.
    ///
    /// Blank ingredients are a validation error and the session stays on
    /// the input screen. A session already loading refuses to submit again.
    pub fn begin_submit(&mut self) -> Result<RecipeRequest, CookAlongError> {
        if !matches!(self.state, ViewState::Input { .. }) {
            return Err(self.wrong_state("submit"));
        }
        self.request.validate()?;
        self.transition(ViewState::Loading);
        Ok(self.request.clone())
    }

    /// loading → recipes on a non-empty list, loading → input otherwise.
    pub fn resolve(
        &mut self,
        outcome: Result<RecipeCollection, CookAlongError>,
    ) -> Result<(), CookAlongError> {
        if self.state != ViewState::Loading {
            return Err(self.wrong_state("receive recipes"));
        }

        let next = match outcome {
            Ok(recipes) if recipes.is_empty() => ViewState::Input {
                error: Some(NO_RECIPES_MESSAGE.to_string()),
            },
            Ok(recipes) => ViewState::Recipes { recipes },
            Err(e) => {
                info!("Recipe generation failed: {}", e);
                ViewState::Input {
                    error: Some(e.user_message()),
                }
            }
        };
        self.transition(next);
        Ok(())
    }

    /// loading → input without waiting for the response
    pub fn cancel(&mut self) -> Result<(), CookAlongError> {
        if self.state != ViewState::Loading {
            return Err(self.wrong_state("cancel"));
        }
        self.transition(ViewState::Input {
            error: Some("Request cancelled.".to_string()),
        });
        Ok(())
    }

    /// Submit the form and wait for the assistant.
    ///
    /// Only validation and state errors are returned; generation failures
    /// land the session back on the input screen with a message.
    pub async fn submit(&mut self, assistant: &RecipeAssistant) -> Result<(), CookAlongError> {
        let request = self.begin_submit()?;
        let outcome = assistant.suggest(&request).await;
        self.resolve(outcome)
    }

    /// recipes → walkthrough at step 0
    pub fn select_recipe(&mut self, recipe_id: u32) -> Result<(), CookAlongError> {
        let ViewState::Recipes { recipes } = &self.state else {
            return Err(self.wrong_state("select a recipe"));
        };
        let recipe = recipes.get(recipe_id).ok_or_else(|| {
            CookAlongError::Validation(format!("No recipe with id {}", recipe_id))
        })?;
        if recipe.steps.is_empty() {
            return Err(CookAlongError::Validation(format!(
                "'{}' has no steps to walk through",
                recipe.name
            )));
        }

        let recipes = recipes.clone();
        self.transition(ViewState::Walkthrough {
            recipes,
            recipe_id,
            step: 0,
        });
        Ok(())
    }

    /// recipes → input, dropping the list
    pub fn start_over(&mut self) -> Result<(), CookAlongError> {
        if !matches!(self.state, ViewState::Recipes { .. }) {
            return Err(self.wrong_state("start over"));
        }
        self.transition(ViewState::Input { error: None });
        Ok(())
    }

    /// Advance one step; from the last step this finishes the walkthrough.
    pub fn next_step(&mut self) -> Result<(), CookAlongError> {
        if self.is_last_step() {
            return self.finish();
        }
        if let ViewState::Walkthrough { step, .. } = &mut self.state {
            *step += 1;
            return Ok(());
        }
        Err(self.wrong_state("go to the next step"))
    }

    pub fn previous_step(&mut self) -> Result<(), CookAlongError> {
        if let ViewState::Walkthrough { step, .. } = &mut self.state {
            *step = step.saturating_sub(1);
            return Ok(());
        }
        Err(self.wrong_state("go to the previous step"))
    }

    /// Jump to a step, clamped to the recipe's last step
    pub fn go_to_step(&mut self, index: usize) -> Result<(), CookAlongError> {
        let last = match self.current_recipe() {
            Some(recipe) if self.current_step().is_some() => recipe.step_count().saturating_sub(1),
            _ => return Err(self.wrong_state("choose a step")),
        };
        if let ViewState::Walkthrough { step, .. } = &mut self.state {
            *step = index.min(last);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CookAlongError> {
        let ViewState::Walkthrough {
            recipes, recipe_id, ..
        } = &self.state
        else {
            return Err(self.wrong_state("finish"));
        };
        let next = ViewState::Finished {
            recipes: recipes.clone(),
            recipe_id: *recipe_id,
            rating: None,
        };
        self.transition(next);
        Ok(())
    }

    /// walkthrough → recipes, clearing the selection
    pub fn back(&mut self) -> Result<(), CookAlongError> {
        let ViewState::Walkthrough { recipes, .. } = &self.state else {
            return Err(self.wrong_state("go back"));
        };
        let next = ViewState::Recipes {
            recipes: recipes.clone(),
        };
        self.transition(next);
        Ok(())
    }

    /// Record (or replace) the reaction to the finished recipe
    pub fn rate(&mut self, reaction: Rating) -> Result<(), CookAlongError> {
        if let ViewState::Finished { rating, .. } = &mut self.state {
            *rating = Some(reaction);
            return Ok(());
        }
        Err(self.wrong_state("rate the recipe"))
    }

    /// finished → input, clearing everything
    pub fn home(&mut self) -> Result<(), CookAlongError> {
        if !matches!(self.state, ViewState::Finished { .. }) {
            return Err(self.wrong_state("go home"));
        }
        self.request = RecipeRequest::default();
        self.transition(ViewState::Input { error: None });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::model::Recipe;

    fn recipe(id: u32, steps: usize) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {}", id),
            steps: (1..=steps).map(|n| format!("Step {}", n)).collect(),
            ..Default::default()
        }
    }

    fn session_with_recipes() -> Session {
        let mut session = Session::new();
        session.set_ingredients("eggs, bread");
        session.begin_submit().unwrap();
        session
            .resolve(Ok(RecipeCollection::new(vec![recipe(1, 3), recipe(2, 1)])))
            .unwrap();
        session
    }

    #[test]
    fn test_blank_ingredients_stay_on_input() {
        let mut session = Session::new();
        session.set_ingredients("   \n");
        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, CookAlongError::Validation(_)));
        assert_eq!(session.state().name(), "input");
    }

    #[test]
    fn test_no_double_submit() {
        let mut session = Session::new();
        session.set_ingredients("rice");
        session.begin_submit().unwrap();
        assert!(matches!(
            session.begin_submit(),
            Err(CookAlongError::State { .. })
        ));
        assert_eq!(*session.state(), ViewState::Loading);
    }

    #[test]
    fn test_success_lands_on_recipes() {
        let session = session_with_recipes();
        assert_eq!(session.state().name(), "recipes");
        assert_eq!(session.recipes().unwrap().len(), 2);
    }

    #[test]
    fn test_failure_returns_to_input_with_message() {
        let mut session = Session::new();
        session.set_ingredients("rice");
        session.begin_submit().unwrap();
        session
            .resolve(Err(TransportError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            }
            .into()))
            .unwrap();
        assert_eq!(session.state().name(), "input");
        assert!(session.error().is_some());
        assert!(session.recipes().is_none());
        assert_eq!(session.request().ingredients, "rice");
    }

    #[test]
    fn test_empty_list_returns_to_input() {
        let mut session = Session::new();
        session.set_ingredients("rice");
        session.begin_submit().unwrap();
        session.resolve(Ok(RecipeCollection::default())).unwrap();
        assert_eq!(session.error(), Some(NO_RECIPES_MESSAGE));
    }

    #[test]
    fn test_cancel() {
        let mut session = Session::new();
        session.set_ingredients("rice");
        assert!(session.cancel().is_err());
        session.begin_submit().unwrap();
        session.cancel().unwrap();
        assert_eq!(session.state().name(), "input");
        assert!(session.resolve(Ok(RecipeCollection::default())).is_err());
    }

    #[test]
    fn test_walkthrough_navigation() {
        let mut session = session_with_recipes();
        session.select_recipe(1).unwrap();
        assert_eq!(session.current_step(), Some(0));
        assert_eq!(session.progress().as_deref(), Some("Step 1 of 3"));

        session.previous_step().unwrap();
        assert_eq!(session.current_step(), Some(0));

        session.next_step().unwrap();
        assert_eq!(session.current_step_text(), Some("Step 2"));

        session.go_to_step(99).unwrap();
        assert_eq!(session.current_step(), Some(2));
        assert!(session.is_last_step());

        session.go_to_step(0).unwrap();
        assert_eq!(session.current_step(), Some(0));
    }

    #[test]
    fn test_next_on_last_step_finishes() {
        let mut session = session_with_recipes();
        session.select_recipe(2).unwrap();
        session.next_step().unwrap();
        assert_eq!(session.state().name(), "finished");
        assert_eq!(session.current_recipe().unwrap().id, 2);
        assert!(session.next_step().is_err());
    }

    #[test]
    fn test_select_unknown_recipe() {
        let mut session = session_with_recipes();
        assert!(matches!(
            session.select_recipe(9),
            Err(CookAlongError::Validation(_))
        ));
        assert_eq!(session.state().name(), "recipes");
    }

    #[test]
    fn test_back_and_reselect_resets_step() {
        let mut session = session_with_recipes();
        session.select_recipe(1).unwrap();
        session.next_step().unwrap();
        session.back().unwrap();
        assert_eq!(session.state().name(), "recipes");
        assert!(session.current_recipe().is_none());

        session.select_recipe(1).unwrap();
        assert_eq!(session.current_step(), Some(0));
    }

    #[test]
    fn test_start_over_clears_recipes() {
        let mut session = session_with_recipes();
        session.start_over().unwrap();
        assert_eq!(*session.state(), ViewState::Input { error: None });
        assert!(session.recipes().is_none());
    }

    #[test]
    fn test_rating_and_home() {
        let mut session = session_with_recipes();
        session.set_tools("wok");
        session.select_recipe(2).unwrap();
        assert!(session.rate(Rating::Happy).is_err());

        session.next_step().unwrap();
        session.rate(Rating::Sad).unwrap();
        session.rate(Rating::Happy).unwrap();
        assert_eq!(session.rating(), Some(Rating::Happy));

        session.home().unwrap();
        assert_eq!(session, Session::new());
        assert_eq!(session.rating(), None);
    }

    #[test]
    fn test_rating_from_str() {
        assert_eq!("Happy".parse::<Rating>().unwrap(), Rating::Happy);
        assert_eq!("😐".parse::<Rating>().unwrap(), Rating::Neutral);
        assert!("meh".parse::<Rating>().is_err());
    }

    #[test]
    fn test_wrong_state_changes_nothing() {
        let mut session = Session::new();
        assert!(session.select_recipe(1).is_err());
        assert!(session.next_step().is_err());
        assert!(session.go_to_step(2).is_err());
        assert!(session.back().is_err());
        assert!(session.home().is_err());
        assert_eq!(session, Session::new());
    }
}
