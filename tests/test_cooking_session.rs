use cook_along::prompt::DEFAULT_TOOLS;
use cook_along::walkthrough::NO_RECIPES_MESSAGE;
use cook_along::{
    AssistantConfig, CookAlongError, FailurePolicy, Rating, Recipe, RecipeAssistant,
    RecipeRequest, Session, TransportError, ViewState,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::io::Write;
use std::time::Duration;

fn completion_body(content: &str) -> String {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn config_for(server: &ServerGuard, policy: FailurePolicy) -> AssistantConfig {
    let mut config = AssistantConfig::default();
    config.provider.endpoint = format!("{}/v1/chat/completions", server.url());
    config.provider.api_key = Some("test-key".to_string());
    config.fallback.policy = policy;
    config
}

fn assistant_for(server: &ServerGuard, policy: FailurePolicy) -> RecipeAssistant {
    RecipeAssistant::from_config(&config_for(server, policy)).unwrap()
}

const TWO_RECIPES: &str = r#"Sure! Here are some ideas:
```json
{
  "recipes": [
    {
      "id": 1,
      "name": "French Toast",
      "cookingTime": "15 minutes",
      "difficulty": "Easy",
      "ingredients": ["2 eggs", "2 slices bread", "1 tbsp butter"],
      "missingIngredients": ["1/4 cup milk"],
      "steps": ["Whisk 2 eggs with 1/4 cup milk", "Soak bread 10 seconds per side", "Fry in butter 2 minutes per side"]
    },
    {
      "id": 1,
      "name": "Hoosier Egg Sandwich",
      "difficulty": "Easy",
      "ingredients": ["1 egg", "2 slices bread"],
      "steps": ["Fry the egg", "Toast the bread", "Assemble"],
      "isIndianaRecipe": true
    }
  ]
}
```
Enjoy!"#;

#[tokio::test]
async fn test_suggest_and_cook_through_a_recipe() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(regex::escape("eggs, bread, butter")),
            Matcher::Regex(regex::escape(DEFAULT_TOOLS)),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(TWO_RECIPES))
        .expect(1)
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Strict);
    let mut session = Session::new();
    session.set_ingredients("eggs, bread, butter");
    session.set_tools("");
    session.set_style("");

    session.submit(&assistant).await.unwrap();
    mock.assert_async().await;

    let recipes = session.recipes().unwrap();
    assert_eq!(recipes.len(), 2);
    assert!(recipes.iter().all(|recipe| recipe.id > 0));
    let ids: Vec<u32> = recipes.iter().map(|recipe| recipe.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(recipes.get(2).unwrap().is_regional_bonus);

    session.select_recipe(1).unwrap();
    assert_eq!(session.progress().as_deref(), Some("Step 1 of 3"));
    session.next_step().unwrap();
    session.next_step().unwrap();
    assert!(session.is_last_step());
    session.next_step().unwrap();
    assert_eq!(session.state().name(), "finished");

    session.rate(Rating::Happy).unwrap();
    assert_eq!(session.rating(), Some(Rating::Happy));
    session.home().unwrap();
    assert_eq!(*session.state(), ViewState::Input { error: None });
}

#[tokio::test]
async fn test_service_error_returns_to_input_when_strict() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Strict);
    let mut session = Session::new();
    session.set_ingredients("rice");

    session.submit(&assistant).await.unwrap();
    assert_eq!(session.state().name(), "input");
    assert!(session.error().is_some());
    assert!(session.recipes().is_none());
}

#[tokio::test]
async fn test_service_error_uses_builtin_recipes_with_fallback() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Fallback);
    let recipes = assistant
        .suggest(&RecipeRequest::new("pasta, garlic"))
        .await
        .unwrap();

    let names: Vec<&str> = recipes.iter().map(|recipe| recipe.name.as_str()).collect();
    assert_eq!(names, vec!["Simple Pasta"]);
}

#[tokio::test]
async fn test_fallback_without_matching_recipe_asks_for_more_ingredients() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Fallback);
    let mut session = Session::new();
    session.set_ingredients("tofu, kale");
    session.submit(&assistant).await.unwrap();

    assert_eq!(session.state().name(), "input");
    assert_eq!(session.error(), Some(NO_RECIPES_MESSAGE));
}

#[tokio::test]
async fn test_slow_service_reports_timeout() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(3));
            w.write_all(completion_body(r#"{"recipes": []}"#).as_bytes())
        })
        .create_async()
        .await;

    let mut config = config_for(&server, FailurePolicy::Strict);
    config.timeout = 1;
    let assistant = RecipeAssistant::from_config(&config).unwrap();

    let err = assistant
        .suggest(&RecipeRequest::new("eggs"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CookAlongError::Transport(TransportError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_unreadable_reply_is_format_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body("I'm sorry, I can't help with that."))
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Strict);
    let err = assistant
        .suggest(&RecipeRequest::new("eggs"))
        .await
        .unwrap_err();
    assert!(matches!(err, CookAlongError::Format { .. }));
}

#[tokio::test]
async fn test_wrong_shape_is_schema_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(r#"{"recipes": "none today"}"#))
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Strict);
    let err = assistant
        .suggest(&RecipeRequest::new("eggs"))
        .await
        .unwrap_err();
    assert!(matches!(err, CookAlongError::Schema(_)));
}

#[tokio::test]
async fn test_empty_recipe_list_asks_for_more_ingredients() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(r#"{"recipes": []}"#))
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Strict);
    let mut session = Session::new();
    session.set_ingredients("salt");
    session.submit(&assistant).await.unwrap();

    assert_eq!(session.error(), Some(NO_RECIPES_MESSAGE));
}

#[tokio::test]
async fn test_detailed_steps_replace_short_method() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("Grilled Cheese".to_string()))
        .with_status(200)
        .with_body(completion_body(
            r#"["Heat a skillet over medium heat", "Butter 2 slices of bread", "Cook 3 minutes per side"]"#,
        ))
        .create_async()
        .await;

    let assistant = assistant_for(&server, FailurePolicy::Strict);
    let recipe = Recipe {
        id: 1,
        name: "Grilled Cheese".to_string(),
        ingredients: vec!["bread".to_string(), "cheese".to_string()],
        steps: vec!["Make the sandwich".to_string()],
        ..Default::default()
    };

    let steps = assistant.detailed_steps(&recipe).await.unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2], "Cook 3 minutes per side");
    mock.assert_async().await;
}
