use clap::{Args, Parser, Subcommand};
use cook_along::safety::{lookup, SAFETY_TABLE};
use cook_along::units::convert_tags;
use cook_along::{
    AssistantConfig, CookAlongError, FailurePolicy, Rating, Recipe, RecipeAssistant,
    RecipeRequest, Session, ViewState,
};
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(
    name = "cook-along",
    about = "Recipe ideas from the ingredients you have, cooked one step at a time"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Substitute built-in recipes when the recipe service fails
    #[arg(long, global = true)]
    fallback: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Args)]
struct RequestArgs {
    /// Comma-separated ingredients you have on hand
    #[arg(long, short = 'i')]
    ingredients: String,

    /// Kitchen tools you have (defaults to basic kitchen tools)
    #[arg(long, default_value = "")]
    tools: String,

    /// Preferred cuisine or cooking style
    #[arg(long, default_value = "")]
    style: String,
}

impl From<RequestArgs> for RecipeRequest {
    fn from(args: RequestArgs) -> Self {
        RecipeRequest::new(args.ingredients)
            .with_tools(args.tools)
            .with_style(args.style)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Suggest recipes and print them
    Suggest {
        #[command(flatten)]
        request: RequestArgs,

        /// Print the recipes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest recipes, then walk through one step by step
    Cook {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Ask for a more detailed method for a dish
    Steps {
        /// Recipe name
        #[arg(long)]
        name: String,

        /// Comma-separated ingredients used by the recipe
        #[arg(long, short = 'i')]
        ingredients: String,
    },

    /// Convert a cooking measurement
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source unit, e.g. cup, tbsp, oz, f
        from: String,
        /// Target unit
        to: String,
    },

    /// Show safe minimum internal temperatures
    Safety {
        /// Filter by food, e.g. "poultry"
        food: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Suggest { request, json } => {
            let assistant = build_assistant(cli.fallback)?;
            let recipes = assistant.suggest(&request.into()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            } else {
                for recipe in recipes.iter() {
                    print_recipe(recipe);
                }
            }
        }
        Command::Cook { request } => {
            let assistant = build_assistant(cli.fallback)?;
            cook(&assistant, request.into()).await?;
        }
        Command::Steps { name, ingredients } => {
            let assistant = build_assistant(cli.fallback)?;
            let recipe = Recipe {
                name,
                ingredients: RecipeRequest::new(ingredients).ingredient_list(),
                ..Default::default()
            };
            let steps = assistant.detailed_steps(&recipe).await?;
            if steps.is_empty() {
                println!("No steps available for {}", recipe.name);
            }
            for (i, step) in steps.iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
        }
        Command::Convert { amount, from, to } => {
            let value = convert_tags(amount, &from, &to)?;
            println!("{} {} = {} {}", amount, from.trim(), value, to.trim());
        }
        Command::Safety { food } => {
            let entries = match &food {
                Some(query) => lookup(query),
                None => SAFETY_TABLE.iter().collect(),
            };
            if entries.is_empty() {
                println!("No safety entry for '{}'", food.unwrap_or_default());
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
    }

    Ok(())
}

fn build_assistant(fallback: bool) -> Result<RecipeAssistant, CookAlongError> {
    let mut config = AssistantConfig::load()?;
    if fallback {
        config.fallback.policy = FailurePolicy::Fallback;
    }
    debug!("Loaded configuration: {:?}", config);
    RecipeAssistant::from_config(&config)
}

fn print_recipe(recipe: &Recipe) {
    println!("[{}] {}", recipe.id, recipe.summary());
    if let Some(description) = &recipe.description {
        println!("    {}", description);
    }
    if !recipe.missing_ingredients.is_empty() {
        println!("    Missing: {}", recipe.missing_ingredients.join(", "));
    }
}

/// Send the form, returning to the input screen if the user presses Ctrl-C
async fn submit(session: &mut Session, assistant: &RecipeAssistant) -> Result<(), CookAlongError> {
    let request = session.begin_submit()?;
    println!("Finding recipes... (Ctrl-C to cancel)");
    tokio::select! {
        outcome = assistant.suggest(&request) => session.resolve(outcome),
        _ = tokio::signal::ctrl_c() => session.cancel(),
    }
}

async fn cook(
    assistant: &RecipeAssistant,
    request: RecipeRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    session.set_ingredients(request.ingredients);
    session.set_tools(request.tools);
    session.set_style(request.style);

    if let Err(e) = submit(&mut session, assistant).await {
        println!("{}", e.user_message());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        render(&session);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let result = if matches!(session.state(), ViewState::Input { .. }) {
            session.set_ingredients(input);
            submit(&mut session, assistant).await
        } else {
            apply(&mut session, input)
        };
        if let Err(e) = result {
            println!("{}", e.user_message());
        }
    }

    Ok(())
}

/// Apply one typed command to the session
fn apply(session: &mut Session, input: &str) -> Result<(), CookAlongError> {
    let lowered = input.to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    match (words.next(), words.next()) {
        (Some("next" | "n"), None) => session.next_step(),
        (Some("prev" | "p"), None) => session.previous_step(),
        (Some("back" | "b"), None) => session.back(),
        (Some("home"), None) => session.home(),
        (Some("start"), Some("over")) | (Some("new"), None) => session.start_over(),
        (Some("rate"), Some(reaction)) => session.rate(reaction.parse::<Rating>()?),
        (Some("step"), Some(number)) => {
            let number: usize = number.parse().map_err(|_| {
                CookAlongError::Validation(format!("'{}' is not a step number", number))
            })?;
            session.go_to_step(number.saturating_sub(1))
        }
        (Some(id), None) if id.chars().all(|c| c.is_ascii_digit()) => {
            let id: u32 = id.parse().map_err(|_| {
                CookAlongError::Validation(format!("'{}' is not a recipe number", id))
            })?;
            session.select_recipe(id)
        }
        _ => Err(CookAlongError::Validation(format!("Unknown command '{}'", input))),
    }
}

fn render(session: &Session) {
    match session.state() {
        ViewState::Input { error } => {
            if let Some(error) = error {
                println!("{}", error);
            }
            println!("Enter the ingredients you have (comma separated), or 'quit':");
        }
        ViewState::Loading => {}
        ViewState::Recipes { recipes } => {
            println!();
            for recipe in recipes.iter() {
                print_recipe(recipe);
            }
            println!("Pick a recipe by number, 'start over' or 'quit':");
        }
        ViewState::Walkthrough { .. } => {
            if let (Some(recipe), Some(progress), Some(text)) = (
                session.current_recipe(),
                session.progress(),
                session.current_step_text(),
            ) {
                println!();
                println!("{} - {}", recipe.name, progress);
                println!("  {}", text);
            }
            if session.is_last_step() {
                println!("'next' to finish, 'prev', 'step N', 'back' or 'quit':");
            } else {
                println!("'next', 'prev', 'step N', 'back' or 'quit':");
            }
        }
        ViewState::Finished { rating, .. } => {
            if let Some(recipe) = session.current_recipe() {
                println!();
                println!("You finished {}!", recipe.name);
                if let Some(tips) = &recipe.tips {
                    println!("Tip: {}", tips);
                }
            }
            match rating {
                Some(rating) => println!("Thanks for the feedback {}", rating.emoji()),
                None => println!("How did it turn out? 'rate happy', 'rate neutral' or 'rate sad'"),
            }
            println!("'home' to start again or 'quit':");
        }
    }
}
