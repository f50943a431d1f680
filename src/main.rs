use anyhow::{Context, Result};
use meal_assistant::api_connection::{CompletionOutcome, Provider};
use meal_assistant::calories::UserProfile;
use meal_assistant::cli::{parse_args, Command, MenuArgs, RecipeArgs};
use meal_assistant::config::LlmConfig;
use meal_assistant::export::export_parsed_menu;
use meal_assistant::menu::MenuRequest;
use meal_assistant::planner::{refine_menu, request_menu, request_recipe, MenuOutcome, RecipeRequest, Sampling};
use meal_assistant::previous_week::load_or_empty;
use meal_assistant::session::{RefinementPolicy, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_reply(title: &str, reply: &CompletionOutcome) {
    match reply {
        CompletionOutcome::Success { text } => println!("\n{}:\n{}", title, text),
        CompletionOutcome::Failure { kind, message } => {
            eprintln!("\n{} failed ({:?}): {}", title, kind, message)
        }
    }
}

async fn run_recipe(provider: &Provider, config: &LlmConfig, args: RecipeArgs, sampling: Sampling) -> Result<()> {
    let profile = UserProfile::new(args.gender, args.age, args.weight, args.height)?;
    let template = match &args.template {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read recipe template '{}'", path.display()))?,
        ),
        None => None,
    };

    let mut session = Session::default();
    let request = RecipeRequest {
        profile,
        activity: args.activity,
        additional_ingredients: args.ingredients,
        template,
    };
    let outcome = request_recipe(provider, &mut session, &request, sampling).await;

    println!("Your Basal Metabolic Rate is: {:.2} calories/day", outcome.estimate.basal_rate);
    println!("Your Activity Multiplier is: {}", outcome.estimate.multiplier);
    println!(
        "Necessary Calories according to Activeness: {:.2} calories/day",
        outcome.estimate.target_calories
    );
    println!("\nYour Prompt:\n{}", outcome.prompt);
    print_reply(&format!("Generated Recipe ({})", config.model), &outcome.reply);
    Ok(())
}

fn report_menu(outcome: &MenuOutcome, export_dir: Option<&std::path::Path>) -> Result<()> {
    print_reply("Weekly Menu", &outcome.reply);
    if outcome.parsed.is_empty() {
        if outcome.reply.is_success() {
            println!("\n(No structured menu lines found; nothing to export.)");
        }
        return Ok(());
    }

    println!(
        "\nParsed {} meals and {} shopping items.",
        outcome.parsed.entries.len(),
        outcome.parsed.shopping_list.len()
    );
    if let Some(dir) = export_dir {
        for path in export_parsed_menu(dir, &outcome.parsed)? {
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

async fn run_menu(provider: &Provider, args: MenuArgs, sampling: Sampling) -> Result<()> {
    let prior_week_dishes = args
        .previous_week
        .as_deref()
        .map(load_or_empty)
        .unwrap_or_default();

    let request = MenuRequest {
        days: args.days.into_iter().collect(),
        meal_types: args.meals.into_iter().collect(),
        people_count: args.people,
        budget_tier: args.budget,
        recurring_items: args.always_buy,
        multiday_allowed: args.multiday,
        prior_week_dishes,
        season: args.season,
    };

    let policy = if args.keep_history {
        RefinementPolicy::KeepHistory
    } else {
        RefinementPolicy::Overwrite
    };
    let mut session = Session::new(policy);
    let export_dir = args.export_dir.as_deref();

    let outcome = request_menu(provider, &mut session, &request, sampling).await?;
    println!("Your Prompt:\n{}", outcome.prompt);
    report_menu(&outcome, export_dir)?;

    for feedback in &args.feedback {
        apply_feedback(provider, &mut session, feedback, sampling, export_dir).await?;
    }

    if args.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            println!("\nFeedback (empty line to finish):");
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                break;
            }
            apply_feedback(provider, &mut session, &line, sampling, export_dir).await?;
        }
    }

    if !session.menu_history().is_empty() {
        info!(versions = session.menu_history().len(), "kept earlier menu versions");
    }
    session.clear();
    Ok(())
}

async fn apply_feedback(
    provider: &Provider,
    session: &mut Session,
    feedback: &str,
    sampling: Sampling,
    export_dir: Option<&std::path::Path>,
) -> Result<()> {
    if session.current_menu().is_none() {
        eprintln!("No menu to refine; skipping feedback '{}'", feedback);
        return Ok(());
    }
    let outcome = refine_menu(provider, session, feedback, sampling).await?;
    report_menu(&outcome, export_dir)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();
    let mut config = LlmConfig::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
    let provider = Provider::openai(&config);
    info!(model = %config.model, "using chat completion model");

    match cli.command {
        Command::Recipe(args) => {
            let sampling = Sampling {
                max_tokens: cli.max_tokens.unwrap_or(config.recipe_max_tokens),
                temperature: config.temperature,
            };
            run_recipe(&provider, &config, args, sampling).await
        }
        Command::Menu(args) => {
            let sampling = Sampling {
                max_tokens: cli.max_tokens.unwrap_or(config.menu_max_tokens),
                temperature: config.temperature,
            };
            run_menu(&provider, args, sampling).await
        }
    }
}
