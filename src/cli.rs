use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::calories::{ActivityLevel, Gender};
use crate::menu::{BudgetTier, MealType, Season, Weekday};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Model identifier, overrides LLM_MODEL
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature, overrides LLM_TEMPERATURE
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Maximum tokens in the reply, overrides the per-flow default
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate daily calories and ask for matching recipes
    Recipe(RecipeArgs),
    /// Plan a weekly menu and shopping list
    Menu(MenuArgs),
}

#[derive(Args, Debug)]
pub struct RecipeArgs {
    #[arg(long, value_enum)]
    pub gender: Gender,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub age: u32,

    /// Weight in kg
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
    pub weight: u32,

    /// Height in cm
    #[arg(long, value_parser = clap::value_parser!(u32).range(100..=220))]
    pub height: u32,

    #[arg(long, value_enum)]
    pub activity: ActivityLevel,

    /// Ingredients you already have at home
    #[arg(long)]
    pub ingredients: Option<String>,

    /// File whose text replaces the default recipe instruction
    #[arg(long)]
    pub template: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MenuArgs {
    #[arg(long, value_enum, value_delimiter = ',', required = true)]
    pub days: Vec<Weekday>,

    #[arg(long, value_enum, value_delimiter = ',', default_values = ["lunch", "dinner"])]
    pub meals: Vec<MealType>,

    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub people: u32,

    #[arg(long, value_enum, default_value = "regular")]
    pub budget: BudgetTier,

    /// Items bought every week, comma separated
    #[arg(long, default_value = "")]
    pub always_buy: String,

    /// Allow the same dish on two consecutive days for the same meal
    #[arg(long)]
    pub multiday: bool,

    /// Last week's menu CSV; dishes in its Dish column are excluded
    #[arg(long)]
    pub previous_week: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub season: Season,

    /// Feedback applied after the first menu, one refinement per occurrence
    #[arg(long)]
    pub feedback: Vec<String>,

    /// Read further feedback lines from stdin until an empty line
    #[arg(long)]
    pub interactive: bool,

    /// Keep superseded menus instead of overwriting them
    #[arg(long)]
    pub keep_history: bool,

    /// Directory for menu.csv and shopping_list.csv
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
