use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{Household, MenuRequest, PantryImportance};

/// Pantry-aware meal planner: daily and weekly menus balanced for calories,
/// macros, cooking time and what is already in the pantry.
#[derive(Parser, Debug)]
#[command(name = "menu_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the planner data JSON file.
    #[arg(short, long, global = true, default_value = "planner_data.json")]
    pub file: String,

    /// Optional JSON file overriding planner tuning.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan breakfast, lunch and dinner for one day.
    Daily(PlanArgs),

    /// Plan seven days with anti-repeat and macro balancing.
    Weekly(PlanArgs),

    /// Show the stored shopping list of a saved menu.
    ShoppingList {
        /// Menu id.
        #[arg(long)]
        menu: u32,

        /// Also write the list to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Daily(PlanArgs::default())
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, default_value_t = 1)]
    pub user: u32,

    /// Daily calorie target (defaults to the user's goal, then 2000).
    #[arg(long)]
    pub calories: Option<f64>,

    #[arg(long)]
    pub diet: Option<String>,

    /// Allergens to exclude; repeat or comma-separate.
    #[arg(long = "allergy", value_delimiter = ',')]
    pub allergies: Vec<String>,

    /// Cooking time budget for the whole day, in minutes.
    #[arg(long)]
    pub max_total_time: Option<u32>,

    #[arg(long)]
    pub max_time_per_meal: Option<u32>,

    /// Take pantry stock into account.
    #[arg(long)]
    pub pantry: bool,

    #[arg(long, value_enum, default_value_t = PantryImportance::Prefer)]
    pub importance: PantryImportance,

    #[arg(long, default_value_t = 1)]
    pub adults: u32,

    #[arg(long, default_value_t = 0)]
    pub children: u32,

    /// Seed for reproducible daily search.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ask for the request interactively.
    #[arg(short, long)]
    pub interactive: bool,

    /// Save without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// Also write the shopping list (and weekly plan) to CSV files with this prefix.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            user: 1,
            calories: None,
            diet: None,
            allergies: Vec::new(),
            max_total_time: None,
            max_time_per_meal: None,
            pantry: false,
            importance: PantryImportance::Prefer,
            adults: 1,
            children: 0,
            seed: None,
            interactive: false,
            yes: false,
            csv: None,
        }
    }
}

impl PlanArgs {
    pub fn to_request(&self) -> MenuRequest {
        MenuRequest {
            user_id: self.user,
            target_calories: self.calories,
            diet_type: self.diet.clone(),
            allergies: self.allergies.clone(),
            max_total_time: self.max_total_time,
            max_time_per_meal: self.max_time_per_meal,
            consider_pantry: self.pantry,
            pantry_importance: self.importance,
            household: Household::new(self.adults, self.children),
        }
    }
}
