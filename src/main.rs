use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use menu_planner_rs::cli::{Cli, Command, PlanArgs};
use menu_planner_rs::error::Result;
use menu_planner_rs::interface::{
    collect_request, display_daily_plan, display_shopping_list, display_weekly_plan,
    prompt_yes_no, write_shopping_csv, write_weekly_csv,
};
use menu_planner_rs::models::{MenuBody, MenuRequest, ShoppingList};
use menu_planner_rs::planner::{PlannerConfig, seeded};
use menu_planner_rs::service::{self, DailyMenu, WeeklyMenu};
use menu_planner_rs::state::{JsonStore, load_config, load_data, save_data};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    debug!(config = %config.display(), "planner config");
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Daily(args) => cmd_daily(&cli.file, &config, &args),
        Command::Weekly(args) => cmd_weekly(&cli.file, &config, &args),
        Command::ShoppingList { menu, csv } => cmd_shopping_list(&cli.file, menu, csv.as_deref()),
    }
}

/// Load the data file, or report that it is missing.
fn open_store(file_path: &str) -> Result<Option<JsonStore>> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Planner data file not found: {}", file_path);
        eprintln!("Please ensure planner_data.json exists in the current directory.");
        return Ok(None);
    }

    let store = JsonStore::new(load_data(path)?);
    println!("Loaded {} recipes", store.len());
    Ok(Some(store))
}

fn build_request(store: &JsonStore, args: &PlanArgs) -> Result<MenuRequest> {
    let request = args.to_request();
    if args.interactive {
        collect_request(request, &store.allergens())
    } else {
        Ok(request)
    }
}

/// Ask (unless `--yes`), persist the menu and its list, and write the data file back.
fn save_menu(
    file_path: &str,
    store: &mut JsonStore,
    args: &PlanArgs,
    user_id: u32,
    body: MenuBody,
    shopping_list: ShoppingList,
) -> Result<()> {
    if !args.yes && !prompt_yes_no("Save this menu?", true)? {
        return Ok(());
    }

    let menu_id = service::save_menu(store, user_id, body, shopping_list)?;
    save_data(file_path, &store.to_data())?;
    println!("Menu saved with id {}.", menu_id);
    Ok(())
}

fn csv_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Plan a single day.
fn cmd_daily(file_path: &str, config: &PlannerConfig, args: &PlanArgs) -> Result<()> {
    let Some(mut store) = open_store(file_path)? else {
        return Ok(());
    };
    let request = build_request(&store, args)?;

    let mut rng = seeded(args.seed);
    let DailyMenu {
        plan,
        shopping_list,
        target_calories,
    } = service::generate_daily_menu(&store, &request, config, &mut rng)?;

    display_daily_plan(&plan, target_calories);
    display_shopping_list(&shopping_list);

    if let Some(prefix) = &args.csv {
        let path = csv_path(prefix, "_shopping.csv");
        write_shopping_csv(&shopping_list, &path)?;
        println!("Shopping list written to {}", path.display());
    }

    save_menu(
        file_path,
        &mut store,
        args,
        request.user_id,
        MenuBody::Daily(plan),
        shopping_list,
    )
}

/// Plan seven days.
fn cmd_weekly(file_path: &str, config: &PlannerConfig, args: &PlanArgs) -> Result<()> {
    let Some(mut store) = open_store(file_path)? else {
        return Ok(());
    };
    let request = build_request(&store, args)?;

    let WeeklyMenu {
        plan,
        shopping_list,
    } = service::generate_weekly_menu(&store, &request, config)?;

    display_weekly_plan(&plan);
    display_shopping_list(&shopping_list);

    if let Some(prefix) = &args.csv {
        let plan_path = csv_path(prefix, "_week.csv");
        let list_path = csv_path(prefix, "_shopping.csv");
        write_weekly_csv(&plan, &plan_path)?;
        write_shopping_csv(&shopping_list, &list_path)?;
        println!(
            "Plan written to {}, shopping list to {}",
            plan_path.display(),
            list_path.display()
        );
    }

    save_menu(
        file_path,
        &mut store,
        args,
        request.user_id,
        MenuBody::Weekly(plan),
        shopping_list,
    )
}

/// Show the stored shopping list of a saved menu.
fn cmd_shopping_list(file_path: &str, menu_id: u32, csv: Option<&Path>) -> Result<()> {
    let Some(store) = open_store(file_path)? else {
        return Ok(());
    };

    let saved = service::shopping_list_for_menu(&store, menu_id)?;
    println!("Menu {} (user {})", saved.menu_id, saved.user_id);
    display_shopping_list(&saved.list);

    if let Some(path) = csv {
        write_shopping_csv(&saved.list, path)?;
        println!("Shopping list written to {}", path.display());
    }

    Ok(())
}
