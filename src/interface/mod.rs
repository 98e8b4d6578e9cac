pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_shopping_csv, write_weekly_csv};
pub use prompts::{
    collect_request, prompt_allergies, prompt_household, prompt_importance,
    prompt_target_calories, prompt_yes_no,
};
pub use render::{display_daily_plan, display_shopping_list, display_weekly_plan};
