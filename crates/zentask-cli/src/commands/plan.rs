use chrono::Local;
use clap::Args;
use zentask_core::planner::plan_or_none;
use zentask_core::{Config, GeminiPlanner, PlanRequest};

use super::open_board;

#[derive(Args)]
pub struct PlanArgs {
    /// Goal to break down, e.g. "run a 5k in two months"
    goal: String,
    /// Language of the generated tasks (default from config)
    #[arg(long)]
    language: Option<String>,
    /// Add the most important tasks to today's list, up to the daily cap
    #[arg(long)]
    add: bool,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let planner = GeminiPlanner::from_config(&config.planner)?;
    let request = PlanRequest::new(
        args.goal,
        args.language.unwrap_or_else(|| config.planner.language.clone()),
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let Some(plan) = runtime.block_on(plan_or_none(&planner, &request)) else {
        println!("No plan could be generated. Try rephrasing the goal.");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for task in &plan.tasks {
            println!("- [{}] [{}] {}", task.priority, task.category, task.title);
            if !task.description.is_empty() {
                println!("    {}", task.description);
            }
        }
    }

    if args.add {
        let mut board = open_board(&config)?;
        let added = board.accept_plan(&plan, Local::now())?;
        if added.is_empty() {
            println!("Daily limit reached; nothing added.");
        }
        for task in added {
            println!("Task created: {} {}", task.id, task.title);
        }
    }
    Ok(())
}
