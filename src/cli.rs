//! One-shot subcommands sharing the dashboard's store.

use crate::config::{load_config, save_config, Config};
use crate::domain::{streak_badge, total_minutes, HOURS_PER_DAY};
use crate::persistence::{
    config_file, ensure_flowtime_dir, init_local_flowtime, FileStore, KeyValueStore, SchedulePlanner,
    StreakTracker, TaskRepository,
};
use crate::relay::{estimate_blocking, run_server};
use crate::report::{calculate_duration_histogram, format_minutes, generate_report, PerformanceLevel, ReportInput};
use crate::tips::random_tips;
use crate::ui::planner_pane::{hour_titles, occupancy_bar};
use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a local .flowtime directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Estimated hours
        #[arg(long, default_value_t = 0)]
        hours: u32,
        /// Estimated minutes
        #[arg(short, long, default_value_t = 0)]
        minutes: u32,
        /// Ask the AI relay for an estimate and a breakdown
        #[arg(short, long)]
        estimate: bool,
    },
    /// List tasks
    List,
    /// Toggle a task between pending and completed
    Toggle {
        /// Task id, id prefix or list position
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id, id prefix or list position
        id: String,
    },
    /// Show task statistics
    Stats,
    /// Write a Markdown report for today
    Report {
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the daily streak
    Streak {
        /// Record activity for today
        #[arg(long)]
        record: bool,
    },
    /// Manage the hour-by-hour schedule
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Estimate how long a task takes
    Estimate {
        /// Task title
        title: String,
    },
    /// Run the HTTP estimate relay
    Serve {
        /// Address to bind, overrides relay.listen
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Print a few random productivity tips
    Tips,
    /// Print the effective configuration
    Config {
        /// Also write it to config.json
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// Place a task at an hour
    Add { id: String, hour: u32 },
    /// Move a task's entry between hours
    Move { id: String, from: u32, to: u32 },
    /// Remove a task's entry at an hour
    Remove { id: String, hour: u32 },
    /// Print the 24-hour grid
    Show,
}

/// Data-directory store shared by every subcommand
pub fn open_store() -> Result<Arc<dyn KeyValueStore>> {
    let dir = ensure_flowtime_dir()?;
    Ok(Arc::new(FileStore::new(dir)))
}

/// Effective configuration from `config.json`
pub fn open_config() -> Result<Config> {
    load_config(config_file()?)
}

/// Run a one-shot subcommand
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Init => init(),
        Commands::Add {
            title,
            hours,
            minutes,
            estimate,
        } => add(
            open_store()?,
            &open_config()?,
            &title,
            total_minutes(hours, minutes),
            estimate,
        ),
        Commands::List => list(open_store()?),
        Commands::Toggle { id } => toggle(open_store()?, &id),
        Commands::Delete { id } => delete(open_store()?, &id),
        Commands::Stats => stats(open_store()?),
        Commands::Report { output } => report(open_store()?, output),
        Commands::Streak { record } => streak(open_store()?, record),
        Commands::Schedule(command) => schedule(open_store()?, command),
        Commands::Estimate { title } => estimate(&open_config()?, &title),
        Commands::Serve { listen } => serve(open_config()?, listen),
        Commands::Tips => tips(),
        Commands::Config { write } => show_config(&open_config()?, write),
    }
}

fn init() -> Result<()> {
    let dir = init_local_flowtime()?;
    println!("Initialized flowtime directory: {}", dir.display());
    println!();
    println!("Flowtime will now use this local directory for its data.");
    println!("Run 'flowtime' to open the dashboard.");
    Ok(())
}

fn add(store: Arc<dyn KeyValueStore>, config: &Config, title: &str, minutes: u32, ask: bool) -> Result<()> {
    let mut repo = TaskRepository::load(store)?;

    let (minutes, first_principles, steps) = if ask {
        let (estimate, err) = estimate_blocking(config.relay.clone(), title);
        if let Some(err) = err {
            eprintln!("Estimate unavailable ({}), using heuristic", err.user_message());
        }
        // Explicit --hours/--minutes win over the estimate
        let minutes = if minutes > 0 { minutes } else { estimate.minutes };
        let (fp, steps) = estimate.into_analysis();
        (minutes, fp, steps)
    } else {
        (minutes, None, None)
    };

    let task = repo.add(title, minutes, first_principles, steps)?;
    println!(
        "Added {} \"{}\" ({})",
        task.short_id(),
        task.title,
        format_minutes(task.time_in_minutes)
    );
    Ok(())
}

fn list(store: Arc<dyn KeyValueStore>) -> Result<()> {
    let repo = TaskRepository::load(store)?;
    if repo.is_empty() {
        println!("No tasks yet. Add one with: flowtime add \"Title\" --minutes 30");
        return Ok(());
    }

    for (i, task) in repo.tasks().iter().enumerate() {
        println!(
            "{:>3}. [{}] {}  {:>7}  {}",
            i + 1,
            if task.completed { "x" } else { " " },
            task.short_id(),
            format_minutes(task.time_in_minutes),
            task.title
        );
    }
    Ok(())
}

/// Resolve a CLI reference to a full task id
fn resolve_id(repo: &TaskRepository, reference: &str) -> Result<String> {
    repo.resolve(reference)
        .map(|task| task.id.clone())
        .ok_or_else(|| anyhow!("No task matches '{}'", reference))
}

fn toggle(store: Arc<dyn KeyValueStore>, reference: &str) -> Result<()> {
    let mut repo = TaskRepository::load(store.clone())?;
    let id = resolve_id(&repo, reference)?;

    match repo.toggle(&id)? {
        Some(true) => {
            StreakTracker::load(store)?.record_activity()?;
            println!("Completed {}", id);
        }
        Some(false) => println!("Reopened {}", id),
        None => return Err(anyhow!("No task matches '{}'", reference)),
    }
    Ok(())
}

fn delete(store: Arc<dyn KeyValueStore>, reference: &str) -> Result<()> {
    let mut repo = TaskRepository::load(store)?;
    let id = resolve_id(&repo, reference)?;
    repo.delete(&id)?;
    println!("Deleted {}", id);
    Ok(())
}

fn stats(store: Arc<dyn KeyValueStore>) -> Result<()> {
    let repo = TaskRepository::load(store)?;
    let stats = repo.stats();
    let level = PerformanceLevel::from_completion_rate(stats.completion_rate);

    println!("Tasks:       {} ({} completed, {} pending)", stats.total, stats.completed, stats.pending);
    println!("Completion:  {}%", stats.completion_rate);
    println!(
        "Time:        {} planned, {} done, {} remaining ({}%)",
        format_minutes(stats.total_minutes),
        format_minutes(stats.completed_minutes),
        format_minutes(stats.remaining_minutes),
        stats.time_completion_rate
    );
    println!("Average:     {}", format_minutes(stats.average_task_minutes));
    println!("Performance: {} - {}", level.label(), level.message());
    println!();
    for (label, count) in calculate_duration_histogram(repo.tasks()).bins() {
        println!("  {:<15} {}", label, count);
    }
    Ok(())
}

fn report(store: Arc<dyn KeyValueStore>, output: Option<PathBuf>) -> Result<()> {
    let repo = TaskRepository::load(store.clone())?;
    let streak = StreakTracker::load(store.clone())?.load_status();
    let planner = SchedulePlanner::load(store)?;
    let date = chrono::Local::now().date_naive();

    println!("Generating report for {}...", date);
    let input = ReportInput {
        date,
        tasks: repo.tasks(),
        streak: &streak,
        schedule: planner.schedule_file(),
    };
    let path = generate_report(&input, output)?;
    println!("Report generated: {}", path.display());
    Ok(())
}

fn streak(store: Arc<dyn KeyValueStore>, record: bool) -> Result<()> {
    let mut tracker = StreakTracker::load(store)?;
    if record {
        tracker.record_activity()?;
    }

    let status = tracker.load_status();
    println!(
        "{} Current streak: {} day{}",
        streak_badge(status.current_streak),
        status.current_streak,
        if status.current_streak == 1 { "" } else { "s" }
    );
    println!("Longest streak: {}", status.longest_streak);
    println!("Active days:    {}", status.total_days);
    Ok(())
}

fn schedule(store: Arc<dyn KeyValueStore>, command: ScheduleCommand) -> Result<()> {
    let repo = TaskRepository::load(store.clone())?;
    let mut planner = SchedulePlanner::load(store)?;

    match command {
        ScheduleCommand::Add { id, hour } => {
            let id = resolve_id(&repo, &id)?;
            match planner.schedule(repo.tasks(), &id, hour)? {
                Some(entry) => println!("Scheduled \"{}\" at {:02}:00", entry.task_title, entry.start_hour),
                None => return Err(anyhow!("No task matches '{}'", id)),
            }
        }
        ScheduleCommand::Move { id, from, to } => {
            let id = resolve_id(&repo, &id)?;
            let moved = planner.reschedule(&id, from, to)?;
            if moved == 0 {
                return Err(anyhow!("Task is not scheduled at {:02}:00", from));
            }
            println!("Moved {} entr{} {:02}:00 -> {:02}:00", moved, if moved == 1 { "y" } else { "ies" }, from, to);
        }
        ScheduleCommand::Remove { id, hour } => {
            let id = resolve_id(&repo, &id)?;
            let removed = planner.unschedule(&id, hour)?;
            if removed == 0 {
                return Err(anyhow!("Task is not scheduled at {:02}:00", hour));
            }
            println!("Removed {} entr{} at {:02}:00", removed, if removed == 1 { "y" } else { "ies" }, hour);
        }
        ScheduleCommand::Show => {
            let schedule = planner.schedule_file();
            for hour in 0..HOURS_PER_DAY {
                let occupancy = schedule.hour_occupancy(hour);
                println!(
                    "{:02}:00 {} {:>3.0}% {}",
                    hour,
                    occupancy_bar(occupancy, 10),
                    occupancy,
                    hour_titles(schedule, hour)
                );
            }

            let unscheduled = schedule.unscheduled_tasks(repo.tasks());
            if !unscheduled.is_empty() {
                println!();
                println!("Unscheduled:");
                for task in unscheduled {
                    println!("  {}  {}", task.short_id(), task.title);
                }
            }
        }
    }
    Ok(())
}

fn estimate(config: &Config, title: &str) -> Result<()> {
    let (estimate, err) = estimate_blocking(config.relay.clone(), title);
    if let Some(err) = err {
        eprintln!("Estimate unavailable ({}), using heuristic", err.user_message());
    }

    println!("Estimate: {}", format_minutes(estimate.minutes));
    if !estimate.first_principles.is_empty() {
        println!();
        println!("{}", estimate.first_principles);
    }
    if !estimate.steps.is_empty() {
        println!();
        for (i, step) in estimate.steps.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
    }
    Ok(())
}

fn serve(config: Config, listen: Option<String>) -> Result<()> {
    let mut relay = config.relay;
    if let Some(listen) = listen {
        relay.listen = listen;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run_server(relay))
}

fn tips() -> Result<()> {
    for tip in random_tips() {
        println!("{} [{}]", tip.title, tip.category.label());
        println!("  {}", tip.description);
    }
    Ok(())
}

fn show_config(config: &Config, write: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if write {
        let path = config_file()?;
        save_config(&path, config)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
