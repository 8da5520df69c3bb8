//! GradPlan CLI - track progress through a degree curriculum.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gradplan_core::{catalog, Curriculum, Semester, SubjectStatus};
use gradplan_progress::{validate, EngineConfig, LoadSource, ProgressEngine, ProgressTracker};
use gradplan_storage::JsonStorage;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "gradplan")]
#[command(about = "Degree progress tracker", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "gradplan.toml")]
    config: PathBuf,

    /// Directory holding saved progress
    #[arg(short, long, env = "GRADPLAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Curriculum JSON document (overrides the built-in catalog)
    #[arg(long, env = "GRADPLAN_CURRICULUM")]
    curriculum: Option<PathBuf>,

    /// Current semester as YYYY.H (defaults to today)
    #[arg(long)]
    semester: Option<Semester>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall progress
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List periods with subject statuses
    Periods,
    /// Advance a subject: available -> planned -> in progress -> completed -> available
    Toggle {
        /// Subject name
        subject: String,
    },
    /// Mark every subject of a period completed
    Finalize {
        /// Period number, starting at 1
        period: usize,
    },
    /// Suggest subjects for next semester
    Recommend,
    /// Estimate the graduation semester
    Estimate,
    /// Explain locked subjects
    Blockers,
    /// Print a share link for the current progress
    Share,
    /// Replace progress with a share link or payload
    Import {
        /// Share link or bare payload
        input: String,
    },
    /// Clear all progress
    Reset {
        /// Confirm
        #[arg(long)]
        yes: bool,
    },
    /// Check the curriculum's prerequisite graph
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load or create default config
    let mut config = Config::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(curriculum) = cli.curriculum {
        config.curriculum = Some(curriculum);
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if !cli.config.exists() {
        info!("Config file {} not found, using defaults", cli.config.display());
    }

    let curriculum = match &config.curriculum {
        Some(path) => Curriculum::load(path)
            .with_context(|| format!("loading curriculum {}", path.display()))?,
        None => catalog::builtin()?,
    };
    debug!("Curriculum has {} subjects", curriculum.subject_count());

    let engine = ProgressEngine::new(curriculum).with_config(EngineConfig::from(&config.engine));
    let storage = JsonStorage::new(&config.data_dir).await?;
    let mut tracker = ProgressTracker::open(engine, storage, None).await?;
    info!("Data dir: {}", config.data_dir.display());

    let semester = cli.semester.unwrap_or_else(Semester::current);

    match cli.command {
        Commands::Status { json } => print_status(&tracker, semester, json)?,
        Commands::Periods => print_periods(tracker.engine()),
        Commands::Toggle { subject } => {
            let transition = tracker.toggle(&subject).await?;
            println!("{}: {} -> {}", transition.subject, transition.from, transition.to);
        }
        Commands::Finalize { period } => {
            let Some(index) = period.checked_sub(1) else {
                bail!("period numbers start at 1");
            };
            let finalized = tracker.finalize_period(index).await?;
            println!(
                "Finalized {}: {} subjects marked completed",
                finalized.label,
                finalized.count()
            );
            for name in &finalized.transitioned {
                println!("  {}", name);
            }
        }
        Commands::Recommend => {
            let recs = tracker.engine().recommendations();
            if recs.is_empty() {
                println!("Nothing available to take");
                return Ok(());
            }
            println!("Priority (unlock other subjects):");
            for subject in &recs.priority {
                println!("  {}", subject.name);
            }
            if !recs.other.is_empty() {
                println!("Other:");
                for subject in &recs.other {
                    println!("  {}", subject.name);
                }
            }
        }
        Commands::Estimate => {
            let estimate = tracker.engine().estimate(semester);
            println!("Current semester: {}", estimate.current_semester);
            println!("Remaining subjects: {}", estimate.remaining_subjects);
            println!("Remaining semesters: {}", estimate.remaining_semesters);
            println!("Expected graduation: {}", estimate.graduation_semester);
        }
        Commands::Blockers => print_blockers(tracker.engine()),
        Commands::Share => println!("{}", tracker.share_url(&config.share_base_url)),
        Commands::Import { input } => {
            let corrections = tracker.import(&input).await?;
            for correction in &corrections {
                println!("Dropped: {}", correction);
            }
            let aggregate = tracker.engine().aggregate();
            println!(
                "Imported progress: {}/{} completed ({}%)",
                aggregate.completed, aggregate.total, aggregate.percentage
            );
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("reset clears all saved progress; pass --yes to confirm");
            }
            tracker.reset().await?;
            println!("Progress cleared");
        }
        Commands::Validate => run_validate(tracker.engine().curriculum()),
    }

    Ok(())
}

fn run_validate(curriculum: &Curriculum) {
    let issues = validate(curriculum);
    if issues.is_empty() {
        println!("No issues found");
    }
    for issue in &issues {
        println!("  {}", issue);
    }
}

fn print_status(tracker: &ProgressTracker<JsonStorage>, semester: Semester, json: bool) -> Result<()> {
    let engine = tracker.engine();
    let aggregate = engine.aggregate();
    let estimate = engine.estimate(semester);

    if json {
        let value = serde_json::json!({
            "aggregate": aggregate,
            "estimate": estimate,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let course = engine.curriculum().course();
    println!("{}", course.name);
    if let Some(institution) = &course.institution {
        println!("  {}", institution);
    }
    println!();
    println!("Progress: {}% ({}/{} completed)", aggregate.percentage, aggregate.completed, aggregate.total);
    println!("  In progress: {}", aggregate.in_progress);
    println!("  Planned: {}", aggregate.planned);
    println!("  Expected graduation: {}", estimate.graduation_semester);

    match tracker.source() {
        LoadSource::Stored => {
            if let Some(saved_at) = tracker.saved_at() {
                println!("  Last saved: {}", saved_at.format("%Y-%m-%d %H:%M"));
            }
        }
        LoadSource::Empty => println!("  No saved progress yet"),
        LoadSource::Shared => {}
    }
    Ok(())
}

fn status_marker(status: SubjectStatus) -> &'static str {
    match status {
        SubjectStatus::Completed => "[x]",
        SubjectStatus::InProgress => "[~]",
        SubjectStatus::Planned => "[p]",
        SubjectStatus::Available => "[ ]",
        SubjectStatus::Locked => "[-]",
    }
}

fn print_periods(engine: &ProgressEngine) {
    for view in engine.period_views() {
        let flag = if view.finalized {
            " finalized"
        } else if view.can_finalize {
            " ready"
        } else {
            ""
        };
        println!("{}. {} ({}/{}){}", view.index + 1, view.label, view.completed, view.total, flag);
        for item in &view.subjects {
            println!("  {} {}", status_marker(item.status), item.subject.name);
        }
    }
}

fn print_blockers(engine: &ProgressEngine) {
    let analysis = engine.blockers().analyze(engine.snapshot());
    if analysis.locked.is_empty() {
        println!("No locked subjects");
        return;
    }

    println!("Locked subjects ({})", analysis.stats.locked);
    for item in &analysis.locked {
        let missing: Vec<String> = item.missing.iter().map(|p| p.to_string()).collect();
        println!("  {} <- {}", item.subject.name, missing.join(", "));
    }
    if analysis.stats.external_only > 0 {
        println!("Blocked only by external conditions: {}", analysis.stats.external_only);
    }
    if let Some((name, count)) = &analysis.stats.key_subject {
        println!("Completing '{}' unlocks {} subjects", name, count);
    }
}
