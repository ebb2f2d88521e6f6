use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use curricula_domain::{Course, CourseId, CurriculaError, DateKey, ModuleId, TopicId};
use serde::Serialize;
use serde_json::Value;

use crate::commands::{self, CommandError, CommandResult};
use crate::context::AppContext;

/// Curricula course date scheduler.
#[derive(Debug, Parser)]
#[command(name = "curricula", version, about = "Curriculum date scheduling for course modules")]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace). Overrides the configured level.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a JSON or TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database path from configuration.
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a course (window and module outline) from a JSON file.
    ImportCourse(ImportCourseArgs),
    /// Show a stored course.
    ShowCourse(CourseArgs),
    /// Show a module's dates and day numbers.
    ShowSchedule(ModuleArgs),
    /// Give a topic exactly one date, or clear it.
    SetDate(SetDateArgs),
    /// Give a topic every valid day of a date range.
    AssignRange(AssignRangeArgs),
    /// Place a topic and every later topic of its module on consecutive valid days.
    AutoAssign(AutoAssignArgs),
    /// Remove every date from a module.
    ClearSchedule(ModuleArgs),
    /// Attach or remove a module's test link.
    SetTestLink(TestLinkArgs),
    /// Show one month of the course calendar.
    Month(MonthArgs),
    /// Show the topics covered on a course day.
    Day(DayArgs),
}

/// Arguments for the `import-course` subcommand.
#[derive(Debug, clap::Args)]
pub struct ImportCourseArgs {
    /// Path to the course JSON file.
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Course selector.
#[derive(Debug, clap::Args)]
pub struct CourseArgs {
    /// Course identifier.
    #[arg(long)]
    pub course: String,
}

/// Module selector.
#[derive(Debug, clap::Args)]
pub struct ModuleArgs {
    /// Course identifier.
    #[arg(long)]
    pub course: String,

    /// Module identifier.
    #[arg(long)]
    pub module: String,
}

/// Arguments for the `set-date` subcommand.
#[derive(Debug, clap::Args)]
pub struct SetDateArgs {
    #[command(flatten)]
    pub target: ModuleArgs,

    /// Topic identifier.
    #[arg(long)]
    pub topic: String,

    /// Date as YYYY-MM-DD.
    #[arg(long, required_unless_present = "clear")]
    pub date: Option<DateKey>,

    /// Remove the topic's dates instead.
    #[arg(long, conflicts_with = "date")]
    pub clear: bool,
}

/// Arguments for the `assign-range` subcommand.
#[derive(Debug, clap::Args)]
pub struct AssignRangeArgs {
    #[command(flatten)]
    pub target: ModuleArgs,

    /// Topic identifier.
    #[arg(long)]
    pub topic: String,

    /// First day of the range (YYYY-MM-DD).
    #[arg(long)]
    pub start: DateKey,

    /// Last day of the range, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub end: DateKey,
}

/// Arguments for the `auto-assign` subcommand.
#[derive(Debug, clap::Args)]
pub struct AutoAssignArgs {
    #[command(flatten)]
    pub target: ModuleArgs,

    /// First topic to place.
    #[arg(long)]
    pub topic: String,

    /// Earliest date for the first topic (YYYY-MM-DD).
    #[arg(long)]
    pub start: DateKey,
}

/// Arguments for the `set-test-link` subcommand.
#[derive(Debug, clap::Args)]
pub struct TestLinkArgs {
    #[command(flatten)]
    pub target: ModuleArgs,

    /// Link to the module test; omit to remove it.
    #[arg(long)]
    pub link: Option<String>,
}

/// Arguments for the `month` subcommand.
#[derive(Debug, clap::Args)]
pub struct MonthArgs {
    #[command(flatten)]
    pub course: CourseArgs,

    /// Calendar year.
    #[arg(long)]
    pub year: i32,

    /// Month number, 1 to 12.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
}

/// Arguments for the `day` subcommand.
#[derive(Debug, clap::Args)]
pub struct DayArgs {
    #[command(flatten)]
    pub course: CourseArgs,

    /// Course day number, starting at 1.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub day: u32,
}

impl ModuleArgs {
    fn ids(&self) -> (CourseId, ModuleId) {
        (CourseId::from(self.course.as_str()), ModuleId::from(self.module.as_str()))
    }
}

/// Run one subcommand and return its view as JSON.
pub async fn execute(ctx: &AppContext, command: Command) -> CommandResult<Value> {
    match command {
        Command::ImportCourse(args) => {
            let course = read_course(&args.file)?;
            to_json(&commands::import_course(ctx, course).await?)
        }
        Command::ShowCourse(args) => {
            to_json(&commands::get_course(ctx, &CourseId::from(args.course)).await?)
        }
        Command::ShowSchedule(args) => {
            let (course, module) = args.ids();
            to_json(&commands::get_module_schedule(ctx, &course, &module).await?)
        }
        Command::SetDate(args) => {
            let (course, module) = args.target.ids();
            let date = if args.clear { None } else { args.date };
            let topic = TopicId::from(args.topic);
            to_json(&commands::assign_single_date(ctx, &course, &module, &topic, date).await?)
        }
        Command::AssignRange(args) => {
            let (course, module) = args.target.ids();
            let topic = TopicId::from(args.topic);
            to_json(
                &commands::assign_date_range(ctx, &course, &module, &topic, args.start, args.end)
                    .await?,
            )
        }
        Command::AutoAssign(args) => {
            let (course, module) = args.target.ids();
            let topic = TopicId::from(args.topic);
            to_json(&commands::auto_assign_dates(ctx, &course, &module, &topic, args.start).await?)
        }
        Command::ClearSchedule(args) => {
            let (course, module) = args.ids();
            to_json(&commands::clear_module_schedule(ctx, &course, &module).await?)
        }
        Command::SetTestLink(args) => {
            let (course, module) = args.target.ids();
            to_json(&commands::set_module_test_link(ctx, &course, &module, args.link).await?)
        }
        Command::Month(args) => {
            let course = CourseId::from(args.course.course);
            to_json(&commands::get_course_calendar_month(ctx, &course, args.year, args.month).await?)
        }
        Command::Day(args) => {
            let course = CourseId::from(args.course.course);
            to_json(&commands::get_topics_on_day(ctx, &course, args.day).await?)
        }
    }
}

fn read_course(path: &Path) -> CommandResult<Course> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        CurriculaError::InvalidInput(format!("failed to read {}: {err}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        CommandError::from(CurriculaError::InvalidInput(format!(
            "invalid course file {}: {err}",
            path.display()
        )))
    })
}

fn to_json<T: Serialize>(view: &T) -> CommandResult<Value> {
    serde_json::to_value(view)
        .map_err(|err| CurriculaError::Internal(format!("failed to serialise output: {err}")).into())
}
