//! Module schedule commands
//!
//! Mutating commands open an editing session, apply one operation, save, and
//! return the resulting module view. A partial auto-assignment is still saved
//! and reported through [`ModuleScheduleView::warning`].

use curricula_core::{EditorState, ModuleScheduleEditor, ScheduleError, ScheduleResult};
use curricula_domain::{CourseId, DateKey, ModuleId, TopicId};
use serde::Serialize;
use tracing::{debug, warn};

use super::CommandResult;
use crate::context::AppContext;
use crate::utils::logging::timed;

/// Dates of one topic as the editor sees them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDatesView {
    /// Topic id.
    pub topic_id: TopicId,
    /// Topic display name.
    pub topic_name: String,
    /// Practice problems attached to the topic.
    pub problem_count: u32,
    /// Assigned dates, ascending.
    pub dates: Vec<DateKey>,
    /// Course-wide day numbers of `dates`, same order.
    pub day_numbers: Vec<u32>,
}

/// A module's schedule after a command ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleScheduleView {
    /// Course id.
    pub course_id: CourseId,
    /// Module id.
    pub module_id: ModuleId,
    /// Module display name.
    pub module_name: String,
    /// Editor state after the command.
    pub state: EditorState,
    /// End-of-module test link.
    pub test_link: Option<String>,
    /// Topics in declared order.
    pub topics: Vec<TopicDatesView>,
    /// Set when an auto-assignment was saved partially.
    pub warning: Option<ScheduleError>,
}

impl ModuleScheduleView {
    fn from_editor(editor: &ModuleScheduleEditor, warning: Option<ScheduleError>) -> Self {
        let module = editor.module();
        let topics = module
            .topics
            .iter()
            .map(|topic| TopicDatesView {
                topic_id: topic.id.clone(),
                topic_name: topic.name.clone(),
                problem_count: topic.problem_count,
                dates: editor.candidate().dates_of(&topic.id).unwrap_or_default().to_vec(),
                day_numbers: editor.day_number_for(&topic.id),
            })
            .collect();

        Self {
            course_id: editor.course().id.clone(),
            module_id: module.id.clone(),
            module_name: module.name.clone(),
            state: editor.state(),
            test_link: editor.test_link().map(str::to_owned),
            topics,
            warning,
        }
    }
}

/// Current saved schedule of a module, with live day numbers.
pub async fn get_module_schedule(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
) -> CommandResult<ModuleScheduleView> {
    timed("schedule::get_module_schedule", async {
        let editor = ctx.scheduling.open_editor(course_id, module_id).await?;
        Ok(ModuleScheduleView::from_editor(&editor, None))
    })
    .await
}

/// Give a topic exactly one date, or clear it with `None`.
pub async fn assign_single_date(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
    topic_id: &TopicId,
    date: Option<DateKey>,
) -> CommandResult<ModuleScheduleView> {
    timed(
        "schedule::assign_single_date",
        edit_and_save(ctx, course_id, module_id, |editor| editor.set_single_date(topic_id, date)),
    )
    .await
}

/// Give a topic every valid day of `start..=end`.
pub async fn assign_date_range(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
    topic_id: &TopicId,
    start: DateKey,
    end: DateKey,
) -> CommandResult<ModuleScheduleView> {
    timed(
        "schedule::assign_date_range",
        edit_and_save(ctx, course_id, module_id, |editor| {
            editor.assign_range(topic_id, start, end).map(drop)
        }),
    )
    .await
}

/// Place `start_topic` and every later topic on consecutive valid days.
pub async fn auto_assign_dates(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
    start_topic: &TopicId,
    start_date: DateKey,
) -> CommandResult<ModuleScheduleView> {
    timed(
        "schedule::auto_assign_dates",
        edit_and_save(ctx, course_id, module_id, |editor| {
            editor.auto_assign(start_topic, start_date).map(drop)
        }),
    )
    .await
}

/// Remove every date from a module.
pub async fn clear_module_schedule(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
) -> CommandResult<ModuleScheduleView> {
    timed(
        "schedule::clear_module_schedule",
        edit_and_save(ctx, course_id, module_id, ModuleScheduleEditor::clear_all),
    )
    .await
}

/// Attach a test link to a module; blank or `None` removes it.
pub async fn set_module_test_link(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
    test_link: Option<String>,
) -> CommandResult<ModuleScheduleView> {
    timed(
        "schedule::set_module_test_link",
        edit_and_save(ctx, course_id, module_id, |editor| editor.set_test_link(test_link)),
    )
    .await
}

async fn edit_and_save<F>(
    ctx: &AppContext,
    course_id: &CourseId,
    module_id: &ModuleId,
    operation: F,
) -> CommandResult<ModuleScheduleView>
where
    F: FnOnce(&mut ModuleScheduleEditor) -> ScheduleResult<()>,
{
    let mut editor = ctx.scheduling.open_editor(course_id, module_id).await?;

    let warning = match operation(&mut editor) {
        Ok(()) => None,
        Err(err) if err.is_partial() => {
            warn!(
                course_id = %course_id,
                module_id = %module_id,
                error = %err,
                "Saving partial assignment"
            );
            Some(err)
        }
        Err(err) => return Err(err.into()),
    };

    editor.save().await?;
    debug!(
        course_id = %course_id,
        module_id = %module_id,
        rows = editor.flatten().len(),
        "Module schedule saved"
    );
    Ok(ModuleScheduleView::from_editor(&editor, warning))
}
