//! Module schedule editing session
//!
//! One editor instance drives one module through
//! `Loading -> Editing -> Saving -> (Saved | Failed)`. Allocation operations
//! mutate only the in-memory candidate; persistence happens once, on save,
//! with the full flattened row list.

use std::iter;
use std::sync::Arc;

use curricula_domain::{
    impl_domain_status_conversions, Course, CourseId, DateKey, Module, ModuleId, ModuleSchedule,
    TopicId, TopicSchedule,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::allocation::Allocator;
use super::candidate::CandidateSchedule;
use super::error::{ScheduleError, ScheduleResult};
use super::index::ScheduleIndex;
use super::policy::HolidayPolicy;
use super::ports::{CourseCatalog, ScheduleRepository};
use super::validator;

/// Lifecycle of an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorState {
    /// Reading the course and saved schedule.
    Loading,
    /// Accepting changes.
    Editing,
    /// Validating and persisting.
    Saving,
    /// Save succeeded; the session accepts no further edits.
    Saved,
    /// Save failed; the next edit resumes editing.
    Failed,
}

impl_domain_status_conversions!(EditorState {
    Loading => "loading",
    Editing => "editing",
    Saving => "saving",
    Saved => "saved",
    Failed => "failed",
});

/// Editing session for a single module of a course
pub struct ModuleScheduleEditor {
    repository: Arc<dyn ScheduleRepository>,
    course: Course,
    module: Module,
    policy: HolidayPolicy,
    candidate: CandidateSchedule,
    test_link: Option<String>,
    /// Last-fetched saved schedules of every other module in the course.
    other_schedules: Vec<ModuleSchedule>,
    preview: ScheduleIndex,
    state: EditorState,
    last_error: Option<ScheduleError>,
}

impl ModuleScheduleEditor {
    /// Load course structure and saved schedules, then enter `Editing`.
    ///
    /// A module that was never saved starts with an empty candidate.
    pub async fn open(
        repository: Arc<dyn ScheduleRepository>,
        catalog: &dyn CourseCatalog,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> ScheduleResult<Self> {
        debug!(course_id = %course_id, module_id = %module_id, "Opening module schedule editor");

        let (window, outline) = tokio::try_join!(
            catalog.get_course_window(course_id),
            catalog.get_course_outline(course_id)
        )
        .map_err(ScheduleError::storage)?;
        let course = Course::from_parts(course_id.clone(), outline, window);
        let module = course
            .module(module_id)
            .cloned()
            .ok_or_else(|| ScheduleError::UnknownModule { module_id: module_id.clone() })?;
        let policy = HolidayPolicy::from_window(&course.window)?;

        let (saved, course_schedules) = tokio::try_join!(
            repository.load_module_schedule(course_id, module_id),
            repository.load_course_schedules(course_id)
        )
        .map_err(ScheduleError::storage)?;
        let saved =
            saved.unwrap_or_else(|| ModuleSchedule::empty(course_id.clone(), module_id.clone()));

        let mut editor = Self {
            repository,
            candidate: CandidateSchedule::from_rows(&module, &saved.rows),
            test_link: saved.test_link,
            other_schedules: Self::siblings(course_schedules, module_id),
            course,
            module,
            policy,
            preview: ScheduleIndex::default(),
            state: EditorState::Loading,
            last_error: None,
        };
        editor.refresh_preview();
        editor.state = EditorState::Editing;

        info!(
            course_id = %course_id,
            module_id = %module_id,
            topics = editor.module.topics.len(),
            saved_rows = saved.rows.len(),
            "Module schedule editor ready"
        );
        Ok(editor)
    }

    /// Replace all dates of a topic with one date, or clear them.
    ///
    /// Manual dates are not checked against the holiday policy.
    pub fn set_single_date(
        &mut self,
        topic_id: &TopicId,
        date: Option<DateKey>,
    ) -> ScheduleResult<()> {
        self.apply(|allocator, candidate| allocator.set_single_date(candidate, topic_id, date))
    }

    /// Give a topic every valid day of `start..=end`.
    pub fn assign_range(
        &mut self,
        topic_id: &TopicId,
        start: DateKey,
        end: DateKey,
    ) -> ScheduleResult<Vec<DateKey>> {
        self.apply(|allocator, candidate| allocator.assign_range(candidate, topic_id, start, end))
    }

    /// Sequentially place `start_topic` and every later topic.
    ///
    /// On [`ScheduleError::IncompleteAssignment`] the placed topics keep their
    /// new dates.
    pub fn auto_assign(
        &mut self,
        start_topic: &TopicId,
        start_date: DateKey,
    ) -> ScheduleResult<Vec<TopicSchedule>> {
        self.apply(|allocator, candidate| allocator.auto_assign(candidate, start_topic, start_date))
    }

    /// Empty every topic's date list.
    pub fn clear_all(&mut self) -> ScheduleResult<()> {
        self.apply(|_, candidate| {
            candidate.clear_all();
            Ok(())
        })
    }

    /// Attach or remove the module-level test link.
    pub fn set_test_link(&mut self, test_link: Option<String>) -> ScheduleResult<()> {
        self.apply(|_, _| Ok(()))?;
        self.test_link = test_link.filter(|link| !link.trim().is_empty());
        Ok(())
    }

    /// Validate the candidate against the whole course and persist it.
    ///
    /// A validation failure returns the session to `Editing` without calling
    /// the repository. A repository failure moves it to `Failed`; the next
    /// operation or save attempt resumes editing with the candidate intact.
    pub async fn save(&mut self) -> ScheduleResult<()> {
        self.ensure_editable()?;
        self.state = EditorState::Saving;

        let mut pending = ModuleSchedule::empty(self.course.id.clone(), self.module.id.clone());
        pending.rows = self.candidate.flatten();
        pending.test_link.clone_from(&self.test_link);

        if let Err(err) =
            validator::validate(&self.course, iter::once(&pending).chain(&self.other_schedules))
        {
            warn!(
                course_id = %self.course.id,
                module_id = %self.module.id,
                error = %err,
                "Schedule rejected by validation"
            );
            self.state = EditorState::Editing;
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let saved = self
            .repository
            .save_module_schedule(
                &self.course.id,
                &self.module.id,
                &pending.rows,
                pending.test_link.as_deref(),
            )
            .await;

        match saved {
            Ok(()) => {
                info!(
                    course_id = %self.course.id,
                    module_id = %self.module.id,
                    rows = pending.rows.len(),
                    "Saved module schedule"
                );
                self.state = EditorState::Saved;
                self.last_error = None;
                Ok(())
            }
            Err(source) => {
                let err = ScheduleError::storage(source);
                error!(
                    course_id = %self.course.id,
                    module_id = %self.module.id,
                    error = %err,
                    "Failed to save module schedule"
                );
                self.state = EditorState::Failed;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Re-fetch the other modules' saved schedules and recompute the preview.
    pub async fn refresh_course(&mut self) -> ScheduleResult<()> {
        match self.repository.load_course_schedules(&self.course.id).await {
            Ok(schedules) => {
                self.other_schedules = Self::siblings(schedules, &self.module.id);
                self.refresh_preview();
                debug!(
                    course_id = %self.course.id,
                    modules = self.other_schedules.len(),
                    "Refreshed sibling schedules"
                );
                Ok(())
            }
            Err(source) => {
                let err = ScheduleError::storage(source);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Course the module belongs to.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Module being edited.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Holiday policy of the course.
    pub fn policy(&self) -> &HolidayPolicy {
        &self.policy
    }

    /// Unsaved assignments.
    pub fn candidate(&self) -> &CandidateSchedule {
        &self.candidate
    }

    /// Pending test link.
    pub fn test_link(&self) -> Option<&str> {
        self.test_link.as_deref()
    }

    /// Live course-wide day numbers, including unsaved candidate dates.
    pub fn day_numbers(&self) -> &ScheduleIndex {
        &self.preview
    }

    /// Day numbers of one topic's dates, in date order.
    pub fn day_number_for(&self, topic_id: &TopicId) -> Vec<u32> {
        self.candidate
            .dates_of(topic_id)
            .unwrap_or_default()
            .iter()
            .filter_map(|date| self.preview.day_number(*date))
            .collect()
    }

    /// The rows a save would persist.
    pub fn flatten(&self) -> Vec<TopicSchedule> {
        self.candidate.flatten()
    }

    /// Error left by the most recent failed operation.
    pub fn last_error(&self) -> Option<&ScheduleError> {
        self.last_error.as_ref()
    }

    /// Forget the last error.
    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    fn apply<T>(
        &mut self,
        operation: impl FnOnce(&Allocator<'_>, &mut CandidateSchedule) -> ScheduleResult<T>,
    ) -> ScheduleResult<T> {
        if let Err(err) = self.ensure_editable() {
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let allocator = Allocator::new(&self.policy, &self.course.window);
        let outcome = operation(&allocator, &mut self.candidate);
        self.refresh_preview();
        self.last_error = outcome.as_ref().err().cloned();
        outcome
    }

    fn ensure_editable(&mut self) -> ScheduleResult<()> {
        match self.state {
            EditorState::Editing => Ok(()),
            EditorState::Failed => {
                debug!(module_id = %self.module.id, "Resuming editing after failed save");
                self.state = EditorState::Editing;
                Ok(())
            }
            state => Err(ScheduleError::NotEditable { state }),
        }
    }

    fn refresh_preview(&mut self) {
        self.preview = ScheduleIndex::build(
            self.other_schedules
                .iter()
                .flat_map(ModuleSchedule::dates)
                .chain(self.candidate.all_dates()),
        );
    }

    fn siblings(schedules: Vec<ModuleSchedule>, module_id: &ModuleId) -> Vec<ModuleSchedule> {
        schedules.into_iter().filter(|schedule| &schedule.module_id != module_id).collect()
    }
}
