//! Allocation strategies
//!
//! Three ways to put dates on a module's topics:
//!
//! - **Manual**: one topic gets exactly one date (or none). No holiday
//!   check; manual entry is an instructor override and is only checked for
//!   window containment and uniqueness at save time.
//! - **Range**: one topic gets every valid day of a contiguous span.
//! - **Sequential auto-assign**: from a chosen topic onwards, in declared
//!   topic order, each topic gets the next valid day.
//!
//! Failed operations leave the candidate untouched, except auto-assign
//! running out of days, which keeps the dates it already placed.

use curricula_domain::{CourseWindow, DateKey, TopicId, TopicSchedule};
use tracing::{debug, warn};

use super::calendar::enumerate_range;
use super::candidate::CandidateSchedule;
use super::error::{ScheduleError, ScheduleResult};
use super::policy::HolidayPolicy;

/// Applies allocation strategies against one course's policy and window.
#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    policy: &'a HolidayPolicy,
    window: &'a CourseWindow,
}

impl<'a> Allocator<'a> {
    /// Allocator over one session's policy and window
    pub fn new(policy: &'a HolidayPolicy, window: &'a CourseWindow) -> Self {
        Self { policy, window }
    }

    /// Replace all dates of `topic_id` with `date`, or clear them with `None`.
    pub fn set_single_date(
        &self,
        candidate: &mut CandidateSchedule,
        topic_id: &TopicId,
        date: Option<DateKey>,
    ) -> ScheduleResult<()> {
        let position = candidate.require_position(topic_id)?;
        candidate.replace_dates(position, date.into_iter().collect());
        debug!(topic_id = %topic_id, date = ?date.map(|d| d.to_string()), "Set single date");
        Ok(())
    }

    /// Give `topic_id` every valid day in `start..=end`, replacing its dates.
    ///
    /// Returns the assigned days.
    pub fn assign_range(
        &self,
        candidate: &mut CandidateSchedule,
        topic_id: &TopicId,
        start: DateKey,
        end: DateKey,
    ) -> ScheduleResult<Vec<DateKey>> {
        let days = enumerate_range(start, end)?;
        let position = candidate.require_position(topic_id)?;

        let valid: Vec<DateKey> =
            days.into_iter().filter(|day| self.policy.is_valid_day(*day)).collect();
        if valid.is_empty() {
            return Err(ScheduleError::NoValidDatesInRange {
                topic_id: topic_id.clone(),
                start,
                end,
            });
        }

        candidate.replace_dates(position, valid.clone());
        debug!(
            topic_id = %topic_id,
            start = %start,
            end = %end,
            assigned = valid.len(),
            "Assigned date range"
        );
        Ok(valid)
    }

    /// Walk forward from `start_date`, giving each topic from `start_topic`
    /// to the end of the module the next valid day.
    ///
    /// A start date before the course start is moved up to the course start.
    /// Topics before `start_topic` are never touched. When the course end is
    /// reached first, the placed topics keep their new dates and the
    /// remaining ones keep whatever they had; the outcome is reported as
    /// [`ScheduleError::IncompleteAssignment`].
    pub fn auto_assign(
        &self,
        candidate: &mut CandidateSchedule,
        start_topic: &TopicId,
        start_date: DateKey,
    ) -> ScheduleResult<Vec<TopicSchedule>> {
        let start_position = candidate.require_position(start_topic)?;
        let course_end = self.window.end_date;
        let remaining: Vec<TopicId> = candidate.slots()[start_position..]
            .iter()
            .map(|slot| slot.topic_id.clone())
            .collect();

        let mut cursor = Some(start_date.max(self.window.start_date));
        let mut assigned = Vec::with_capacity(remaining.len());

        for (offset, topic_id) in remaining.iter().enumerate() {
            let Some(day) = cursor.and_then(|from| self.policy.next_valid_day(from, course_end))
            else {
                let unplaced = remaining[offset..].to_vec();
                warn!(
                    start_topic = %start_topic,
                    course_end = %course_end,
                    placed = assigned.len(),
                    unplaced = unplaced.len(),
                    "Auto-assign ran out of valid days"
                );
                return Err(ScheduleError::IncompleteAssignment { assigned, unplaced, course_end });
            };

            candidate.replace_dates(start_position + offset, vec![day]);
            assigned.push(TopicSchedule::new(topic_id.clone(), day));
            cursor = day.next_day();
        }

        debug!(start_topic = %start_topic, placed = assigned.len(), "Auto-assigned dates");
        Ok(assigned)
    }
}

#[cfg(test)]
mod tests {
    use curricula_domain::{Module, Topic};

    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn january() -> CourseWindow {
        CourseWindow::new(key("2025-01-01"), key("2025-01-31"), [0], [key("2025-01-15")]).unwrap()
    }

    fn five_topics() -> Module {
        Module::new("m1", "Basics", (1..=5).map(|n| Topic::new(format!("t{n}"), format!("Topic {n}"))).collect())
    }

    fn id(s: &str) -> TopicId {
        TopicId::new(s)
    }

    #[test]
    fn manual_date_replaces_all_previous_dates() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        allocator.assign_range(&mut candidate, &id("t1"), key("2025-01-06"), key("2025-01-08")).unwrap();
        allocator.set_single_date(&mut candidate, &id("t1"), Some(key("2025-01-20"))).unwrap();
        assert_eq!(candidate.dates_of(&id("t1")), Some(&[key("2025-01-20")][..]));

        allocator.set_single_date(&mut candidate, &id("t1"), None).unwrap();
        assert_eq!(candidate.dates_of(&id("t1")), Some(&[][..]));
    }

    #[test]
    fn manual_date_may_fall_on_excluded_day() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        // Sunday and the holiday are both accepted as overrides
        allocator.set_single_date(&mut candidate, &id("t1"), Some(key("2025-01-12"))).unwrap();
        allocator.set_single_date(&mut candidate, &id("t2"), Some(key("2025-01-15"))).unwrap();
        assert_eq!(candidate.all_dates().count(), 2);
    }

    #[test]
    fn range_skips_holiday() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        let assigned = allocator
            .assign_range(&mut candidate, &id("t1"), key("2025-01-13"), key("2025-01-16"))
            .unwrap();
        assert_eq!(assigned, vec![key("2025-01-13"), key("2025-01-14"), key("2025-01-16")]);
        assert_eq!(candidate.dates_of(&id("t1")), Some(assigned.as_slice()));
    }

    #[test]
    fn range_skips_sunday_at_boundary() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        let assigned = allocator
            .assign_range(&mut candidate, &id("t1"), key("2025-01-12"), key("2025-01-14"))
            .unwrap();
        assert_eq!(assigned, vec![key("2025-01-13"), key("2025-01-14")]);
    }

    #[test]
    fn fully_excluded_range_is_rejected_without_changes() {
        let window = january();
        let policy = HolidayPolicy::new([0, 6], [key("2025-01-15")]).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());
        allocator.set_single_date(&mut candidate, &id("t1"), Some(key("2025-01-02"))).unwrap();

        let err = allocator
            .assign_range(&mut candidate, &id("t1"), key("2025-01-11"), key("2025-01-12"))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NoValidDatesInRange {
                topic_id: id("t1"),
                start: key("2025-01-11"),
                end: key("2025-01-12"),
            }
        );
        assert_eq!(candidate.dates_of(&id("t1")), Some(&[key("2025-01-02")][..]));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        let err = allocator
            .assign_range(&mut candidate, &id("t1"), key("2025-01-16"), key("2025-01-13"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange { .. }));
    }

    #[test]
    fn auto_assign_walks_forward_in_topic_order() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        // Fri 10th, Sat 11th, (Sun 12th skipped), Mon 13th, Tue 14th
        let placed = allocator.auto_assign(&mut candidate, &id("t1"), key("2025-01-10")).unwrap();
        let days: Vec<String> = placed.iter().map(|row| row.date.to_string()).collect();
        assert_eq!(days, ["2025-01-10", "2025-01-11", "2025-01-13", "2025-01-14", "2025-01-16"]);
    }

    #[test]
    fn auto_assign_leaves_earlier_topics_alone() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());
        allocator.set_single_date(&mut candidate, &id("t1"), Some(key("2025-01-02"))).unwrap();

        allocator.auto_assign(&mut candidate, &id("t2"), key("2025-01-20")).unwrap();

        assert_eq!(candidate.dates_of(&id("t1")), Some(&[key("2025-01-02")][..]));
        assert_eq!(candidate.dates_of(&id("t2")), Some(&[key("2025-01-20")][..]));
        assert_eq!(candidate.dates_of(&id("t5")), Some(&[key("2025-01-23")][..]));
    }

    #[test]
    fn auto_assign_stops_at_course_end() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());
        allocator.set_single_date(&mut candidate, &id("t5"), Some(key("2025-01-03"))).unwrap();

        let err = allocator.auto_assign(&mut candidate, &id("t3"), key("2025-01-30")).unwrap_err();

        assert_eq!(
            err,
            ScheduleError::IncompleteAssignment {
                assigned: vec![
                    TopicSchedule::new("t3", key("2025-01-30")),
                    TopicSchedule::new("t4", key("2025-01-31")),
                ],
                unplaced: vec![id("t5")],
                course_end: key("2025-01-31"),
            }
        );
        assert_eq!(candidate.dates_of(&id("t3")), Some(&[key("2025-01-30")][..]));
        assert_eq!(candidate.dates_of(&id("t4")), Some(&[key("2025-01-31")][..]));
        // unreached topic keeps its previous date
        assert_eq!(candidate.dates_of(&id("t5")), Some(&[key("2025-01-03")][..]));
    }

    #[test]
    fn auto_assign_clamps_start_to_course_start() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        let placed = allocator.auto_assign(&mut candidate, &id("t5"), key("2024-12-20")).unwrap();
        assert_eq!(placed, vec![TopicSchedule::new("t5", key("2025-01-01"))]);
    }

    #[test]
    fn auto_assign_past_course_end_places_nothing() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        let err = allocator.auto_assign(&mut candidate, &id("t4"), key("2025-02-03")).unwrap_err();
        match err {
            ScheduleError::IncompleteAssignment { assigned, unplaced, .. } => {
                assert!(assigned.is_empty());
                assert_eq!(unplaced, vec![id("t4"), id("t5")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(candidate.all_dates().count(), 0);
    }

    #[test]
    fn unknown_topic_is_rejected() {
        let window = january();
        let policy = HolidayPolicy::from_window(&window).unwrap();
        let allocator = Allocator::new(&policy, &window);
        let mut candidate = CandidateSchedule::for_module(&five_topics());

        let err = allocator.auto_assign(&mut candidate, &id("t9"), key("2025-01-06")).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownTopic { .. }));
    }
}
