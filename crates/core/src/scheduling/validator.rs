//! Save-time validation
//!
//! Runs over every schedule of a course at once: the module being saved plus
//! the saved schedules of its siblings. Window containment is checked for
//! all rows before any uniqueness check, so an out-of-window date is always
//! reported ahead of a collision.

use std::collections::HashMap;

use curricula_domain::{Course, DateKey, ModuleId, ModuleSchedule, TopicId};

use super::error::{ScheduleError, ScheduleResult, TopicRef, WindowBounds};

/// Check window containment and date uniqueness across `schedules`.
///
/// The same topic listed twice on the same date is not a collision.
pub fn validate<'a, I>(course: &Course, schedules: I) -> ScheduleResult<()>
where
    I: IntoIterator<Item = &'a ModuleSchedule>,
{
    let schedules: Vec<&ModuleSchedule> = schedules.into_iter().collect();
    let window = &course.window;

    for schedule in &schedules {
        for row in &schedule.rows {
            if !window.contains(row.date) {
                return Err(ScheduleError::WindowViolation {
                    topic: topic_ref(course, &schedule.module_id, &row.topic_id),
                    date: row.date,
                    window: WindowBounds {
                        start_date: window.start_date,
                        end_date: window.end_date,
                    },
                });
            }
        }
    }

    let mut seen: HashMap<DateKey, (&ModuleId, &TopicId)> = HashMap::new();
    for schedule in &schedules {
        for row in &schedule.rows {
            match seen.get(&row.date) {
                Some(&(module_id, topic_id))
                    if module_id == &schedule.module_id && topic_id == &row.topic_id => {}
                Some(&(module_id, topic_id)) => {
                    return Err(ScheduleError::DateCollision {
                        date: row.date,
                        first: topic_ref(course, module_id, topic_id),
                        second: topic_ref(course, &schedule.module_id, &row.topic_id),
                    });
                }
                None => {
                    seen.insert(row.date, (&schedule.module_id, &row.topic_id));
                }
            }
        }
    }

    Ok(())
}

/// Resolve display names, falling back to raw ids for anything the course
/// outline no longer lists.
fn topic_ref(course: &Course, module_id: &ModuleId, topic_id: &TopicId) -> TopicRef {
    let module = course.module(module_id);
    let topic = module.and_then(|m| m.topic(topic_id));
    TopicRef {
        topic_id: topic_id.clone(),
        topic_name: topic.map_or_else(|| topic_id.to_string(), |t| t.name.clone()),
        module_id: module_id.clone(),
        module_name: module.map_or_else(|| module_id.to_string(), |m| m.name.clone()),
    }
}
