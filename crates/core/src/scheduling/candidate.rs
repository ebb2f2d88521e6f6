//! In-memory candidate schedule for one module
//!
//! A topic owns a list of dates. Manual single-date entry is the special case
//! of a one-element list.

use std::collections::HashMap;

use curricula_domain::{DateKey, Module, ModuleId, TopicId, TopicSchedule};
use serde::Serialize;
use tracing::warn;

use super::error::{ScheduleError, ScheduleResult};

/// Dates currently held by one topic, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSlot {
    /// Topic id.
    pub topic_id: TopicId,
    /// Held dates, ascending.
    pub dates: Vec<DateKey>,
}

/// Not-yet-persisted topic→dates assignments, in the module's declared topic
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSchedule {
    module_id: ModuleId,
    slots: Vec<TopicSlot>,
}

impl CandidateSchedule {
    /// Empty candidate with one slot per topic.
    pub fn for_module(module: &Module) -> Self {
        let slots = module
            .topics
            .iter()
            .map(|topic| TopicSlot { topic_id: topic.id.clone(), dates: Vec::new() })
            .collect();
        Self { module_id: module.id.clone(), slots }
    }

    /// Group persisted rows by topic.
    ///
    /// Each topic's dates are sorted and deduplicated. Rows for topics no
    /// longer in the module are dropped and will not be written back.
    pub fn from_rows(module: &Module, rows: &[TopicSchedule]) -> Self {
        let mut candidate = Self::for_module(module);
        let positions: HashMap<&TopicId, usize> =
            candidate.slots.iter().enumerate().map(|(idx, slot)| (&slot.topic_id, idx)).collect();

        let mut grouped: Vec<Vec<DateKey>> = vec![Vec::new(); candidate.slots.len()];
        for row in rows {
            match positions.get(&row.topic_id) {
                Some(&idx) => grouped[idx].push(row.date),
                None => warn!(
                    module_id = %module.id,
                    topic_id = %row.topic_id,
                    date = %row.date,
                    "Dropping schedule row for topic outside module"
                ),
            }
        }

        for (slot, mut dates) in candidate.slots.iter_mut().zip(grouped) {
            dates.sort_unstable();
            dates.dedup();
            slot.dates = dates;
        }
        candidate
    }

    /// Module this candidate schedules.
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    /// Slots in declared topic order.
    pub fn slots(&self) -> &[TopicSlot] {
        &self.slots
    }

    /// Declared position of a topic, if it belongs to the module.
    pub fn position_of(&self, topic_id: &TopicId) -> Option<usize> {
        self.slots.iter().position(|slot| &slot.topic_id == topic_id)
    }

    /// Dates held by a topic; `None` for topics outside the module.
    pub fn dates_of(&self, topic_id: &TopicId) -> Option<&[DateKey]> {
        self.slots.iter().find(|slot| &slot.topic_id == topic_id).map(|slot| slot.dates.as_slice())
    }

    /// Position of `topic_id`, or `UnknownTopic`.
    pub(crate) fn require_position(&self, topic_id: &TopicId) -> ScheduleResult<usize> {
        self.position_of(topic_id).ok_or_else(|| ScheduleError::UnknownTopic {
            topic_id: topic_id.clone(),
            module_id: self.module_id.clone(),
        })
    }

    /// Replace every date of the slot at `position`.
    pub(crate) fn replace_dates(&mut self, position: usize, mut dates: Vec<DateKey>) {
        if let Some(slot) = self.slots.get_mut(position) {
            dates.sort_unstable();
            dates.dedup();
            slot.dates = dates;
        }
    }

    /// Drop every date while keeping all slots.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            slot.dates.clear();
        }
    }

    /// Every date held by any topic.
    pub fn all_dates(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.slots.iter().flat_map(|slot| slot.dates.iter().copied())
    }

    /// One row per (topic, date); a topic with three dates yields three rows.
    pub fn flatten(&self) -> Vec<TopicSchedule> {
        self.slots
            .iter()
            .flat_map(|slot| {
                slot.dates.iter().map(|date| TopicSchedule::new(slot.topic_id.clone(), *date))
            })
            .collect()
    }
}
