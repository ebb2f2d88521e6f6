//! SQLite-backed implementation of the `ScheduleRepository` port.
//!
//! A module schedule is a header row in `module_schedules` plus one
//! `topic_schedules` row per (topic, date). Saves replace both inside a
//! single transaction.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use curricula_core::scheduling::ports::ScheduleRepository as ScheduleRepositoryPort;
use curricula_domain::{
    CourseId, CurriculaError, DateKey, ModuleId, ModuleSchedule, Result as DomainResult,
    TopicSchedule,
};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;
use tracing::debug;

use super::manager::DbManager;
use crate::errors::conversions::{map_join_error, map_sql_error};

const SELECT_ROWS_FOR_MODULE: &str = "SELECT topic_id, scheduled_date FROM topic_schedules \
     WHERE course_id = ?1 AND module_id = ?2 ORDER BY scheduled_date, topic_id";

const SELECT_ROWS_FOR_COURSE: &str = "SELECT module_id, topic_id, scheduled_date FROM topic_schedules \
     WHERE course_id = ?1 ORDER BY module_id, scheduled_date, topic_id";

/// SQLite-backed schedule repository.
pub struct SqliteScheduleRepository {
    db: Arc<DbManager>,
}

impl SqliteScheduleRepository {
    /// Create a new repository backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleRepositoryPort for SqliteScheduleRepository {
    async fn load_module_schedule(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> DomainResult<Option<ModuleSchedule>> {
        let db = Arc::clone(&self.db);
        let course_id = course_id.clone();
        let module_id = module_id.clone();

        task::spawn_blocking(move || -> DomainResult<Option<ModuleSchedule>> {
            let conn = db.get_connection()?;
            load_module(&conn, &course_id, &module_id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save_module_schedule(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
        rows: &[TopicSchedule],
        test_link: Option<&str>,
    ) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let course_id = course_id.clone();
        let module_id = module_id.clone();
        let rows = rows.to_vec();
        let test_link = test_link.map(str::to_owned);

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            replace_module(&mut conn, &course_id, &module_id, &rows, test_link.as_deref())
                .map_err(map_sql_error)?;
            debug!(
                course_id = %course_id,
                module_id = %module_id,
                rows = rows.len(),
                "Replaced module schedule rows"
            );
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn load_course_schedules(&self, course_id: &CourseId) -> DomainResult<Vec<ModuleSchedule>> {
        let db = Arc::clone(&self.db);
        let course_id = course_id.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<ModuleSchedule>> {
            let conn = db.get_connection()?;
            load_course(&conn, &course_id)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn load_module(
    conn: &Connection,
    course_id: &CourseId,
    module_id: &ModuleId,
) -> DomainResult<Option<ModuleSchedule>> {
    let header: Option<Option<String>> = conn
        .query_row(
            "SELECT test_link FROM module_schedules WHERE course_id = ?1 AND module_id = ?2",
            params![course_id.as_str(), module_id.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(map_sql_error)?;
    let Some(test_link) = header else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(SELECT_ROWS_FOR_MODULE).map_err(map_sql_error)?;
    let raw = stmt
        .query_map(params![course_id.as_str(), module_id.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;

    let rows = raw
        .into_iter()
        .map(|(topic_id, date)| Ok(TopicSchedule::new(topic_id, parse_stored_date(&date)?)))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(Some(ModuleSchedule {
        course_id: course_id.clone(),
        module_id: module_id.clone(),
        rows,
        test_link,
    }))
}

fn load_course(conn: &Connection, course_id: &CourseId) -> DomainResult<Vec<ModuleSchedule>> {
    let mut headers = conn
        .prepare(
            "SELECT module_id, test_link FROM module_schedules WHERE course_id = ?1 ORDER BY module_id",
        )
        .map_err(map_sql_error)?;
    let mut schedules: BTreeMap<String, ModuleSchedule> = headers
        .query_map(params![course_id.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(map_sql_error)?
        .map(|header| {
            header.map(|(module_id, test_link)| {
                let mut schedule =
                    ModuleSchedule::empty(course_id.clone(), ModuleId::new(module_id.clone()));
                schedule.test_link = test_link;
                (module_id, schedule)
            })
        })
        .collect::<rusqlite::Result<_>>()
        .map_err(map_sql_error)?;

    let mut stmt = conn.prepare(SELECT_ROWS_FOR_COURSE).map_err(map_sql_error)?;
    let raw = stmt
        .query_map(params![course_id.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;

    for (module_id, topic_id, date) in raw {
        let date = parse_stored_date(&date)?;
        if let Some(schedule) = schedules.get_mut(&module_id) {
            schedule.rows.push(TopicSchedule::new(topic_id, date));
        }
    }

    Ok(schedules.into_values().collect())
}

fn replace_module(
    conn: &mut Connection,
    course_id: &CourseId,
    module_id: &ModuleId,
    rows: &[TopicSchedule],
    test_link: Option<&str>,
) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM topic_schedules WHERE course_id = ?1 AND module_id = ?2",
        params![course_id.as_str(), module_id.as_str()],
    )?;
    tx.execute(
        "INSERT INTO module_schedules (course_id, module_id, test_link, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(course_id, module_id)
         DO UPDATE SET test_link = excluded.test_link, updated_at = excluded.updated_at",
        params![course_id.as_str(), module_id.as_str(), test_link, Utc::now().timestamp()],
    )?;

    {
        let mut insert = tx.prepare(
            "INSERT OR IGNORE INTO topic_schedules (course_id, module_id, topic_id, scheduled_date)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for row in rows {
            insert.execute(params![
                course_id.as_str(),
                module_id.as_str(),
                row.topic_id.as_str(),
                row.date.to_string()
            ])?;
        }
    }

    tx.commit()
}

fn parse_stored_date(value: &str) -> DomainResult<DateKey> {
    DateKey::parse(value).map_err(|err| {
        CurriculaError::Database(format!("corrupt scheduled date '{value}': {err}"))
    })
}
