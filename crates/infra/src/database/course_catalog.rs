//! SQLite-backed implementation of the `CourseCatalog` port.
//!
//! Course structure is owned by course authoring; this adapter reads it for
//! scheduling and offers `save_course` for seeding.

use std::sync::Arc;

use async_trait::async_trait;
use curricula_core::scheduling::ports::CourseCatalog as CourseCatalogPort;
use curricula_domain::constants::{DAYS_PER_WEEK, DEFAULT_EXCLUDED_WEEKDAYS};
use curricula_domain::{
    Course, CourseId, CourseOutline, CourseWindow, CurriculaError, DateKey, Module, Result as DomainResult,
    Topic,
};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;
use tracing::{debug, info};

use super::manager::DbManager;
use crate::errors::conversions::{map_join_error, map_sql_error};

/// SQLite-backed course catalog.
pub struct SqliteCourseCatalog {
    db: Arc<DbManager>,
    default_excluded_weekdays: Vec<u8>,
}

impl SqliteCourseCatalog {
    /// Create a new catalog backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db, default_excluded_weekdays: DEFAULT_EXCLUDED_WEEKDAYS.to_vec() }
    }

    /// Weekdays to exclude for courses stored without any recorded exclusions.
    pub fn with_default_excluded_weekdays(mut self, weekdays: Vec<u8>) -> Self {
        self.default_excluded_weekdays = weekdays;
        self
    }

    /// Load window and outline together.
    pub async fn get_course(&self, course_id: &CourseId) -> DomainResult<Course> {
        let db = Arc::clone(&self.db);
        let defaults = self.default_excluded_weekdays.clone();
        let course_id = course_id.clone();

        task::spawn_blocking(move || -> DomainResult<Course> {
            let conn = db.get_connection()?;
            let window = read_window(&conn, &course_id, &defaults)?;
            let outline = read_outline(&conn, &course_id)?;
            Ok(Course::from_parts(course_id, outline, window))
        })
        .await
        .map_err(map_join_error)?
    }

    /// Insert or fully replace a course, its holidays, modules and topics.
    pub async fn save_course(&self, course: &Course) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let course = course.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            write_course(&mut conn, &course).map_err(map_sql_error)?;
            info!(course_id = %course.id, modules = course.modules.len(), "Saved course outline");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl CourseCatalogPort for SqliteCourseCatalog {
    async fn get_course_window(&self, course_id: &CourseId) -> DomainResult<CourseWindow> {
        let db = Arc::clone(&self.db);
        let defaults = self.default_excluded_weekdays.clone();
        let course_id = course_id.clone();

        task::spawn_blocking(move || -> DomainResult<CourseWindow> {
            let conn = db.get_connection()?;
            read_window(&conn, &course_id, &defaults)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_course_outline(&self, course_id: &CourseId) -> DomainResult<CourseOutline> {
        let db = Arc::clone(&self.db);
        let course_id = course_id.clone();

        task::spawn_blocking(move || -> DomainResult<CourseOutline> {
            let conn = db.get_connection()?;
            read_outline(&conn, &course_id)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn read_window(
    conn: &Connection,
    course_id: &CourseId,
    default_excluded_weekdays: &[u8],
) -> DomainResult<CourseWindow> {
    let row: Option<(String, String, Option<String>)> = conn
        .query_row(
            "SELECT start_date, end_date, excluded_weekdays FROM courses WHERE id = ?1",
            params![course_id.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(map_sql_error)?;
    let (start, end, weekdays) =
        row.ok_or_else(|| CurriculaError::NotFound(format!("course {course_id}")))?;

    let excluded_weekdays = match weekdays {
        Some(list) => parse_weekdays(&list)?,
        None => {
            debug!(course_id = %course_id, "No weekday exclusions recorded, using defaults");
            default_excluded_weekdays.to_vec()
        }
    };

    let mut stmt = conn
        .prepare(
            "SELECT holiday_date FROM course_holidays WHERE course_id = ?1 ORDER BY holiday_date",
        )
        .map_err(map_sql_error)?;
    let holidays = stmt
        .query_map(params![course_id.as_str()], |row| row.get::<_, String>(0))
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?
        .iter()
        .map(|value| parse_stored_date(value))
        .collect::<DomainResult<Vec<_>>>()?;

    CourseWindow::new(parse_stored_date(&start)?, parse_stored_date(&end)?, excluded_weekdays, holidays)
}

fn read_outline(conn: &Connection, course_id: &CourseId) -> DomainResult<CourseOutline> {
    let title: String = conn
        .query_row("SELECT title FROM courses WHERE id = ?1", params![course_id.as_str()], |row| {
            row.get(0)
        })
        .optional()
        .map_err(map_sql_error)?
        .ok_or_else(|| CurriculaError::NotFound(format!("course {course_id}")))?;

    let mut module_stmt = conn
        .prepare("SELECT id, name FROM modules WHERE course_id = ?1 ORDER BY position, id")
        .map_err(map_sql_error)?;
    let module_rows = module_stmt
        .query_map(params![course_id.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;

    let mut topic_stmt = conn
        .prepare(
            "SELECT id, name, description, problem_count FROM topics
             WHERE course_id = ?1 AND module_id = ?2 ORDER BY position, id",
        )
        .map_err(map_sql_error)?;

    let mut modules = Vec::with_capacity(module_rows.len());
    for (module_id, name) in module_rows {
        let topics = topic_stmt
            .query_map(params![course_id.as_str(), module_id], |row| {
                Ok(Topic {
                    id: row.get::<_, String>(0)?.into(),
                    name: row.get(1)?,
                    description: row.get(2)?,
                    problem_count: row.get(3)?,
                })
            })
            .map_err(map_sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sql_error)?;
        modules.push(Module::new(module_id, name, topics));
    }

    Ok(CourseOutline { title, modules })
}

fn write_course(conn: &mut Connection, course: &Course) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    let course_id = course.id.as_str();
    let window = &course.window;
    let weekdays = window
        .excluded_weekdays
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    tx.execute(
        "INSERT INTO courses (id, title, start_date, end_date, excluded_weekdays)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
             title = excluded.title,
             start_date = excluded.start_date,
             end_date = excluded.end_date,
             excluded_weekdays = excluded.excluded_weekdays",
        params![
            course_id,
            course.title,
            window.start_date.to_string(),
            window.end_date.to_string(),
            weekdays
        ],
    )?;
    tx.execute("DELETE FROM course_holidays WHERE course_id = ?1", params![course_id])?;
    tx.execute("DELETE FROM topics WHERE course_id = ?1", params![course_id])?;
    tx.execute("DELETE FROM modules WHERE course_id = ?1", params![course_id])?;

    {
        let mut holiday = tx
            .prepare("INSERT INTO course_holidays (course_id, holiday_date) VALUES (?1, ?2)")?;
        for date in &window.custom_holidays {
            holiday.execute(params![course_id, date.to_string()])?;
        }

        let mut module_insert = tx.prepare(
            "INSERT INTO modules (course_id, id, name, position) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut topic_insert = tx.prepare(
            "INSERT INTO topics (course_id, module_id, id, name, description, problem_count, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (module_position, module) in course.modules.iter().enumerate() {
            module_insert.execute(params![
                course_id,
                module.id.as_str(),
                module.name,
                position(module_position)
            ])?;
            for (topic_position, topic) in module.topics.iter().enumerate() {
                topic_insert.execute(params![
                    course_id,
                    module.id.as_str(),
                    topic.id.as_str(),
                    topic.name,
                    topic.description,
                    topic.problem_count,
                    position(topic_position)
                ])?;
            }
        }
    }

    tx.commit()
}

fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

fn parse_weekdays(list: &str) -> DomainResult<Vec<u8>> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .ok()
                .filter(|day| *day < DAYS_PER_WEEK)
                .ok_or_else(|| CurriculaError::Database(format!("corrupt excluded weekday '{part}'")))
        })
        .collect()
}

fn parse_stored_date(value: &str) -> DomainResult<DateKey> {
    DateKey::parse(value)
        .map_err(|err| CurriculaError::Database(format!("corrupt course date '{value}': {err}")))
}
