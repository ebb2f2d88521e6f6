//! Shared setup for application-layer tests
#![allow(dead_code)]

use curricula_domain::{
    Config, Course, CourseId, CourseOutline, CourseWindow, DatabaseConfig, DateKey, Module,
    ModuleId, Topic, TopicId,
};
use curricula_lib::commands;
use curricula_lib::context::AppContext;
use tempfile::TempDir;

pub fn key(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

pub fn course_id() -> CourseId {
    CourseId::new("dsa-2025")
}

pub fn arrays() -> ModuleId {
    ModuleId::new("arrays")
}

pub fn graphs() -> ModuleId {
    ModuleId::new("graphs")
}

pub fn topic(id: &str) -> TopicId {
    TopicId::new(id)
}

/// January 2025, Sundays excluded, 2025-01-10 a holiday.
///
/// `arrays` has `t1..t3`, `graphs` has `g1` and `g2`.
pub fn january_course() -> Course {
    let window =
        CourseWindow::new(key("2025-01-01"), key("2025-01-31"), [0], [key("2025-01-10")]).unwrap();
    let outline = CourseOutline {
        title: "Data Structures".to_string(),
        modules: vec![
            Module::new(
                "arrays",
                "Arrays",
                (1..=3)
                    .map(|n| Topic::new(format!("t{n}"), format!("Arrays {n}")).with_problem_count(n))
                    .collect(),
            ),
            Module::new(
                "graphs",
                "Graphs",
                vec![Topic::new("g1", "BFS"), Topic::new("g2", "DFS").with_problem_count(4)],
            ),
        ],
    };
    Course::from_parts(course_id(), outline, window)
}

/// Database-backed context in a temporary directory.
///
/// The returned directory must outlive the context.
pub fn create_test_context() -> (AppContext, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temporary test directory");
    let db_path = temp_dir.path().join("data").join("curricula.db");

    let config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 4 },
        ..Config::default()
    };

    let ctx = AppContext::new(config).expect("failed to create test context");
    (ctx, temp_dir)
}

/// Context with [`january_course`] imported.
pub async fn seeded_context() -> (AppContext, TempDir) {
    let (ctx, temp_dir) = create_test_context();
    commands::import_course(&ctx, january_course()).await.expect("course imported");
    (ctx, temp_dir)
}
