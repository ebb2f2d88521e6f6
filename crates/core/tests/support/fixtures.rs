//! Course fixtures shared by integration tests

use curricula_domain::{
    Course, CourseId, CourseOutline, CourseWindow, DateKey, Module, ModuleId, ModuleSchedule,
    Topic, TopicSchedule,
};

pub fn key(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

pub fn course_id() -> CourseId {
    CourseId::new("dsa-2025")
}

/// January 2025, Sundays excluded, 2025-01-15 a holiday.
pub fn january_window() -> CourseWindow {
    CourseWindow::new(key("2025-01-01"), key("2025-01-31"), [0], [key("2025-01-15")]).unwrap()
}

/// `arrays` has five topics `t1..t5`, `graphs` has `g1` and `g2`.
pub fn january_course() -> Course {
    let outline = CourseOutline {
        title: "Data Structures".to_string(),
        modules: vec![
            Module::new(
                "arrays",
                "Arrays",
                (1..=5)
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
    Course::from_parts(course_id(), outline, january_window())
}

pub fn saved_schedule(module: &str, rows: &[(&str, &str)]) -> ModuleSchedule {
    let mut schedule = ModuleSchedule::empty(course_id(), ModuleId::new(module));
    schedule.rows = rows.iter().map(|(topic, date)| TopicSchedule::new(*topic, key(date))).collect();
    schedule
}
