use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curricula_core::scheduling::{Allocator, CandidateSchedule, HolidayPolicy, ScheduleIndex};
use curricula_domain::{CourseWindow, DateKey, Module, Topic};

fn day(offset: u64) -> DateKey {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    DateKey::from(base + Days::new(offset))
}

fn year_long_window() -> CourseWindow {
    let holidays = (0..365).step_by(17).map(day);
    CourseWindow::new(day(0), day(364), [0, 6], holidays).unwrap()
}

fn large_module(topics: usize) -> Module {
    Module::new(
        "bench",
        "Benchmark module",
        (0..topics).map(|n| Topic::new(format!("t{n}"), format!("Topic {n}"))).collect(),
    )
}

fn bench_index_build(c: &mut Criterion) {
    let dates: Vec<DateKey> = (0..2_000).map(|n| day((n * 7919) % 365)).collect();

    c.bench_function("schedule_index_build_2000_dates", |b| {
        b.iter(|| ScheduleIndex::build(black_box(dates.iter().copied())));
    });
}

fn bench_auto_assign(c: &mut Criterion) {
    let window = year_long_window();
    let policy = HolidayPolicy::from_window(&window).unwrap();
    let module = large_module(200);
    let start_topic = module.topics[0].id.clone();

    c.bench_function("auto_assign_200_topics_year_window", |b| {
        b.iter(|| {
            let allocator = Allocator::new(&policy, &window);
            let mut candidate = CandidateSchedule::for_module(&module);
            let placed = allocator.auto_assign(&mut candidate, &start_topic, black_box(day(0)));
            black_box(placed.map(|rows| rows.len()).unwrap_or_default())
        });
    });
}

criterion_group!(benches, bench_index_build, bench_auto_assign);
criterion_main!(benches);
