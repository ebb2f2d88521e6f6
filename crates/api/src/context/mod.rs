//! Application context - dependency injection container

use std::fs;
use std::path::Path;
use std::sync::Arc;

use curricula_core::{CourseCatalog, ScheduleRepository, SchedulingService};
use curricula_domain::{Config, CurriculaError, Result};
use curricula_infra::{DbManager, SqliteCourseCatalog, SqliteScheduleRepository};
use tracing::info;

/// Type alias for schedule repository port trait object
pub type DynScheduleRepository = dyn ScheduleRepository;

/// Type alias for course catalog port trait object
pub type DynCourseCatalog = dyn CourseCatalog;

/// Application context holding all services
pub struct AppContext {
    /// Resolved configuration.
    pub config: Config,
    /// Schedule persistence port.
    pub schedules: Arc<DynScheduleRepository>,
    /// Course structure port.
    pub catalog: Arc<DynCourseCatalog>,
    /// Scheduling service over `schedules` and `catalog`.
    pub scheduling: SchedulingService,
    /// Writable course store; only present for database-backed contexts.
    pub course_store: Option<Arc<SqliteCourseCatalog>>,
    db: Option<Arc<DbManager>>,
}

impl AppContext {
    /// Create a database-backed context from configuration
    ///
    /// Creates the database directory if needed and applies the schema.
    pub fn new(config: Config) -> Result<Self> {
        ensure_parent_dir(Path::new(&config.database.path))?;

        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let schedules: Arc<DynScheduleRepository> =
            Arc::new(SqliteScheduleRepository::new(Arc::clone(&db)));
        let store = Arc::new(
            SqliteCourseCatalog::new(Arc::clone(&db))
                .with_default_excluded_weekdays(config.scheduling.default_excluded_weekdays.clone()),
        );
        let catalog: Arc<DynCourseCatalog> = store.clone();

        info!(
            database = %config.database.path,
            pool_size = config.database.pool_size,
            "Application context initialised"
        );

        Ok(Self {
            scheduling: SchedulingService::new(Arc::clone(&schedules), Arc::clone(&catalog)),
            schedules,
            catalog,
            course_store: Some(store),
            db: Some(db),
            config,
        })
    }

    /// Create a context over caller-provided ports
    pub fn with_ports(
        config: Config,
        schedules: Arc<DynScheduleRepository>,
        catalog: Arc<DynCourseCatalog>,
    ) -> Self {
        Self {
            scheduling: SchedulingService::new(Arc::clone(&schedules), Arc::clone(&catalog)),
            schedules,
            catalog,
            course_store: None,
            db: None,
            config,
        }
    }

    /// Check database connectivity. Contexts without a database are healthy.
    pub fn health_check(&self) -> Result<()> {
        self.db.as_ref().map_or(Ok(()), |db| db.health_check())
    }

    /// Database handle of a database-backed context
    pub fn db(&self) -> Option<&Arc<DbManager>> {
        self.db.as_ref()
    }
}

fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|err| {
        CurriculaError::Config(format!(
            "failed to create database directory {}: {}",
            parent.display(),
            err
        ))
    })
}
