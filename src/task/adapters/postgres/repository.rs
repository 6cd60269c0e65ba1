//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::config::{ConfigError, DatabaseConfig};
use crate::entity::EntityMetadata;
use crate::task::{
    domain::{ProjectCode, TaskCode, TaskFields, TaskId, TaskRecord, TaskStatus, Username},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, Visibility},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Partial unique index over `task_code` for rows with `is_deleted = false`.
const ACTIVE_TASK_CODE_INDEX: &str = "idx_tasks_task_code_active";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a repository over a new pool sized from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when no database URL is
    /// configured or the pool cannot open its first connection.
    pub fn connect(config: &DatabaseConfig) -> TaskRepositoryResult<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|_| config.is_configured())
            .ok_or_else(|| {
                TaskRepositoryError::persistence(ConfigError::NotConfigured {
                    section: "database".to_owned(),
                })
            })?;
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .build(ConnectionManager::<PgConnection>::new(url))
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let task_code = task.task_code().clone();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            // The partial unique index still guards the window between this
            // check and the insert.
            let lookup = TaskFilter::new().with_task_code(task_code.clone());
            if !load_tasks(connection, &lookup, None)?.is_empty() {
                return Err(TaskRepositoryError::DuplicateTaskCode(task_code));
            }

            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, task_id, &task_code))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let task_code = task.task_code().clone();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .filter(tasks::is_deleted.eq(false));
            let affected = diesel::update(target)
                .set(&changeset)
                .execute(connection)
                .map_err(|err| map_write_error(err, task_id, &task_code))?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn soft_delete(
        &self,
        task_code: &TaskCode,
        deleted_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<TaskRecord> {
        let code = task_code.clone();

        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::task_code.eq(code.as_str()))
                .filter(tasks::is_deleted.eq(false));
            let row = diesel::update(target)
                .set((tasks::is_deleted.eq(true), tasks::updated_at.eq(deleted_at)))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or_else(|| TaskRepositoryError::CodeNotFound(code.clone()))?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_code(&self, task_code: &TaskCode) -> TaskRepositoryResult<Option<TaskRecord>> {
        let filter = TaskFilter::new().with_task_code(task_code.clone());
        self.run_blocking(move |connection| {
            Ok(load_tasks(connection, &filter, None)?.into_iter().next())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        visibility: Visibility,
    ) -> TaskRepositoryResult<Option<TaskRecord>> {
        let filter = TaskFilter::new().with_visibility(visibility);
        self.run_blocking(move |connection| {
            Ok(load_tasks(connection, &filter, Some(id))?.into_iter().next())
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<TaskRecord>> {
        let owned_filter = filter.clone();
        self.run_blocking(move |connection| load_tasks(connection, &owned_filter, None))
            .await
    }
}

/// Builds and runs the single read query used by every lookup.
///
/// The soft-delete predicate is added here, at query construction, from the
/// filter's [`Visibility`].
fn load_tasks(
    connection: &mut PgConnection,
    filter: &TaskFilter,
    id: Option<TaskId>,
) -> TaskRepositoryResult<Vec<TaskRecord>> {
    let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();

    if filter.visibility() == Visibility::ActiveOnly {
        query = query.filter(tasks::is_deleted.eq(false));
    }
    if let Some(task_id) = id {
        query = query.filter(tasks::id.eq(task_id.into_inner()));
    }
    if let Some(code) = filter.task_code() {
        query = query.filter(tasks::task_code.eq(code.as_str().to_owned()));
    }
    if let Some(project) = filter.project_code() {
        query = query.filter(tasks::project_code.eq(project.as_str().to_owned()));
    }
    if let Some(employee) = filter.assigned_employee() {
        query = query.filter(tasks::assigned_employee.eq(employee.as_str().to_owned()));
    }
    if let Some(manager) = filter.assigned_manager() {
        query = query.filter(tasks::assigned_manager.eq(manager.as_str().to_owned()));
    }
    if let Some(status) = filter.status() {
        query = query.filter(tasks::task_status.eq(status.as_str()));
    }

    let rows = query
        .order((tasks::created_at.asc(), tasks::id.asc()))
        .load::<TaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    rows.into_iter().map(row_to_task).collect()
}

fn to_new_row(task: &TaskRecord) -> NewTaskRow {
    let fields = task.fields();
    NewTaskRow {
        id: task.id().into_inner(),
        task_code: fields.task_code.as_str().to_owned(),
        task_subject: fields.task_subject.clone(),
        task_detail: fields.task_detail.clone(),
        task_status: fields.task_status.as_str().to_owned(),
        assigned_date: fields.assigned_date,
        project_code: fields.project_code.as_str().to_owned(),
        assigned_employee: fields.assigned_employee.as_str().to_owned(),
        assigned_manager: fields.assigned_manager.as_str().to_owned(),
        is_deleted: task.is_deleted(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &TaskRecord) -> TaskChangeset {
    let fields = task.fields();
    TaskChangeset {
        task_code: fields.task_code.as_str().to_owned(),
        task_subject: fields.task_subject.clone(),
        task_detail: fields.task_detail.clone(),
        task_status: fields.task_status.as_str().to_owned(),
        assigned_date: fields.assigned_date,
        project_code: fields.project_code.as_str().to_owned(),
        assigned_employee: fields.assigned_employee.as_str().to_owned(),
        assigned_manager: fields.assigned_manager.as_str().to_owned(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<TaskRecord> {
    let TaskRow {
        id,
        task_code,
        task_subject,
        task_detail,
        task_status,
        assigned_date,
        project_code,
        assigned_employee,
        assigned_manager,
        is_deleted,
        created_at,
        updated_at,
    } = row;

    let fields = TaskFields {
        task_code: TaskCode::new(task_code).map_err(TaskRepositoryError::persistence)?,
        task_subject,
        task_detail,
        task_status: TaskStatus::try_from(task_status.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        assigned_date,
        project_code: ProjectCode::new(project_code).map_err(TaskRepositoryError::persistence)?,
        assigned_employee: Username::new(assigned_employee)
            .map_err(TaskRepositoryError::persistence)?,
        assigned_manager: Username::new(assigned_manager)
            .map_err(TaskRepositoryError::persistence)?,
    };
    let metadata =
        EntityMetadata::from_persisted(TaskId::from_uuid(id), created_at, updated_at, is_deleted);
    Ok(TaskRecord::from_persisted(metadata, fields))
}

fn map_write_error(err: DieselError, task_id: TaskId, task_code: &TaskCode) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_task_code_unique_violation(info.as_ref()) =>
        {
            TaskRepositoryError::DuplicateTaskCode(task_code.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTask(task_id)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn is_task_code_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == ACTIVE_TASK_CODE_INDEX)
}
