//! In-memory repository for task records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{TaskCode, TaskId, TaskRecord},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, Visibility},
};

/// Thread-safe in-memory task repository.
///
/// Deleted records are kept, so reads with [`Visibility::IncludeDeleted`]
/// still see them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, TaskRecord>,
    insertion_order: Vec<TaskId>,
    active_code_index: HashMap<TaskCode, TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTaskState {
    fn active(&self, id: TaskId) -> Option<&TaskRecord> {
        self.tasks.get(&id).filter(|task| !task.is_deleted())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if state.active_code_index.contains_key(task.task_code()) {
            return Err(TaskRepositoryError::DuplicateTaskCode(
                task.task_code().clone(),
            ));
        }

        if !task.is_deleted() {
            state
                .active_code_index
                .insert(task.task_code().clone(), task.id());
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let previous_code = state
            .active(task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .task_code()
            .clone();

        if previous_code != *task.task_code() {
            if state.active_code_index.contains_key(task.task_code()) {
                return Err(TaskRepositoryError::DuplicateTaskCode(
                    task.task_code().clone(),
                ));
            }
            state.active_code_index.remove(&previous_code);
            state
                .active_code_index
                .insert(task.task_code().clone(), task.id());
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn soft_delete(
        &self,
        task_code: &TaskCode,
        deleted_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<TaskRecord> {
        let mut state = self.write_state()?;
        let id = state
            .active_code_index
            .remove(task_code)
            .ok_or_else(|| TaskRepositoryError::CodeNotFound(task_code.clone()))?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        let deleted = task.into_deleted(deleted_at);
        state.tasks.insert(id, deleted.clone());
        Ok(deleted)
    }

    async fn find_by_code(&self, task_code: &TaskCode) -> TaskRepositoryResult<Option<TaskRecord>> {
        let state = self.read_state()?;
        let task = state
            .active_code_index
            .get(task_code)
            .and_then(|id| state.active(*id))
            .cloned();
        Ok(task)
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        visibility: Visibility,
    ) -> TaskRepositoryResult<Option<TaskRecord>> {
        let state = self.read_state()?;
        let task = state
            .tasks
            .get(&id)
            .filter(|task| visibility.admits(task.is_deleted()))
            .cloned();
        Ok(task)
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<TaskRecord>> {
        let state = self.read_state()?;
        let tasks = state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        Ok(tasks)
    }
}
