//! Task/meeting use-case service.
//!
//! # Responsibility
//! - Provide task list and calendar entry points.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Mutations read the row back so callers always see persisted state.

use crate::model::school::SchoolId;
use crate::model::task::{TaskId, TaskRecord};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Target task does not exist or is soft-deleted.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a task or meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    pub due_date: NaiveDate,
    /// Optional wall-clock time; `None` means the 09:00 default applies.
    pub due_time: Option<NaiveTime>,
    pub school: Option<SchoolId>,
    pub is_meeting: bool,
}

/// Use-case service wrapper for tasks and meetings.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one task or meeting and returns persisted state.
    pub fn create_task(&self, request: &NewTaskRequest) -> Result<TaskRecord, TaskServiceError> {
        let mut task = TaskRecord::new(request.title.clone(), request.due_date);
        task.due_time = request.due_time;
        task.school_uuid = request.school;
        task.is_meeting = request.is_meeting;

        let id = self.repo.create_task(&task)?;
        self.repo
            .get_task(id, false)?
            .ok_or(TaskServiceError::InconsistentState(
                "created task not found in read-back",
            ))
    }

    /// Updates an existing task by stable ID.
    pub fn update_task(&self, task: &TaskRecord) -> Result<TaskRecord, TaskServiceError> {
        self.repo.update_task(task)?;
        self.repo
            .get_task(task.uuid, true)?
            .ok_or(TaskServiceError::InconsistentState(
                "updated task not found in read-back",
            ))
    }

    /// Marks one task complete.
    pub fn complete_task(&self, id: TaskId) -> Result<TaskRecord, TaskServiceError> {
        self.set_completed(id, true)
    }

    /// Reopens one completed task.
    pub fn reopen_task(&self, id: TaskId) -> Result<TaskRecord, TaskServiceError> {
        self.set_completed(id, false)
    }

    /// Moves one task to a new date and optional time.
    pub fn reschedule_task(
        &self,
        id: TaskId,
        due_date: NaiveDate,
        due_time: Option<NaiveTime>,
    ) -> Result<TaskRecord, TaskServiceError> {
        let mut task = self
            .repo
            .get_task(id, false)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        task.due_date = due_date;
        task.due_time = due_time;
        self.update_task(&task)
    }

    /// Gets one task by ID with optional deleted-row visibility.
    pub fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskRecord>> {
        self.repo.get_task(id, include_deleted)
    }

    /// Lists tasks using filter and pagination options.
    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>> {
        self.repo.list_tasks(query)
    }

    /// All incomplete, active tasks. Input set for reminder computation.
    pub fn list_open(&self) -> RepoResult<Vec<TaskRecord>> {
        self.repo.list_open()
    }

    /// Soft-deletes a task by ID.
    pub fn soft_delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.soft_delete_task(id)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> Result<TaskRecord, TaskServiceError> {
        self.repo.set_completed(id, completed)?;
        self.repo
            .get_task(id, false)?
            .ok_or(TaskServiceError::InconsistentState(
                "task missing after completion toggle",
            ))
    }
}
