//! Task use-case service.

use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::user::PublicUser;
use crate::model::{CustomerId, ModelValidationError, TaskId};
use crate::repo::Storage;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    TaskNotFound(TaskId),
    Validation(ModelValidationError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<ModelValidationError> for TaskServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type TaskResult<T> = Result<T, TaskServiceError>;

pub struct TaskService<'a, S: Storage> {
    store: &'a mut S,
}

impl<'a, S: Storage> TaskService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn list_tasks(&self) -> Vec<Task> {
        self.store.list_tasks()
    }

    pub fn get_task(&self, id: TaskId) -> TaskResult<Task> {
        self.store
            .get_task(id)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Tasks linked to `customer_id`. Referenced customers are not checked.
    pub fn tasks_for_customer(&self, customer_id: CustomerId) -> Vec<Task> {
        self.store.get_tasks_by_customer(customer_id)
    }

    pub fn create_task(&mut self, actor: &PublicUser, task: NewTask) -> TaskResult<Task> {
        let task = NewTask {
            created_by: Some(actor.id),
            ..task
        };
        task.validate()?;
        Ok(self.store.create_task(task))
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> TaskResult<Task> {
        self.store
            .update_task(id, patch.without_blank_fields())
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    pub fn delete_task(&mut self, id: TaskId) -> TaskResult<()> {
        if self.store.delete_task(id) {
            Ok(())
        } else {
            Err(TaskServiceError::TaskNotFound(id))
        }
    }
}
