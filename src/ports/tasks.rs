//! Task service port.

use std::future::Future;
use std::pin::Pin;

use crate::board::{NewTask, TaskRecord};
use crate::drag::RemoteMoveRequest;
use crate::error::ApiError;

/// Boxed future type alias used by the remote ports to keep them dyn-compatible.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// The remote authority for task placement.
pub trait TaskApi: Send + Sync {
    /// Fetches every task belonging to the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user is not logged in.
    fn list_tasks(&self) -> ApiFuture<'_, Vec<TaskRecord>>;

    /// Creates a task and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the task.
    fn create_task<'a>(&'a self, task: &'a NewTask) -> ApiFuture<'a, TaskRecord>;

    /// Records that a task now lives in `request.new_status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the move is not acknowledged.
    fn move_task<'a>(&'a self, request: &'a RemoteMoveRequest) -> ApiFuture<'a, ()>;
}

impl<T: TaskApi + ?Sized> TaskApi for std::sync::Arc<T> {
    fn list_tasks(&self) -> ApiFuture<'_, Vec<TaskRecord>> {
        (**self).list_tasks()
    }

    fn create_task<'a>(&'a self, task: &'a NewTask) -> ApiFuture<'a, TaskRecord> {
        (**self).create_task(task)
    }

    fn move_task<'a>(&'a self, request: &'a RemoteMoveRequest) -> ApiFuture<'a, ()> {
        (**self).move_task(request)
    }
}
