//! In-memory adapters.
//!
//! These back the ports with plain maps so the board, the ledger and the
//! commands can be exercised without a disk or a task service.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::board::{NewTask, TaskRecord};
use crate::drag::RemoteMoveRequest;
use crate::error::ApiError;
use crate::ports::{ApiFuture, AuthApi, Clock, FileSystem, TaskApi, TokenPair};
use crate::session::{Session, User};

/// Filesystem kept in a map of path to contents.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().expect("filesystem lock poisoned");
        files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("filesystem lock poisoned");
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().expect("filesystem lock poisoned");
        files.contains_key(path)
    }

    fn remove(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("filesystem lock poisoned");
        files.remove(path);
        Ok(())
    }
}

/// Clock frozen at one instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at an RFC 3339 timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` is not valid RFC 3339.
    #[must_use]
    pub fn at(timestamp: &str) -> Self {
        let parsed = DateTime::parse_from_rfc3339(timestamp).expect("invalid RFC 3339 timestamp");
        Self(parsed.with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
struct ServiceState {
    tasks: Vec<TaskRecord>,
    accounts: HashMap<String, (User, String)>,
    failing_moves: HashSet<String>,
    moves: Vec<RemoteMoveRequest>,
    next_id: u64,
}

/// Task and auth service held in memory.
///
/// Created tasks are added to the front of the list, matching how the board
/// shows them. Moves for ids registered with [`fail_moves_for`] are refused.
///
/// [`fail_moves_for`]: MemoryTaskService::fail_moves_for
#[derive(Default)]
pub struct MemoryTaskService {
    state: Mutex<ServiceState>,
}

impl MemoryTaskService {
    /// Creates a service holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
        let service = Self::default();
        service.lock().tasks = tasks;
        service
    }

    /// Registers an account that `login` will accept.
    pub fn register(&self, user: User, password: &str) {
        self.lock().accounts.insert(user.email.clone(), (user, password.to_string()));
    }

    /// Makes every future move of `task_id` fail.
    pub fn fail_moves_for(&self, task_id: &str) {
        self.lock().failing_moves.insert(task_id.to_string());
    }

    /// Moves accepted so far, oldest first.
    #[must_use]
    pub fn moves(&self) -> Vec<RemoteMoveRequest> {
        self.lock().moves.clone()
    }

    /// Current server-side task list.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServiceState> {
        self.state.lock().expect("task service lock poisoned")
    }

    fn issue_tokens(state: &mut ServiceState, user: &User) -> TokenPair {
        state.next_id += 1;
        TokenPair {
            access_token: format!("access-{}-{}", user.id, state.next_id),
            refresh_token: format!("refresh-{}-{}", user.id, state.next_id),
        }
    }

    fn session_for(&self, user: User) -> Session {
        let tokens = Self::issue_tokens(&mut self.lock(), &user);
        Session::new(user, tokens, Utc::now())
    }
}

impl TaskApi for MemoryTaskService {
    fn list_tasks(&self) -> ApiFuture<'_, Vec<TaskRecord>> {
        Box::pin(async move { Ok(self.tasks()) })
    }

    fn create_task<'a>(&'a self, task: &'a NewTask) -> ApiFuture<'a, TaskRecord> {
        Box::pin(async move {
            let mut state = self.lock();
            state.next_id += 1;
            let record = TaskRecord {
                id: format!("task-{}", state.next_id),
                title: task.title.clone(),
                description: task.description.clone(),
                priority: task.priority,
                status: task.status,
                due_date: task.due_date,
            };
            state.tasks.insert(0, record.clone());
            Ok(record)
        })
    }

    fn move_task<'a>(&'a self, request: &'a RemoteMoveRequest) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.lock();
            if state.failing_moves.contains(&request.task_id) {
                return Err(ApiError::Status { status: 500, message: "Move rejected".into() });
            }
            let Some(task) = state.tasks.iter_mut().find(|task| task.id == request.task_id) else {
                return Err(ApiError::Status { status: 404, message: "Task not found".into() });
            };
            task.status = request.new_status;
            state.moves.push(request.clone());
            Ok(())
        })
    }
}

impl AuthApi for MemoryTaskService {
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> ApiFuture<'a, Session> {
        Box::pin(async move {
            let account = self.lock().accounts.get(email).cloned();
            match account {
                Some((user, expected)) if expected == password => Ok(self.session_for(user)),
                _ => Err(ApiError::Status { status: 401, message: "Invalid credentials".into() }),
            }
        })
    }

    fn signup<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> ApiFuture<'a, Session> {
        Box::pin(async move {
            if self.lock().accounts.contains_key(email) {
                return Err(ApiError::Status { status: 409, message: "Email already registered".into() });
            }
            let user = User {
                id: format!("user-{}", email.len()),
                name: name.to_string(),
                email: email.to_string(),
            };
            self.register(user.clone(), password);
            Ok(self.session_for(user))
        })
    }

    fn refresh<'a>(&'a self, session: &'a Session) -> ApiFuture<'a, TokenPair> {
        Box::pin(async move { Ok(Self::issue_tokens(&mut self.lock(), &session.user)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::record;
    use crate::board::Status;

    #[tokio::test]
    async fn moves_update_status_and_are_recorded() {
        let service = MemoryTaskService::with_tasks(vec![record("a", Status::Pending)]);
        let request = RemoteMoveRequest { task_id: "a".into(), new_status: Status::Done };

        service.move_task(&request).await.unwrap();

        assert_eq!(service.tasks()[0].status, Status::Done);
        assert_eq!(service.moves(), vec![request]);
    }

    #[tokio::test]
    async fn failing_and_unknown_moves_are_refused() {
        let service = MemoryTaskService::with_tasks(vec![record("a", Status::Pending)]);
        service.fail_moves_for("a");

        let failing = RemoteMoveRequest { task_id: "a".into(), new_status: Status::Done };
        assert!(service.move_task(&failing).await.is_err());
        let unknown = RemoteMoveRequest { task_id: "b".into(), new_status: Status::Done };
        assert!(service.move_task(&unknown).await.is_err());
        assert!(service.moves().is_empty());
    }

    #[tokio::test]
    async fn signup_then_login() {
        let service = MemoryTaskService::default();
        service.signup("Ada", "ada@example.com", "pw").await.unwrap();

        let session = service.login("ada@example.com", "pw").await.unwrap();
        assert_eq!(session.user.name, "Ada");
        assert!(service.login("ada@example.com", "wrong").await.is_err());
        assert!(service.signup("Ada", "ada@example.com", "pw").await.is_err());
    }
}
