//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the board core and an external
//! system (task service, auth service, filesystem, time). Implementations
//! live in `src/adapters/`.

pub mod auth;
pub mod clock;
pub mod filesystem;
pub mod tasks;

pub use auth::{AuthApi, TokenPair};
pub use clock::Clock;
pub use filesystem::FileSystem;
pub use tasks::{ApiFuture, TaskApi};
