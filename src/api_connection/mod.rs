pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, CompletionOutcome, FailureKind};
pub use endpoints::{ChatMessage, Provider, Role};
