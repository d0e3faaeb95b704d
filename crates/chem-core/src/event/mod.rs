//! Registro append-only de advertencias y trait `WarningSink`.

mod store;
mod types;

pub use store::{InMemoryWarningSink, WarningSink};
pub use types::WarningEvent;
