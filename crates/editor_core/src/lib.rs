//! Synchronized list model for the step editor: an owning store, a binder for
//! recycled UI rows, and a controller that persists after every mutation.

pub mod binder;
pub mod controller;
pub mod intent;
pub mod row;
pub mod store;
pub mod value;

pub use binder::{HandlerId, RowBinder, RowHandlers};
pub use controller::{ListController, SaveHealth, SessionState};
pub use intent::{ListIntent, RemoveTarget};
pub use row::{ListHost, RowSignal, RowWidget};
pub use store::{InsertPosition, StepStore};
pub use value::{format_value, parse_value};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
