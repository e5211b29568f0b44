//! UI layer for the desktop step editor: app shell and recycled row pool.

pub mod app;
pub mod rows;

pub use app::StepEditorApp;
