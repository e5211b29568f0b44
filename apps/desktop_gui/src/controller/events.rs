//! UI events raised by the editor window and error modeling for the status line.

use editor_core::RowSignal;
use shared::error::{EditorError, ErrorCode};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    AddClicked,
    Row { slot: usize, signal: RowSignal },
    ReorderCompleted { old_index: usize, new_index: usize },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddClicked => "add_clicked",
            Self::Row { signal, .. } => signal.name(),
            Self::ReorderCompleted { .. } => "reorder_completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Storage,
    Desync,
    Session,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_editor_error(err: &EditorError) -> Self {
        let category = match err.code() {
            ErrorCode::Parse => UiErrorCategory::Validation,
            ErrorCode::LoadCorruption | ErrorCode::SaveFailure => UiErrorCategory::Storage,
            ErrorCode::IdentityNotFound | ErrorCode::UnboundRow => UiErrorCategory::Desync,
            ErrorCode::SessionClosed => UiErrorCategory::Session,
        };

        Self {
            category,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Validation => "Invalid value",
            UiErrorCategory::Storage => "Storage",
            UiErrorCategory::Desync => "Out of sync",
            UiErrorCategory::Session => "Editor closed",
        };
        format!("{label}: {}", self.message)
    }
}
