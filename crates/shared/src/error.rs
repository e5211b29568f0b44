use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{RowKey, StepId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Parse,
    LoadCorruption,
    SaveFailure,
    IdentityNotFound,
    UnboundRow,
    SessionClosed,
}

/// Every failure the editor can report. None of them end an editing session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("'{raw}' is not a number")]
    Parse { raw: String },
    #[error("persisted step sequence is unreadable: {reason}")]
    LoadCorruption { reason: String },
    #[error("failed to save step sequence: {reason}")]
    SaveFailure { reason: String },
    #[error("step {step_id} is not in the sequence")]
    IdentityNotFound { step_id: StepId },
    #[error("row {row} has no live binding")]
    UnboundRow { row: RowKey },
    #[error("cannot {operation} while the editor session is {state}")]
    SessionClosed {
        operation: &'static str,
        state: &'static str,
    },
}

impl EditorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { .. } => ErrorCode::Parse,
            Self::LoadCorruption { .. } => ErrorCode::LoadCorruption,
            Self::SaveFailure { .. } => ErrorCode::SaveFailure,
            Self::IdentityNotFound { .. } => ErrorCode::IdentityNotFound,
            Self::UnboundRow { .. } => ErrorCode::UnboundRow,
            Self::SessionClosed { .. } => ErrorCode::SessionClosed,
        }
    }

    /// True for failures that point at a row/model desync rather than bad input or I/O.
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            Self::IdentityNotFound { .. } | Self::UnboundRow { .. }
        )
    }
}
