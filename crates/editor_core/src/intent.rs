use shared::domain::{StepField, StepId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveTarget {
    Step(StepId),
    Index(usize),
}

/// A UI-originated request, already resolved to concrete steps.
#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent {
    Add,
    Remove(RemoveTarget),
    Edit {
        step: StepId,
        field: StepField,
        raw: String,
    },
    Reorder {
        old_index: usize,
        new_index: usize,
    },
}

impl ListIntent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove(_) => "remove",
            Self::Edit { .. } => "edit",
            Self::Reorder { .. } => "reorder",
        }
    }
}
