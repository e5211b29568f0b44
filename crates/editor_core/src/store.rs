//! Owning container for the ordered step sequence.

use shared::{
    domain::{Step, StepField, StepId},
    error::EditorError,
    protocol::StepRecord,
};
use tracing::warn;

use crate::value::parse_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    #[default]
    End,
    /// Clamped to the end when past it.
    At(usize),
}

/// Sole owner of every [`Step`] in the session.
///
/// Identity is the `StepId` handed out here; ids are never reused by one store.
#[derive(Debug, Default)]
pub struct StepStore {
    steps: Vec<Step>,
    next_id: u64,
}

impl StepStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = StepRecord>) -> Self {
        let mut store = Self::new();
        store.seed(records);
        store
    }

    /// Replaces the whole sequence. Previously issued ids stay retired.
    pub fn seed(&mut self, records: impl IntoIterator<Item = StepRecord>) {
        self.steps.clear();
        for record in records {
            self.insert(record, InsertPosition::End);
        }
    }

    pub fn insert(&mut self, record: StepRecord, position: InsertPosition) -> usize {
        self.next_id += 1;
        let step = Step::new(StepId(self.next_id), record.name, record.value);
        let index = match position {
            InsertPosition::End => self.steps.len(),
            InsertPosition::At(index) => index.min(self.steps.len()),
        };
        self.steps.insert(index, step);
        index
    }

    pub fn remove_by_identity(&mut self, id: StepId) -> Result<Step, EditorError> {
        let index = self
            .index_of(id)
            .ok_or(EditorError::IdentityNotFound { step_id: id })?;
        Ok(self.steps.remove(index))
    }

    /// Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Step> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    /// Applies `raw` to one field. A value that does not parse leaves the step untouched.
    pub fn update_field(
        &mut self,
        id: StepId,
        field: StepField,
        raw: &str,
    ) -> Result<(), EditorError> {
        let step = self
            .steps
            .iter_mut()
            .find(|step| step.id == id)
            .ok_or(EditorError::IdentityNotFound { step_id: id })?;

        match field {
            StepField::Name => step.name = raw.to_string(),
            StepField::Value => step.value = parse_value(raw)?,
        }
        Ok(())
    }

    pub fn move_step(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.steps.len();
        if old_index >= len || new_index >= len {
            warn!(old_index, new_index, len, "ignoring reorder outside the sequence");
            return false;
        }
        if old_index != new_index {
            let step = self.steps.remove(old_index);
            self.steps.insert(new_index, step);
        }
        true
    }

    pub fn all(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn records(&self) -> Vec<StepRecord> {
        self.steps.iter().map(Step::to_record).collect()
    }
}
