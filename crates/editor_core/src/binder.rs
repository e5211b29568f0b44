//! Row binding for recycled rows.
//!
//! A row object is reused for whatever index scrolls into it, so every bind
//! pass re-resolves the step, rewrites the row's attached data and replaces the
//! row's handler set. Signals are resolved through the attached step at the
//! time they fire, never through the index that was current at registration.

use std::collections::HashMap;

use shared::{
    domain::{RowKey, StepField, StepId},
    error::EditorError,
};
use tracing::trace;

use crate::{
    intent::{ListIntent, RemoveTarget},
    row::{RowSignal, RowWidget},
    store::StepStore,
    value::format_value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// The live handler set of one row: one remove handler and one edit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHandlers {
    pub remove: HandlerId,
    pub edit: HandlerId,
    pub step: StepId,
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct RowBinder {
    handlers: HashMap<RowKey, RowHandlers>,
    next_handler: u64,
}

impl RowBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `row` to the step at `index`. An index past the end unbinds the row.
    pub fn bind<R: RowWidget + ?Sized>(
        &mut self,
        row: &mut R,
        store: &StepStore,
        index: usize,
    ) -> Option<StepId> {
        let Some(step) = store.get_at(index) else {
            self.unbind(row);
            return None;
        };

        row.set_name_text(&step.name);
        row.set_value_text(&format_value(step.value));
        row.attach(Some(step.id));

        let key = row.key();
        let unchanged = self
            .handlers
            .get(&key)
            .is_some_and(|current| current.step == step.id && current.index == index);
        if !unchanged {
            let handlers = RowHandlers {
                remove: self.next_handler_id(),
                edit: self.next_handler_id(),
                step: step.id,
                index,
            };
            if let Some(previous) = self.handlers.insert(key, handlers) {
                trace!(
                    row = %key,
                    previous_step = %previous.step,
                    step = %step.id,
                    index,
                    "replaced row handlers"
                );
            }
        }

        Some(step.id)
    }

    pub fn unbind<R: RowWidget + ?Sized>(&mut self, row: &mut R) -> bool {
        row.attach(None);
        self.handlers.remove(&row.key()).is_some()
    }

    /// Turns a row signal into an intent addressed at the row's attached step.
    pub fn resolve<R: RowWidget + ?Sized>(
        &self,
        row: &R,
        signal: RowSignal,
    ) -> Result<ListIntent, EditorError> {
        let key = row.key();
        if !self.handlers.contains_key(&key) {
            return Err(EditorError::UnboundRow { row: key });
        }
        let step = row.attached().ok_or(EditorError::UnboundRow { row: key })?;

        Ok(match signal {
            RowSignal::RemoveClicked => ListIntent::Remove(RemoveTarget::Step(step)),
            RowSignal::NameCommitted(raw) => ListIntent::Edit {
                step,
                field: StepField::Name,
                raw,
            },
            RowSignal::ValueCommitted(raw) => ListIntent::Edit {
                step,
                field: StepField::Value,
                raw,
            },
        })
    }

    /// Drops every handler set. Safe to call repeatedly.
    pub fn detach_all(&mut self) -> usize {
        let detached = self.handlers.len();
        self.handlers.clear();
        detached
    }

    pub fn handlers_for(&self, row: RowKey) -> Option<&RowHandlers> {
        self.handlers.get(&row)
    }

    pub fn bound_rows(&self) -> usize {
        self.handlers.len()
    }

    fn next_handler_id(&mut self) -> HandlerId {
        self.next_handler += 1;
        HandlerId(self.next_handler)
    }
}
