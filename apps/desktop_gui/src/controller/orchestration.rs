//! Routes UI events from the editor window into the list controller.

use editor_core::ListController;
use shared::error::EditorError;
use storage::ByteStore;

use crate::controller::events::{UiError, UiEvent};
use crate::ui::rows::{EguiListHost, RowPool};

pub type EditorController<S> = ListController<S, EguiListHost>;

pub fn apply_ui_event<S: ByteStore>(
    controller: &mut EditorController<S>,
    pool: &RowPool,
    event: UiEvent,
    status: &mut String,
) {
    let event_name = event.name();

    let result = match event {
        UiEvent::AddClicked => controller.on_add().map(|_| ()),
        UiEvent::Row { slot, signal } => match pool.slot(slot) {
            Some(row) => controller.handle_row_signal(row, signal),
            None => {
                tracing::warn!(slot, event = event_name, "event from unknown row slot");
                return;
            }
        },
        UiEvent::ReorderCompleted {
            old_index,
            new_index,
        } => controller.on_reorder(old_index, new_index).map(|_| ()),
    };

    match result {
        Ok(()) => {
            tracing::debug!(event = event_name, "applied ui event");
            *status = match &controller.save_health().last_error {
                Some(err) => UiError::from_editor_error(err).status_line(),
                None => String::new(),
            };
        }
        Err(err) => {
            if matches!(err, EditorError::Parse { .. }) {
                // Rebind so the row shows the value that is actually stored.
                controller.refresh();
            }
            *status = UiError::from_editor_error(&err).status_line();
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
