//! Capabilities the editor needs from whatever widget toolkit hosts the list.

use shared::domain::{RowKey, StepId};

/// One recyclable visual row.
pub trait RowWidget {
    /// Stable for the lifetime of the row object, independent of what it shows.
    fn key(&self) -> RowKey;
    fn set_name_text(&mut self, text: &str);
    fn set_value_text(&mut self, text: &str);
    /// Attached-data slot holding the step this row currently represents.
    fn attach(&mut self, step: Option<StepId>);
    fn attached(&self) -> Option<StepId>;
}

/// Ordered, virtualized container of rows.
///
/// Reorder completion is reported by calling `ListController::on_reorder`.
pub trait ListHost {
    fn set_item_count(&mut self, count: usize);
    /// Every visible row must be rebound before it is shown again.
    fn refresh_items(&mut self);
    fn scroll_to_item(&mut self, index: usize);
}

/// Raw event raised by a row's own controls.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSignal {
    NameCommitted(String),
    ValueCommitted(String),
    RemoveClicked,
}

impl RowSignal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NameCommitted(_) => "name_committed",
            Self::ValueCommitted(_) => "value_committed",
            Self::RemoveClicked => "remove_clicked",
        }
    }
}
