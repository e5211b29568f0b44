//! Recycled row slots and the list host backing the virtualized scroll area.

use editor_core::{ListHost, RowWidget};
use shared::domain::{RowKey, StepId};

/// One pooled row. Slot `n` renders whatever index is `n`-th in the visible window.
#[derive(Debug, Default)]
pub struct EguiRow {
    key: u64,
    pub name_text: String,
    pub value_text: String,
    pub name_dirty: bool,
    pub value_dirty: bool,
    attached: Option<StepId>,
    bound: Option<(usize, u64)>,
}

impl EguiRow {
    fn new(key: u64) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    /// True when the slot shows a different index or predates the last refresh.
    pub fn needs_rebind(&self, index: usize, generation: u64) -> bool {
        self.bound != Some((index, generation))
    }

    pub fn mark_bound(&mut self, index: usize, generation: u64) {
        self.bound = Some((index, generation));
        self.name_dirty = false;
        self.value_dirty = false;
    }
}

impl RowWidget for EguiRow {
    fn key(&self) -> RowKey {
        RowKey(self.key)
    }

    fn set_name_text(&mut self, text: &str) {
        self.name_text.clear();
        self.name_text.push_str(text);
    }

    fn set_value_text(&mut self, text: &str) {
        self.value_text.clear();
        self.value_text.push_str(text);
    }

    fn attach(&mut self, step: Option<StepId>) {
        self.attached = step;
    }

    fn attached(&self) -> Option<StepId> {
        self.attached
    }
}

/// Grows to the largest visible window seen; slots are never dropped.
#[derive(Debug, Default)]
pub struct RowPool {
    rows: Vec<EguiRow>,
}

impl RowPool {
    pub fn ensure_capacity(&mut self, visible: usize) {
        while self.rows.len() < visible {
            let key = self.rows.len() as u64;
            self.rows.push(EguiRow::new(key));
        }
    }

    pub fn slot(&self, slot: usize) -> Option<&EguiRow> {
        self.rows.get(slot)
    }

    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut EguiRow> {
        self.rows.get_mut(slot)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Default)]
pub struct EguiListHost {
    item_count: usize,
    generation: u64,
    scroll_target: Option<usize>,
}

impl EguiListHost {
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.scroll_target.take()
    }
}

impl ListHost for EguiListHost {
    fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
    }

    fn refresh_items(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn scroll_to_item(&mut self, index: usize) {
        self.scroll_target = Some(index);
    }
}
