use eframe::egui;
use editor_core::{ListController, RowSignal};
use storage::{FileByteStore, PersistenceGateway};

use crate::config::AppPaths;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{apply_ui_event, EditorController};
use crate::ui::rows::{EguiListHost, EguiRow, RowPool};

const ROW_HEIGHT: f32 = 26.0;
const NAME_FIELD_WIDTH: f32 = 220.0;
const VALUE_FIELD_WIDTH: f32 = 80.0;

pub struct StepEditorApp {
    controller: EditorController<FileByteStore>,
    pool: RowPool,
    status: String,
    paths: AppPaths,
}

impl StepEditorApp {
    pub fn new(paths: AppPaths) -> Self {
        let gateway = PersistenceGateway::new(FileByteStore::new(&paths.sequence_path));
        let mut controller = ListController::new(gateway, EguiListHost::default());
        let status = match controller.on_start() {
            Some(source) if source.is_default_seed() => {
                format!("Started with default steps ({source:?})")
            }
            _ => String::new(),
        };

        Self {
            controller,
            pool: RowPool::default(),
            status,
            paths,
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context, pending: &mut Vec<UiEvent>) {
        egui::TopBottomPanel::top("step_editor_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Step Sequence");
                ui.separator();
                if ui.button("Add Step").clicked() {
                    pending.push(UiEvent::AddClicked);
                }
            });
        });
    }

    fn show_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("step_editor_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} steps", self.controller.steps().len()));
                ui.separator();
                ui.weak(self.paths.sequence_path.display().to_string());
                if !self.status.is_empty() {
                    ui.separator();
                    ui.colored_label(ui.visuals().warn_fg_color, self.status.as_str());
                }
            });
        });
    }

    fn show_rows(&mut self, ctx: &egui::Context, pending: &mut Vec<UiEvent>) {
        let controller = &mut self.controller;
        let pool = &mut self.pool;

        egui::CentralPanel::default().show(ctx, |ui| {
            let total = controller.host().item_count();
            let row_stride = ROW_HEIGHT + ui.spacing().item_spacing.y;

            let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
            if let Some(index) = controller.host_mut().take_scroll_target() {
                scroll = scroll.vertical_scroll_offset(index as f32 * row_stride);
            }

            scroll.show_rows(ui, ROW_HEIGHT, total, |ui, range| {
                let pooled = pool.len();
                pool.ensure_capacity(range.len());
                if pool.len() > pooled {
                    tracing::debug!(slots = pool.len(), "grew row pool");
                }
                let generation = controller.host().generation();

                for (slot, index) in range.enumerate() {
                    let Some(row) = pool.slot_mut(slot) else {
                        continue;
                    };
                    if row.needs_rebind(index, generation) {
                        controller.bind_row(row, index);
                        row.mark_bound(index, generation);
                    }
                    show_row(ui, row, slot, index, total, pending);
                }
            });
        });
    }
}

fn show_row(
    ui: &mut egui::Ui,
    row: &mut EguiRow,
    slot: usize,
    index: usize,
    total: usize,
    pending: &mut Vec<UiEvent>,
) {
    ui.horizontal(|ui| {
        ui.set_height(ROW_HEIGHT);
        ui.label(format!("{:>3}.", index + 1));

        let name = ui.add(
            egui::TextEdit::singleline(&mut row.name_text)
                .id_salt(("step-name", slot))
                .desired_width(NAME_FIELD_WIDTH),
        );
        row.name_dirty |= name.changed();
        if name.lost_focus() && row.name_dirty {
            row.name_dirty = false;
            pending.push(UiEvent::Row {
                slot,
                signal: RowSignal::NameCommitted(row.name_text.clone()),
            });
        }

        let value = ui.add(
            egui::TextEdit::singleline(&mut row.value_text)
                .id_salt(("step-value", slot))
                .desired_width(VALUE_FIELD_WIDTH),
        );
        row.value_dirty |= value.changed();
        if value.lost_focus() && row.value_dirty {
            row.value_dirty = false;
            pending.push(UiEvent::Row {
                slot,
                signal: RowSignal::ValueCommitted(row.value_text.clone()),
            });
        }

        if ui
            .add_enabled(index > 0, egui::Button::new("▲"))
            .on_hover_text("Move up")
            .clicked()
        {
            pending.push(UiEvent::ReorderCompleted {
                old_index: index,
                new_index: index - 1,
            });
        }
        if ui
            .add_enabled(index + 1 < total, egui::Button::new("▼"))
            .on_hover_text("Move down")
            .clicked()
        {
            pending.push(UiEvent::ReorderCompleted {
                old_index: index,
                new_index: index + 1,
            });
        }
        if ui.button("✖").on_hover_text("Remove step").clicked() {
            pending.push(UiEvent::Row {
                slot,
                signal: RowSignal::RemoveClicked,
            });
        }
    });
}

impl eframe::App for StepEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut pending = Vec::new();

        self.show_toolbar(ctx, &mut pending);
        self.show_status(ctx);
        self.show_rows(ctx, &mut pending);

        for event in pending {
            apply_ui_event(&mut self.controller, &self.pool, event, &mut self.status);
        }
    }
}

impl Drop for StepEditorApp {
    fn drop(&mut self) {
        self.controller.on_stop();
    }
}
