use editor_core::{ListController, ListHost, RemoveTarget, RowSignal, RowWidget, SessionState};
use shared::{
    domain::{RowKey, StepId},
    protocol::StepRecord,
};
use storage::{FileByteStore, LoadSource, PersistenceGateway};

#[derive(Default)]
struct Row {
    key: u64,
    name: String,
    value: String,
    attached: Option<StepId>,
}

impl RowWidget for Row {
    fn key(&self) -> RowKey {
        RowKey(self.key)
    }

    fn set_name_text(&mut self, text: &str) {
        self.name = text.to_string();
    }

    fn set_value_text(&mut self, text: &str) {
        self.value = text.to_string();
    }

    fn attach(&mut self, step: Option<StepId>) {
        self.attached = step;
    }

    fn attached(&self) -> Option<StepId> {
        self.attached
    }
}

/// Keeps a small pool of rows and rebinds all of them whenever a refresh is requested.
#[derive(Default)]
struct PooledHost {
    item_count: usize,
    dirty: bool,
    scroll_target: Option<usize>,
}

impl ListHost for PooledHost {
    fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
    }

    fn refresh_items(&mut self) {
        self.dirty = true;
    }

    fn scroll_to_item(&mut self, index: usize) {
        self.scroll_target = Some(index);
    }
}

fn rebind_pool(controller: &mut ListController<FileByteStore, PooledHost>, pool: &mut [Row]) {
    if !controller.host().dirty {
        return;
    }
    for (index, row) in pool.iter_mut().enumerate() {
        controller.bind_row(row, index);
    }
    controller.host_mut().dirty = false;
}

fn records(controller: &ListController<FileByteStore, PooledHost>) -> Vec<StepRecord> {
    controller.store().records()
}

#[test]
fn default_seed_add_remove_edit_scenario_is_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileByteStore::in_dir(dir.path());
    let mut controller =
        ListController::new(PersistenceGateway::new(store.clone()), PooledHost::default());
    let mut pool: Vec<Row> = (0..4)
        .map(|key| Row {
            key,
            ..Row::default()
        })
        .collect();

    assert_eq!(controller.on_start(), Some(LoadSource::Missing));
    rebind_pool(&mut controller, &mut pool);
    assert_eq!(pool[1].name, "Wait");

    controller.on_add().expect("add");
    assert_eq!(controller.host().scroll_target, Some(3));
    rebind_pool(&mut controller, &mut pool);
    assert_eq!(pool[3].name, "New Action");
    assert_eq!(pool[3].value, "0.0");

    controller
        .on_remove(RemoveTarget::Index(1))
        .expect("remove wait");
    rebind_pool(&mut controller, &mut pool);
    assert_eq!(pool[1].name, "Rotate");
    assert_eq!(pool[3].attached, None);

    controller
        .handle_row_signal(&pool[1], RowSignal::ValueCommitted("45.0".into()))
        .expect("edit rotate");
    rebind_pool(&mut controller, &mut pool);

    let expected = vec![
        StepRecord::new("Initial Move", 10.0),
        StepRecord::new("Rotate", 45.0),
        StepRecord::new("New Action", 0.0),
    ];
    assert_eq!(records(&controller), expected);
    assert_eq!(PersistenceGateway::new(store.clone()).load().records, expected);

    controller.on_stop();
    assert_eq!(controller.state(), SessionState::Disposed);
    assert_eq!(PersistenceGateway::new(store).load().records, expected);
}

#[test]
fn remove_through_a_stale_row_targets_the_bound_step() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileByteStore::in_dir(dir.path());
    let mut controller =
        ListController::new(PersistenceGateway::new(store.clone()), PooledHost::default());
    let mut pool: Vec<Row> = (0..3)
        .map(|key| Row {
            key,
            ..Row::default()
        })
        .collect();
    controller.on_start().expect("start");
    rebind_pool(&mut controller, &mut pool);

    // Remove index 0, then click remove on the row still showing "Rotate" before it is rebound.
    controller
        .handle_row_signal(&pool[0], RowSignal::RemoveClicked)
        .expect("remove first");
    controller
        .handle_row_signal(&pool[2], RowSignal::RemoveClicked)
        .expect("remove rotate");

    assert_eq!(records(&controller), vec![StepRecord::new("Wait", 2.5)]);
    assert_eq!(
        PersistenceGateway::new(store).load().records,
        vec![StepRecord::new("Wait", 2.5)]
    );
}

#[test]
fn rejected_value_keeps_file_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileByteStore::in_dir(dir.path());
    let mut controller =
        ListController::new(PersistenceGateway::new(store.clone()), PooledHost::default());
    let mut pool = vec![Row::default()];
    controller.on_start().expect("start");
    rebind_pool(&mut controller, &mut pool);

    let result = controller.handle_row_signal(&pool[0], RowSignal::ValueCommitted("ten".into()));
    assert!(result.is_err());
    assert!(!store.path().exists());
    assert_eq!(controller.steps()[0].value, 10.0);
}
