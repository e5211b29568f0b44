//! Session orchestration: UI intents in, store mutations and saves out.

use shared::{
    domain::{Step, StepField, StepId},
    error::EditorError,
    protocol::StepRecord,
};
use storage::{ByteStore, LoadSource, PersistenceGateway};
use tracing::{debug, error, info, warn};

use crate::{
    binder::RowBinder,
    intent::{ListIntent, RemoveTarget},
    row::{ListHost, RowSignal, RowWidget},
    store::{InsertPosition, StepStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loaded,
    Editing,
    Disposed,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loaded => "loaded",
            Self::Editing => "editing",
            Self::Disposed => "disposed",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Loaded | Self::Editing)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveHealth {
    pub saves: u64,
    pub consecutive_failures: u32,
    pub last_error: Option<EditorError>,
}

pub struct ListController<S: ByteStore, H: ListHost> {
    state: SessionState,
    store: StepStore,
    gateway: PersistenceGateway<S>,
    binder: RowBinder,
    host: H,
    save_health: SaveHealth,
}

impl<S: ByteStore, H: ListHost> ListController<S, H> {
    pub fn new(gateway: PersistenceGateway<S>, host: H) -> Self {
        Self {
            state: SessionState::Uninitialized,
            store: StepStore::new(),
            gateway,
            binder: RowBinder::new(),
            host,
            save_health: SaveHealth::default(),
        }
    }

    /// Loads (or seeds) the sequence and asks the host to bind its rows.
    ///
    /// Returns `None` when a session is already running.
    pub fn on_start(&mut self) -> Option<LoadSource> {
        if self.state.is_active() {
            warn!(state = self.state.as_str(), "editor session already started");
            return None;
        }

        let outcome = self.gateway.load();
        self.store.seed(outcome.records);
        self.binder.detach_all();
        self.state = SessionState::Loaded;
        info!(
            steps = self.store.len(),
            defaulted = outcome.source.is_default_seed(),
            "step editor session started"
        );

        self.refresh();
        Some(outcome.source)
    }

    pub fn on_add(&mut self) -> Result<usize, EditorError> {
        self.ensure_active("add a step")?;

        let index = self
            .store
            .insert(StepRecord::new_action(), InsertPosition::End);
        self.refresh();
        self.host.scroll_to_item(index);
        self.commit();
        Ok(index)
    }

    /// Returns whether a step was removed. Unknown identities are reported as a desync.
    pub fn on_remove(&mut self, target: RemoveTarget) -> Result<bool, EditorError> {
        self.ensure_active("remove a step")?;

        let removed = match target {
            RemoveTarget::Step(id) => match self.store.remove_by_identity(id) {
                Ok(step) => Some(step),
                Err(err) => {
                    error!(step_id = %id, "could not find step in sequence for removal: {err}");
                    return Err(err);
                }
            },
            RemoveTarget::Index(index) => self.store.remove_at(index),
        };

        let Some(step) = removed else {
            debug!(?target, "remove target out of range");
            return Ok(false);
        };

        debug!(step_id = %step.id, name = %step.name, "removed step");
        self.refresh();
        self.commit();
        Ok(true)
    }

    /// Saves only when the field was actually updated.
    pub fn on_edit(&mut self, step: StepId, field: StepField, raw: &str) -> Result<(), EditorError> {
        self.ensure_active("edit a step")?;

        match self.store.update_field(step, field, raw) {
            Ok(()) => {
                self.commit();
                Ok(())
            }
            Err(err @ EditorError::Parse { .. }) => {
                warn!(step_id = %step, field = field.as_str(), "rejected edit: {err}");
                Err(err)
            }
            Err(err) => {
                error!(step_id = %step, field = field.as_str(), "edit addressed a missing step: {err}");
                Err(err)
            }
        }
    }

    pub fn on_reorder(&mut self, old_index: usize, new_index: usize) -> Result<bool, EditorError> {
        self.ensure_active("reorder steps")?;

        if !self.store.move_step(old_index, new_index) {
            return Ok(false);
        }
        if let Some(step) = self.store.get_at(new_index) {
            info!(
                name = %step.name,
                old_index,
                new_index,
                "step sequence reordered"
            );
        }
        self.refresh();
        self.commit();
        Ok(true)
    }

    /// Detaches every row handler and writes the final state. Repeated calls are no-ops.
    pub fn on_stop(&mut self) {
        let detached = self.binder.detach_all();
        match self.state {
            SessionState::Loaded | SessionState::Editing => {
                self.persist();
                self.state = SessionState::Disposed;
                info!(detached, steps = self.store.len(), "step editor session stopped");
            }
            SessionState::Uninitialized | SessionState::Disposed => {
                debug!(state = self.state.as_str(), "stop requested without a running session");
            }
        }
    }

    pub fn apply(&mut self, intent: ListIntent) -> Result<(), EditorError> {
        debug!(intent = intent.name(), "applying list intent");
        match intent {
            ListIntent::Add => self.on_add().map(|_| ()),
            ListIntent::Remove(target) => self.on_remove(target).map(|_| ()),
            ListIntent::Edit { step, field, raw } => self.on_edit(step, field, &raw),
            ListIntent::Reorder {
                old_index,
                new_index,
            } => self.on_reorder(old_index, new_index).map(|_| ()),
        }
    }

    /// Routes a signal raised by a row's own controls to the step it is bound to.
    pub fn handle_row_signal<R: RowWidget + ?Sized>(
        &mut self,
        row: &R,
        signal: RowSignal,
    ) -> Result<(), EditorError> {
        let signal_name = signal.name();
        let intent = self.binder.resolve(row, signal).inspect_err(|err| {
            error!(row = %row.key(), signal = signal_name, "row signal without a live binding: {err}");
        })?;
        self.apply(intent)
    }

    pub fn bind_row<R: RowWidget + ?Sized>(&mut self, row: &mut R, index: usize) -> Option<StepId> {
        if !self.state.is_active() {
            self.binder.unbind(row);
            return None;
        }
        self.binder.bind(row, &self.store, index)
    }

    pub fn unbind_row<R: RowWidget + ?Sized>(&mut self, row: &mut R) -> bool {
        self.binder.unbind(row)
    }

    /// Pushes the current length to the host and asks it to rebind every visible row.
    pub fn refresh(&mut self) {
        self.host.set_item_count(self.store.len());
        self.host.refresh_items();
    }

    pub fn steps(&self) -> &[Step] {
        self.store.all()
    }

    pub fn store(&self) -> &StepStore {
        &self.store
    }

    pub fn binder(&self) -> &RowBinder {
        &self.binder
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn save_health(&self) -> &SaveHealth {
        &self.save_health
    }

    fn ensure_active(&self, operation: &'static str) -> Result<(), EditorError> {
        if self.state.is_active() {
            Ok(())
        } else {
            warn!(state = self.state.as_str(), "cannot {operation}: no running session");
            Err(EditorError::SessionClosed {
                operation,
                state: self.state.as_str(),
            })
        }
    }

    fn commit(&mut self) {
        self.state = SessionState::Editing;
        self.persist();
    }

    fn persist(&mut self) {
        match self.gateway.save(self.store.all()) {
            Ok(()) => {
                self.save_health.saves += 1;
                self.save_health.consecutive_failures = 0;
                self.save_health.last_error = None;
            }
            Err(err) => {
                self.save_health.consecutive_failures += 1;
                self.save_health.last_error = Some(err);
            }
        }
    }
}
