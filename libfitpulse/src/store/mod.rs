//! Client state store
//!
//! Actions go in through [`Store::dispatch`], the pure [`reduce`] computes
//! the next [`AppState`], and the optional [`PersistGate`] sees every new
//! state. Dispatch is synchronous; network work lives in [`crate::app`].

pub mod actions;
pub mod reducer;
pub mod request;
pub mod selectors;
pub mod slices;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use request::{RemoteRequestState, RequestStatus};
pub use state::AppState;

use crate::persist::PersistGate;

#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    gate: Option<PersistGate>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state, gate: None }
    }

    /// Store seeded from persisted state, writing changes back through `gate`
    pub fn with_persistence(initial: AppState, mut gate: PersistGate) -> Self {
        let state = gate.rehydrate(initial);
        Self {
            state,
            gate: Some(gate),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(action = action.name(), "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
        if let Some(gate) = self.gate.as_mut() {
            gate.state_changed(&self.state);
        }
    }

    /// Write out any debounced snapshot
    pub fn flush(&mut self) {
        if let Some(gate) = self.gate.as_mut() {
            gate.flush();
        }
    }

    pub fn into_state(mut self) -> AppState {
        self.flush();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_dispatch_replaces_state() {
        let mut store = Store::default();
        store.dispatch(Action::AddWater);
        store.dispatch(Action::AddWater);
        assert_eq!(store.state().water.cups, 2);
    }

    #[test]
    fn test_dispatch_notifies_gate() {
        let backend = Arc::new(MemoryStore::new());
        let gate = PersistGate::new(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        let mut store = Store::with_persistence(AppState::default(), gate);

        store.dispatch(Action::SetDark(true));
        assert_eq!(backend.write_count(), 1);

        let gate = PersistGate::new(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        let reopened = Store::with_persistence(AppState::default(), gate);
        assert!(reopened.state().theme.dark_mode);
    }
}
