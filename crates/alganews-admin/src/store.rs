//! Serialized dispatch entry point.

use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::middleware::{Middleware, RejectionNotifier};
use crate::state::AdminState;
use crate::update::{apply_mutations, update};

/// Owns the state and the middleware chain. Events are handled one at a time.
pub struct Store {
    pub state: AdminState,
    middleware: Vec<Box<dyn Middleware>>,
}

impl Store {
    /// Store with the default rejection notifier installed.
    pub fn new(state: AdminState) -> Self {
        Self::with_middleware(state, vec![Box::new(RejectionNotifier::default())])
    }

    pub fn with_middleware(state: AdminState, middleware: Vec<Box<dyn Middleware>>) -> Self {
        Self { state, middleware }
    }

    /// Runs middleware, then the reducer. Returns the effects to execute.
    pub fn dispatch(&mut self, event: UiEvent) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        for middleware in &self.middleware {
            let mutations = middleware.observe(&event);
            effects.extend(apply_mutations(&mut self.state, mutations));
        }
        effects.extend(update(&mut self.state, event));
        if !effects.is_empty() {
            debug!(count = effects.len(), "effects issued");
        }
        effects
    }
}
