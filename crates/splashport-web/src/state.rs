// Per-session wizard store.
//
// Each operator session gets its own `Wizard` keyed by an opaque token;
// nothing about the wizard flow is process-global, so concurrent
// operators cannot corrupt each other's selections.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use splashport_core::{Wizard, WizardConfig, WizardError};

/// Shared application state: the wizard config plus the session map.
#[derive(Clone)]
pub struct AppState {
    config: WizardConfig,
    sessions: Arc<DashMap<Uuid, Arc<Mutex<Wizard>>>>,
}

impl AppState {
    pub fn new(config: WizardConfig) -> Self {
        Self {
            config,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Look up an existing session's wizard.
    pub fn wizard(&self, token: Uuid) -> Option<Arc<Mutex<Wizard>>> {
        self.sessions.get(&token).map(|w| Arc::clone(&w))
    }

    /// Create a fresh session with a wizard at the `Anonymous` stage.
    pub fn create(&self) -> Result<(Uuid, Arc<Mutex<Wizard>>), WizardError> {
        let token = Uuid::new_v4();
        let wizard = Arc::new(Mutex::new(Wizard::new(self.config.clone())?));
        self.sessions.insert(token, Arc::clone(&wizard));
        Ok((token, wizard))
    }
}
