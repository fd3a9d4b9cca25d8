//! Application state shared across all commands.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<>>` inside the cloneable [`App`]
//! handle; every command locks it, mutates, persists, then emits events.
//! Timers never run while the lock is held — scheduled replies are
//! spawned tasks whose `JoinHandle`s are retained per chatroom so that
//! deleting a room or switching the session can abort them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::warn;

use causerie_chat::{ChatStore, ResponseSimulator, ThrottleGate};
use causerie_shared::constants::{CHAT_NAMESPACE, UI_NAMESPACE};
use causerie_shared::{ChatroomId, User};
use causerie_store::{Database, StoreError};

use crate::commands::settings::UiSettings;
use crate::events::{AppEvent, EventBus};

/// Central application state.
pub struct AppState {
    /// The signed-in user.  `None` until the oracle accepts a code.
    pub user: Option<User>,

    /// Phone details captured by `request_code`, awaiting verification.
    pub pending_phone: Option<(String, String)>,

    /// The chat engine state (registry, logs, session, typing flag).
    pub store: ChatStore,

    /// UI settings persisted under the independent `ui-storage` namespace.
    pub settings: UiSettings,

    /// One admission gate per chatroom, created lazily on first send.
    pub gates: HashMap<ChatroomId, ThrottleGate>,

    /// Reply content and thinking-delay source.
    pub simulator: ResponseSimulator,

    /// Local persistence.  `None` runs the app purely in memory (tests).
    pub database: Option<Database>,
}

impl AppState {
    fn hydrate(database: Option<Database>) -> Self {
        let store = database
            .as_ref()
            .and_then(|db| match db.load_snapshot::<ChatStore>(CHAT_NAMESPACE) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(error = %err, "failed to load chat snapshot; starting fresh");
                    None
                }
            })
            .unwrap_or_default();

        let settings = database
            .as_ref()
            .and_then(|db| match db.load_snapshot::<UiSettings>(UI_NAMESPACE) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(error = %err, "failed to load UI snapshot; starting fresh");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            user: None,
            pending_phone: None,
            store,
            settings,
            gates: HashMap::new(),
            simulator: ResponseSimulator::new(),
            database,
        }
    }
}

/// Cloneable application handle: shared state, event bus, and the
/// pending-reply tasks keyed by chatroom id.
#[derive(Clone)]
pub struct App {
    state: Arc<Mutex<AppState>>,
    events: EventBus,
    pending: Arc<Mutex<HashMap<ChatroomId, JoinHandle<()>>>>,
}

impl App {
    /// An app with no persistence: state lives and dies with the process.
    pub fn new() -> Self {
        Self::from_state(AppState::hydrate(None))
    }

    /// An app persisting through the given database, rehydrating both
    /// namespaces from their last snapshots.
    pub fn with_database(database: Database) -> Self {
        Self::from_state(AppState::hydrate(Some(database)))
    }

    /// Open the platform-default database and hydrate from it.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::with_database(Database::new()?))
    }

    fn from_state(state: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            events: EventBus::new(),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: AppEvent) {
        self.events.emit(event);
    }

    /// Lock the shared state.  A poisoned lock is recovered: commands
    /// keep the state consistent before any point that could panic.
    pub(crate) fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn pending(&self) -> MutexGuard<'_, HashMap<ChatroomId, JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Abort the scheduled reply for a chatroom, if one is pending, and
    /// return its gate to `Idle`.  Used on room deletion and session
    /// navigation so a stale reply can never land afterwards.
    pub(crate) fn cancel_pending(&self, id: ChatroomId, state: &mut AppState) {
        if let Some(handle) = self.pending().remove(&id) {
            handle.abort();
            state.store.set_typing(false);
            tracing::debug!(chatroom = %id, "pending reply cancelled");
        }
        if let Some(gate) = state.gates.get_mut(&id) {
            gate.reset();
        }
    }

    // ------------------------------------------------------------------
    // Persistence post-commit hooks
    // ------------------------------------------------------------------
    //
    // Mutation boundaries call these after commit.  Durability is
    // best-effort: failures are logged and the in-memory state stays
    // authoritative.

    pub(crate) fn persist_chat(&self, state: &AppState) {
        if let Some(db) = &state.database {
            if let Err(err) = db.save_snapshot(CHAT_NAMESPACE, &state.store) {
                tracing::error!(error = %err, "failed to persist chat state");
            }
        }
    }

    pub(crate) fn persist_ui(&self, state: &AppState) {
        if let Some(db) = &state.database {
            if let Err(err) = db.save_snapshot(UI_NAMESPACE, &state.settings) {
                tracing::error!(error = %err, "failed to persist UI settings");
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
