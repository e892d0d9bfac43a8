//! Dashboard session: the snapshot currently on display

use crate::config::ModelSelection;
use crate::engine::{AnalysisSnapshot, RunId};
use crate::error::{Result, SentifyError};
use crate::model::{AnalyzedArticle, Sentiment, TimeRange};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Handle for one analyze run. Only the most recently issued ticket may
/// publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTicket {
    id: RunId,
}

impl RunTicket {
    pub fn id(&self) -> RunId {
        self.id
    }
}

#[derive(Debug)]
struct SessionState {
    current: Option<Arc<AnalysisSnapshot>>,
    time_range: TimeRange,
    selection: ModelSelection,
}

/// Thread-safe holder of the displayed analysis.
///
/// Every run gets a [`RunTicket`]; starting a new run invalidates all
/// earlier tickets, so results of a superseded run are rejected by
/// [`publish`](Self::publish) instead of being shown.
#[derive(Debug)]
pub struct DashboardSession {
    id: Uuid,
    generation: AtomicU64,
    state: RwLock<SessionState>,
}

impl DashboardSession {
    pub fn new(time_range: TimeRange, selection: ModelSelection) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation: AtomicU64::new(0),
            state: RwLock::new(SessionState {
                current: None,
                time_range,
                selection,
            }),
        }
    }

    /// Unique id of this session, for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    // A panic while holding the lock cannot leave the state half-written,
    // so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new run, superseding every earlier ticket
    pub fn begin_run(&self) -> RunTicket {
        let _state = self.write();
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(session = %self.id, run_id = id, "run started");
        RunTicket { id }
    }

    /// Whether `ticket` still belongs to the latest run
    pub fn is_current(&self, ticket: RunTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.id
    }

    /// Replace the displayed snapshot with the result of `ticket`'s run.
    ///
    /// Fails with [`SentifyError::StaleRun`] when a newer run has started;
    /// the displayed snapshot is left untouched in that case.
    pub fn publish(&self, ticket: RunTicket, snapshot: AnalysisSnapshot) -> Result<()> {
        let mut state = self.write();
        let current = self.generation.load(Ordering::SeqCst);
        if ticket.id != current {
            tracing::warn!(
                session = %self.id,
                run_id = ticket.id,
                current,
                "discarding results of a superseded run"
            );
            return Err(SentifyError::StaleRun {
                ticket: ticket.id,
                current,
            });
        }

        state.current = Some(Arc::new(snapshot));
        Ok(())
    }

    /// The snapshot on display, if any run has completed
    pub fn current(&self) -> Option<Arc<AnalysisSnapshot>> {
        self.read().current.clone()
    }

    /// Articles of the current snapshot with the given label (all when `None`)
    pub fn filtered(&self, filter: Option<Sentiment>) -> Vec<AnalyzedArticle> {
        self.current()
            .map(|snapshot| snapshot.filtered(filter).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn time_range(&self) -> TimeRange {
        self.read().time_range
    }

    pub fn set_time_range(&self, range: TimeRange) {
        self.write().time_range = range;
    }

    pub fn selection(&self) -> ModelSelection {
        self.read().selection
    }

    pub fn set_selection(&self, selection: ModelSelection) {
        self.write().selection = selection;
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(TimeRange::default(), ModelSelection::default())
    }
}
