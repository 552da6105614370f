// LeadTrack - app/state.rs
//
// Application state: the lead repository, the background loader, and the
// two views. Owned by the front end (the CLI in main.rs).

use crate::app::loader::{LoadManager, LoadMessage, ViewId};
use crate::app::repository::LeadRepository;
use crate::app::views::{FilterView, LeadsView};
use crate::core::seed::SeedPolicy;
use crate::util::constants::LOAD_WAIT_TIMEOUT_MS;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Top-level application state.
pub struct AppState {
    pub leads_view: LeadsView,
    pub filter_view: FilterView,
    loader: LoadManager,
}

impl AppState {
    pub fn new(repository: Arc<dyn LeadRepository>, seed_policy: SeedPolicy) -> Self {
        Self {
            leads_view: LeadsView::new(seed_policy.leads_view),
            filter_view: FilterView::new(seed_policy.filter_view),
            loader: LoadManager::new(repository),
        }
    }

    pub fn repository(&self) -> &Arc<dyn LeadRepository> {
        self.loader.repository()
    }

    /// Give focus to `view`, blurring the other one, and start its load.
    pub fn focus(&mut self, view: ViewId) {
        let ticket = match view {
            ViewId::Leads => {
                self.filter_view.blur();
                self.leads_view.focus()
            }
            ViewId::Filter => {
                self.leads_view.blur();
                self.filter_view.focus()
            }
        };
        self.loader.request(ticket);
    }

    /// Route finished loads to their views. Returns how many were applied.
    pub fn poll_loads(&mut self) -> usize {
        let mut applied = 0;
        for msg in self.loader.poll() {
            if self.deliver(msg) {
                applied += 1;
            }
        }
        applied
    }

    /// Focus `view` and wait until its load has been applied.
    ///
    /// Returns false when no current load arrived within the timeout. Stale
    /// messages that arrive in between are discarded by the views.
    pub fn focus_and_wait(&mut self, view: ViewId) -> bool {
        self.focus(view);
        self.wait_for(view, Duration::from_millis(LOAD_WAIT_TIMEOUT_MS))
    }

    /// Wait until a current load for `view` is applied, for at most
    /// `timeout` in total.
    fn wait_for(&mut self, view: ViewId, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let Some(msg) = self.loader.wait(remaining) else {
                break;
            };
            let target = msg.ticket.view;
            if self.deliver(msg) && target == view {
                return true;
            }
        }
        tracing::warn!(
            view = ?view,
            timeout_ms = timeout.as_millis() as u64,
            "Timed out waiting for leads"
        );
        false
    }

    fn deliver(&mut self, msg: LoadMessage) -> bool {
        match msg.ticket.view {
            ViewId::Leads => self.leads_view.complete_load(msg.ticket, msg.outcome),
            ViewId::Filter => self.filter_view.complete_load(msg.ticket, msg.outcome),
        }
    }
}
