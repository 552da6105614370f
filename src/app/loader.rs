// LeadTrack - app/loader.rs
//
// Focus-triggered lead loading.
//
// Every time a view gains focus it asks for a fresh read of the lead store.
// Reads run on a background thread and report back over an mpsc channel.
// A read may finish after the view lost focus or was focused again; each
// request therefore carries a `LoadTicket` stamped with the view's focus
// generation, and the view drops any result whose ticket is out of date.
//
// Architecture:
//   - `LoadManager` lives on the caller's thread; the read runs on a
//     short-lived background thread per request.
//   - All cross-thread communication is via `LoadMessage` channel messages.

use crate::app::repository::{LeadRepository, LoadOutcome};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Which view a load was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Leads,
    Filter,
}

/// Identifies one load request. Only the latest ticket of a view is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub view: ViewId,
    pub generation: u64,
}

/// Focus state and generation counter of one view.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    view: ViewId,
    generation: u64,
    focused: bool,
}

impl FocusTracker {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            generation: 0,
            focused: false,
        }
    }

    /// The view gained focus: start a new generation and return the ticket
    /// for the load it should issue.
    pub fn focus(&mut self) -> LoadTicket {
        self.generation += 1;
        self.focused = true;
        LoadTicket {
            view: self.view,
            generation: self.generation,
        }
    }

    /// The view lost focus: any load still in flight becomes stale.
    pub fn blur(&mut self) {
        self.generation += 1;
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a result carrying `ticket` may still be applied.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.focused && ticket.view == self.view && ticket.generation == self.generation
    }
}

/// A finished load, delivered to the requesting view.
#[derive(Debug)]
pub struct LoadMessage {
    pub ticket: LoadTicket,
    pub outcome: LoadOutcome,
}

/// Runs repository loads on background threads.
pub struct LoadManager {
    repository: Arc<dyn LeadRepository>,
    tx: mpsc::Sender<LoadMessage>,
    rx: mpsc::Receiver<LoadMessage>,
}

impl LoadManager {
    pub fn new(repository: Arc<dyn LeadRepository>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { repository, tx, rx }
    }

    pub fn repository(&self) -> &Arc<dyn LeadRepository> {
        &self.repository
    }

    /// Start loading for `ticket`. Returns immediately.
    pub fn request(&self, ticket: LoadTicket) {
        let repository = Arc::clone(&self.repository);
        let tx = self.tx.clone();

        std::thread::spawn(move || {
            let outcome = repository.load();
            tracing::debug!(
                view = ?ticket.view,
                generation = ticket.generation,
                count = outcome.len(),
                "Load finished"
            );
            // The manager may already be gone; nothing to deliver to then.
            let _ = tx.send(LoadMessage { ticket, outcome });
        });

        tracing::debug!(view = ?ticket.view, generation = ticket.generation, "Load requested");
    }

    /// Collect all finished loads without blocking.
    pub fn poll(&self) -> Vec<LoadMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Block until the next finished load or until `timeout` passes.
    pub fn wait(&self, timeout: Duration) -> Option<LoadMessage> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::repository::KvLeadRepository;
    use crate::core::model::Lead;
    use crate::platform::store::MemoryStore;

    #[test]
    fn test_refocus_makes_previous_ticket_stale() {
        let mut tracker = FocusTracker::new(ViewId::Leads);
        let first = tracker.focus();
        assert!(tracker.is_current(first));
        let second = tracker.focus();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_blur_makes_ticket_stale() {
        let mut tracker = FocusTracker::new(ViewId::Filter);
        let ticket = tracker.focus();
        tracker.blur();
        assert!(!tracker.is_focused());
        assert!(!tracker.is_current(ticket));
    }

    #[test]
    fn test_ticket_for_other_view_is_not_current() {
        let mut leads = FocusTracker::new(ViewId::Leads);
        let mut filter = FocusTracker::new(ViewId::Filter);
        let leads_ticket = leads.focus();
        filter.focus();
        assert!(!filter.is_current(leads_ticket));
    }

    #[test]
    fn test_manager_delivers_outcome_with_ticket() {
        let repo = KvLeadRepository::new(MemoryStore::new());
        repo.save(&[Lead {
            name: "A".to_string(),
            ..Default::default()
        }])
        .unwrap();
        let manager = LoadManager::new(Arc::new(repo));

        let mut tracker = FocusTracker::new(ViewId::Leads);
        let ticket = tracker.focus();
        manager.request(ticket);

        let msg = manager
            .wait(Duration::from_secs(5))
            .expect("load should finish");
        assert_eq!(msg.ticket, ticket);
        assert_eq!(msg.outcome.into_leads().len(), 1);
        assert!(manager.poll().is_empty());
    }
}
