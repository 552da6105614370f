// LeadTrack - app/views.rs
//
// View state for the two data-bearing views. No rendering here: a front
// end reads these structs and calls their methods in response to input.
//
// Leads view:  persisted leads (plus samples by default) with name search.
// Filter view: editable predicate rows, ALL/ANY mode, and a result snapshot
//              that only changes on apply or clear.

use crate::app::loader::{FocusTracker, LoadTicket, ViewId};
use crate::app::repository::LoadOutcome;
use crate::core::filter::{self, FilterSet, MatchMode, Predicate};
use crate::core::model::{Lead, LeadField};
use crate::core::search;
use crate::core::seed;

// =============================================================================
// Leads view
// =============================================================================

/// State of the Leads view.
#[derive(Debug)]
pub struct LeadsView {
    focus: FocusTracker,
    include_seed: bool,
    leads: Vec<Lead>,
    /// Current name search text.
    pub search: String,
    /// Whether the last applied load was recovered from corrupt data.
    pub load_recovered: bool,
}

impl LeadsView {
    pub fn new(include_seed: bool) -> Self {
        Self {
            focus: FocusTracker::new(ViewId::Leads),
            include_seed,
            leads: Vec::new(),
            search: String::new(),
            load_recovered: false,
        }
    }

    /// The view gained focus; issue a load with the returned ticket.
    pub fn focus(&mut self) -> LoadTicket {
        self.focus.focus()
    }

    pub fn blur(&mut self) {
        self.focus.blur();
    }

    /// Apply a finished load if its ticket is still current. Returns whether
    /// the load was applied.
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if !self.focus.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "Discarding stale leads load");
            return false;
        }
        self.load_recovered = outcome.is_recovered();
        self.leads = seed::with_seed(outcome.into_leads(), self.include_seed);
        true
    }

    /// All loaded leads, persisted first.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Leads whose name matches the current search text.
    pub fn visible(&self) -> Vec<&Lead> {
        search::search_by_name(&self.leads, &self.search)
            .into_iter()
            .map(|idx| &self.leads[idx])
            .collect()
    }
}

// =============================================================================
// Filter view
// =============================================================================

/// Filter view lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// Rows are being edited; the snapshot (if any) is from an earlier apply.
    Editing,
    /// The snapshot reflects the rows as they were at the last apply.
    Applied,
    /// Rows were reset and the snapshot discarded.
    Cleared,
}

/// State of the Filter view.
#[derive(Debug)]
pub struct FilterView {
    focus: FocusTracker,
    include_seed: bool,
    leads: Vec<Lead>,
    rows: Vec<Predicate>,
    mode: MatchMode,
    results: Vec<Lead>,
    phase: FilterPhase,
    /// Whether the last applied load was recovered from corrupt data.
    pub load_recovered: bool,
}

impl FilterView {
    pub fn new(include_seed: bool) -> Self {
        Self {
            focus: FocusTracker::new(ViewId::Filter),
            include_seed,
            leads: Vec::new(),
            rows: vec![Predicate::empty()],
            mode: MatchMode::All,
            results: Vec::new(),
            phase: FilterPhase::Editing,
            load_recovered: false,
        }
    }

    pub fn focus(&mut self) -> LoadTicket {
        self.focus.focus()
    }

    /// Leaving the view discards the filter set: rows, mode, and results
    /// return to their initial state, as on a fresh visit.
    pub fn blur(&mut self) {
        self.focus.blur();
        self.rows = vec![Predicate::empty()];
        self.mode = MatchMode::All;
        self.results.clear();
        self.phase = FilterPhase::Editing;
    }

    /// Apply a finished load if its ticket is still current. The result
    /// snapshot is left alone; it changes only on apply or clear.
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if !self.focus.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "Discarding stale filter load");
            return false;
        }
        self.load_recovered = outcome.is_recovered();
        self.leads = seed::with_seed(outcome.into_leads(), self.include_seed);
        true
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn rows(&self) -> &[Predicate] {
        &self.rows
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    /// Leads matched by the last apply.
    pub fn results(&self) -> &[Lead] {
        &self.results
    }

    /// Append an unset Status row.
    pub fn add_row(&mut self) {
        self.rows.push(Predicate::empty());
        self.edited();
    }

    /// Remove row `index`. The last remaining row cannot be removed.
    /// Returns whether a row was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        self.edited();
        true
    }

    /// Change the field of row `index`. The row's value is reset, since the
    /// old value belongs to another field's catalog.
    pub fn set_field(&mut self, index: usize, field: LeadField) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.field = Some(field);
        row.value.clear();
        self.edited();
        true
    }

    /// Change the value of row `index`. An empty value means "unset".
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.value = value.into();
        self.edited();
        true
    }

    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
        self.edited();
    }

    /// Replace all rows at once, e.g. from command-line conditions. An empty
    /// list is allowed here; it exercises the zero-predicate rules.
    pub fn set_rows(&mut self, rows: Vec<Predicate>) {
        self.rows = rows;
        self.edited();
    }

    /// The current rows and mode as a filter set.
    pub fn filter_set(&self) -> FilterSet {
        FilterSet::new(self.rows.clone(), self.mode)
    }

    /// Evaluate the rows over the loaded leads and keep the result.
    pub fn apply(&mut self) -> &[Lead] {
        self.results = filter::filter_leads(&self.leads, &self.filter_set());
        self.phase = FilterPhase::Applied;
        tracing::debug!(
            rows = self.rows.len(),
            mode = ?self.mode,
            matched = self.results.len(),
            of = self.leads.len(),
            "Filters applied"
        );
        &self.results
    }

    /// Reset to a single unset Status row and drop the result snapshot.
    pub fn clear(&mut self) {
        self.rows = vec![Predicate::empty()];
        self.results.clear();
        self.phase = FilterPhase::Cleared;
    }

    fn edited(&mut self) {
        self.phase = FilterPhase::Editing;
    }
}
