// LeadTrack - app/repository.rs
//
// Typed access to the persisted lead list.
//
// Views depend on the `LeadRepository` trait rather than a concrete store so
// tests can substitute an in-memory one. Loading never fails from the
// caller's point of view: unreadable or malformed data is reported as
// `LoadOutcome::Recovered` and behaves as an empty list, but stays
// distinguishable from a key that simply does not exist yet.

use crate::core::model::Lead;
use crate::platform::store::KeyValueStore;
use crate::util::constants::LEADS_KEY;
use crate::util::error::StoreError;

/// Result of reading the persisted lead list.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing has been stored yet.
    Absent,

    /// The stored list, in stored order.
    Loaded(Vec<Lead>),

    /// The value could not be read or parsed; treated as an empty list.
    Recovered { error: StoreError },
}

impl LoadOutcome {
    /// The leads to show: the loaded list, or empty for the other outcomes.
    pub fn into_leads(self) -> Vec<Lead> {
        match self {
            LoadOutcome::Loaded(leads) => leads,
            LoadOutcome::Absent | LoadOutcome::Recovered { .. } => Vec::new(),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }

    /// Number of leads that will be shown.
    pub fn len(&self) -> usize {
        match self {
            LoadOutcome::Loaded(leads) => leads.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load/save capability over the persisted lead list.
pub trait LeadRepository: Send + Sync {
    /// Read the current list. Safe to call repeatedly and concurrently.
    fn load(&self) -> LoadOutcome;

    /// Replace the stored list as a whole.
    fn save(&self, leads: &[Lead]) -> Result<(), StoreError>;

    /// Append one lead at the end of the stored list and return the new
    /// length. Refuses to run over a corrupt value, which would otherwise be
    /// silently replaced.
    fn append(&self, lead: Lead) -> Result<usize, StoreError> {
        let mut leads = match self.load() {
            LoadOutcome::Recovered { error } => {
                tracing::warn!(error = %error, "Not appending over a corrupt lead list");
                return Err(StoreError::CorruptValue {
                    key: LEADS_KEY.to_string(),
                });
            }
            outcome => outcome.into_leads(),
        };
        leads.push(lead);
        self.save(&leads)?;
        tracing::info!(total = leads.len(), "Lead added");
        Ok(leads.len())
    }
}

/// Lead repository that stores the list as a JSON array under the "leads" key.
#[derive(Debug)]
pub struct KvLeadRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KvLeadRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> LeadRepository for KvLeadRepository<S> {
    fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(LEADS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Absent,
            Err(error) => {
                tracing::warn!(error = %error, "Failed to load leads; showing none");
                return LoadOutcome::Recovered { error };
            }
        };

        match serde_json::from_str::<Vec<Lead>>(&raw) {
            Ok(leads) => {
                tracing::debug!(count = leads.len(), "Leads loaded");
                LoadOutcome::Loaded(leads)
            }
            Err(source) => {
                let error = StoreError::Malformed {
                    key: LEADS_KEY.to_string(),
                    source,
                };
                tracing::warn!(error = %error, "Stored leads are malformed; showing none");
                LoadOutcome::Recovered { error }
            }
        }
    }

    fn save(&self, leads: &[Lead]) -> Result<(), StoreError> {
        let json = serde_json::to_string(leads).map_err(|source| StoreError::Serialise {
            key: LEADS_KEY.to_string(),
            source,
        })?;
        self.store.set(LEADS_KEY, &json)
    }
}
