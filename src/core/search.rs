// LeadTrack - core/search.rs
//
// Name search for the Leads view: case-insensitive substring match.

use crate::core::model::Lead;

/// Return indices of leads whose name contains `query`, ignoring case.
/// An empty query matches every lead.
pub fn search_by_name(leads: &[Lead], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..leads.len()).collect();
    }

    let query_lower = query.to_lowercase();

    leads
        .iter()
        .enumerate()
        .filter(|(_, lead)| lead.name.to_lowercase().contains(&query_lower))
        .map(|(idx, _)| idx)
        .collect()
}
