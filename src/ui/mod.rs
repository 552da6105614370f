// LeadTrack - ui/mod.rs
//
// Presentation only: text rendering of leads and filters.
// Must NOT depend on: platform, direct I/O.

pub mod table;
