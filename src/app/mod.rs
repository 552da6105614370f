// LeadTrack - app/mod.rs
//
// Application layer: lead repository, focus-triggered loading, view state.
// Dependencies: core layer, platform store trait.
// Must NOT depend on: ui.

pub mod loader;
pub mod repository;
pub mod state;
pub mod views;
