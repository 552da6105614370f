// LeadTrack - core/mod.rs
//
// Core business logic layer: lead model, filtering, search, seed data, export.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod filter;
pub mod model;
pub mod search;
pub mod seed;
