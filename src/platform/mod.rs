// LeadTrack - platform/mod.rs
//
// Platform abstraction layer: directories, config file, key-value storage.
// Must NOT depend on: app, ui.

pub mod config;
pub mod store;
