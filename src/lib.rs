// LeadTrack - lib.rs
//
// Library entry point, exposing all modules for integration testing and for
// front ends other than the bundled CLI.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
