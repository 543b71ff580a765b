//! Command-line shell around the core state machine and the export engine.
mod app;
mod cli;
mod effects;
mod logging;
mod render;

pub use app::run_app;
