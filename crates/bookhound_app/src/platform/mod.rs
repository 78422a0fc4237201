//! Terminal front end: event loop, effect execution and rendering.
mod app;
mod effects;
mod ui;

pub use app::run_app;
