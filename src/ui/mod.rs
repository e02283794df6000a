//! Terminal UI
//!
//! Single-threaded surface: all state lives on the main thread. The only
//! background work is the analysis request, which reports back through
//! `worker::AnalysisEvent`.

pub mod handlers;
pub mod results;
pub mod state;
pub mod view;
pub mod worker;

// Re-exports
pub use handlers::handle_key_event;
pub use results::{pretty_json, ResultView};
pub use state::{App, AppState, Panel};
pub use view::render;
pub use worker::AnalysisEvent;
