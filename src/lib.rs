//! LexZig UI: terminal front end for the LexZig analysis service
//!
//! Type Zig source, send it to the analysis endpoint, read back the token
//! stream and syntax tree.

pub mod cli;
pub mod client;
pub mod editor;
pub mod ui;

pub use client::{AnalysisClient, AnalysisData, AnalysisResult, ClientError};
pub use editor::EditorSurface;
pub use ui::App;
