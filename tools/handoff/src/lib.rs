//! Session handoff extraction.
//!
//! Scans an agent coding transcript (one JSON record per line) into a
//! [`SessionSummary`] and optionally drafts a markdown handoff from it.

pub mod config;
pub mod error;
pub mod parse;
pub mod skeleton;
pub mod transcript;
pub mod types;

pub use error::HandoffError;
pub use skeleton::{render_skeleton, write_skeleton};
pub use transcript::{extract_session, scan_transcript, Extraction};
pub use types::SessionSummary;
