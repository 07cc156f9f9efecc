pub mod api; // HTTP surface for the app screens
pub mod config;
pub mod models;
pub mod session; // staged handoff between symptoms and result screens
pub mod triage; // prompt → model call → validation → keyword fallback
