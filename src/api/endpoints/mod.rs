//! API endpoint handlers.
//!
//! Each module corresponds to one screen interaction. Handlers reuse
//! the triage and session modules; no business logic lives here.

pub mod health;
pub mod session;
pub mod triage;
