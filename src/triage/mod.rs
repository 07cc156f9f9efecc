//! Symptom-risk classification pipeline: prompt construction, the
//! schema-validated model call, and the deterministic keyword fallback.

pub mod classifier;
pub mod fallback;
pub mod gemini;
pub mod gemini_types;
pub mod prompt;
pub mod schema;

pub use classifier::*;
pub use fallback::*;
pub use gemini::*;
pub use gemini_types::*;
pub use prompt::*;
pub use schema::*;

use thiserror::Error;

/// Why the model-backed path failed. Both variants route into the
/// keyword fallback; neither is surfaced to the end user.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Model transport failed: {0}")]
    Transport(#[from] ModelError),

    #[error("Model response failed schema validation: {0}")]
    Schema(String),
}
