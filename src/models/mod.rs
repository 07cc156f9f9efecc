//! Core data types shared across the classifier and the API surface.

pub mod assessment;
pub mod enums;
pub mod input;

pub use assessment::{RiskAssessment, DISCLAIMER};
pub use enums::RiskLevel;
pub use input::{Demographics, PhotoParseError, SymptomInput, SymptomPhoto};
