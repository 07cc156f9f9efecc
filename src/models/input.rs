//! Classifier input types.
//!
//! A `SymptomInput` is assembled once per user action from whatever the
//! calling UI collected (free-text description, optional photo, optional
//! demographic hints) and handed to the classifier. Nothing here is
//! validated for medical plausibility; demographics are opaque strings.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Optional demographic hints. All fields are free text exactly as the
/// user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Demographics {
    pub name: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub gender: Option<String>,
}

/// A symptom photo carried as base64 payload plus its MIME type, the
/// shape the model endpoint expects for inline media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomPhoto {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoParseError {
    #[error("photo is not a data URI")]
    MissingPrefix,
    #[error("photo MIME type is not an image: {0}")]
    NotAnImage(String),
    #[error("photo payload is empty")]
    Empty,
    #[error("photo payload is not valid base64")]
    InvalidBase64,
}

impl SymptomPhoto {
    /// Parse a browser-style data URI (`data:image/jpeg;base64,...`).
    ///
    /// The payload is decoded once to catch truncated uploads early,
    /// then kept in its base64 form for the outbound model call.
    pub fn from_data_uri(uri: &str) -> Result<Self, PhotoParseError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(PhotoParseError::MissingPrefix)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(PhotoParseError::MissingPrefix)?;

        if !mime_type.starts_with("image/") {
            return Err(PhotoParseError::NotAnImage(mime_type.to_string()));
        }
        if payload.is_empty() {
            return Err(PhotoParseError::Empty);
        }
        if general_purpose::STANDARD.decode(payload).is_err() {
            return Err(PhotoParseError::InvalidBase64);
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }
}

/// Everything the classifier consumes for one classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomInput {
    /// Verbatim user text. Embedded in the prompt exactly as written,
    /// including punctuation and casing.
    pub description: String,
    pub photo: Option<SymptomPhoto>,
    pub demographics: Option<Demographics>,
}

impl SymptomInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            photo: None,
            demographics: None,
        }
    }

    pub fn with_photo(mut self, photo: SymptomPhoto) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn with_demographics(mut self, demographics: Demographics) -> Self {
        self.demographics = Some(demographics);
        self
    }

    /// Whitespace-only text counts as no description.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// True when there is nothing to classify on: no usable description
    /// and no photo. The classifier answers these without a model call.
    pub fn is_insufficient(&self) -> bool {
        !self.has_description() && self.photo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const TINY_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn tiny_png_uri() -> String {
        format!("data:image/png;base64,{TINY_PNG}")
    }

    // ── photo parsing ──

    #[test]
    fn parses_valid_data_uri() {
        let photo = SymptomPhoto::from_data_uri(&tiny_png_uri()).unwrap();
        assert_eq!(photo.mime_type, "image/png");
        assert_eq!(photo.data, TINY_PNG);
    }

    #[test]
    fn rejects_non_data_uri() {
        let err = SymptomPhoto::from_data_uri("https://example.com/a.png");
        assert!(matches!(err, Err(PhotoParseError::MissingPrefix)));
    }

    #[test]
    fn rejects_missing_base64_marker() {
        let err = SymptomPhoto::from_data_uri("data:image/png,rawbytes");
        assert!(matches!(err, Err(PhotoParseError::MissingPrefix)));
    }

    #[test]
    fn rejects_non_image_mime() {
        let err = SymptomPhoto::from_data_uri("data:application/pdf;base64,aGk=");
        assert!(matches!(err, Err(PhotoParseError::NotAnImage(m)) if m == "application/pdf"));
    }

    #[test]
    fn rejects_empty_payload() {
        let err = SymptomPhoto::from_data_uri("data:image/png;base64,");
        assert!(matches!(err, Err(PhotoParseError::Empty)));
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = SymptomPhoto::from_data_uri("data:image/png;base64,!!!not-base64!!!");
        assert!(matches!(err, Err(PhotoParseError::InvalidBase64)));
    }

    // ── insufficiency ──

    #[test]
    fn empty_description_without_photo_is_insufficient() {
        assert!(SymptomInput::new("").is_insufficient());
        assert!(SymptomInput::new("   \n\t ").is_insufficient());
    }

    #[test]
    fn photo_alone_is_sufficient() {
        let photo = SymptomPhoto::from_data_uri(&tiny_png_uri()).unwrap();
        let input = SymptomInput::new("").with_photo(photo);
        assert!(!input.has_description());
        assert!(!input.is_insufficient());
    }

    #[test]
    fn description_alone_is_sufficient() {
        assert!(!SymptomInput::new("mild headache").is_insufficient());
    }
}
