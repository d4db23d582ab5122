//! Generated image payloads returned by the generation server.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{SketchError, SketchResult};

/// Standard alphabet that accepts payloads with or without `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A base64-encoded raster image produced by the generation server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedImage {
    base64: String,
}

impl GeneratedImage {
    /// Wrap a base64 payload as received from the server.
    #[must_use]
    pub fn from_base64(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into().trim().to_string(),
        }
    }

    /// Encode raw image bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// The base64 payload.
    #[must_use]
    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    /// Decode the payload to raw image bytes.
    ///
    /// Missing padding is tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidImage`] if the payload is not base64.
    pub fn to_bytes(&self) -> SketchResult<Vec<u8>> {
        LENIENT
            .decode(self.base64.as_bytes())
            .map_err(|e| SketchError::InvalidImage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_bytes() {
        let image = GeneratedImage::from_bytes(&[137, 80, 78, 71]);
        assert_eq!(image.as_base64(), "iVBORw==");
        assert_eq!(image.to_bytes().expect("decode"), vec![137, 80, 78, 71]);
    }

    #[test]
    fn test_missing_padding_is_accepted() {
        let image = GeneratedImage::from_base64("iVBORw");
        assert_eq!(image.to_bytes().expect("decode"), vec![137, 80, 78, 71]);
    }

    #[test]
    fn test_invalid_payload() {
        let image = GeneratedImage::from_base64("not base64!");
        assert!(matches!(image.to_bytes(), Err(SketchError::InvalidImage(_))));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let image = GeneratedImage::from_base64("abc123");
        assert_eq!(
            serde_json::to_string(&image).expect("json"),
            "\"abc123\""
        );
    }
}
