//! Claim submission

use serde::{Deserialize, Serialize};

/// Filename recorded when an upload carries none
pub const UNKNOWN_FILENAME: &str = "unknown";

/// Returns true for `image/*` content types
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// A vehicle-damage photo submitted with its claim details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSubmission {
    /// Policy the claim is filed against
    pub policy_number: Option<String>,
    /// Free-text account of the accident
    pub accident_description: Option<String>,
    /// Original filename of the upload
    pub image_filename: Option<String>,
    /// Declared content type of the upload
    pub image_content_type: Option<String>,
    /// Raw upload bytes
    #[serde(skip)]
    pub image_bytes: Vec<u8>,
}

impl DamageSubmission {
    /// Creates a submission for a photo
    pub fn new(image_bytes: Vec<u8>) -> Self {
        Self {
            image_bytes,
            ..Default::default()
        }
    }

    pub fn with_policy_number(mut self, policy_number: impl Into<String>) -> Self {
        self.policy_number = Some(policy_number.into());
        self
    }

    pub fn with_accident_description(mut self, description: impl Into<String>) -> Self {
        self.accident_description = Some(description.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.image_filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.image_content_type = Some(content_type.into());
        self
    }

    /// Filename as recorded on the claim
    pub fn filename(&self) -> &str {
        self.image_filename.as_deref().unwrap_or(UNKNOWN_FILENAME)
    }

    /// True when the upload was declared as `image/*`; a missing type is not an image
    pub fn has_image_content_type(&self) -> bool {
        self.image_content_type
            .as_deref()
            .is_some_and(is_image_content_type)
    }

    /// Upload bytes, or `None` if the upload was empty
    pub fn image(&self) -> Option<&[u8]> {
        (!self.image_bytes.is_empty()).then_some(self.image_bytes.as_slice())
    }
}
