//! Checksums of serialized schema documents

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::Result;
use crate::schema::SchemaDocument;

/// SHA256 checksum of generated output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Checksum of the compact JSON rendering of a document
    pub fn of_document(document: &SchemaDocument) -> Result<Self> {
        let rendered = serde_json::to_vec(document)?;
        Ok(Self::from_bytes(&rendered))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &[u8]) -> bool {
        Self::from_bytes(content) == *self
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeSpec, AttributeType, ModelDefinition};
    use crate::transform::{transform, TransformOptions};

    #[test]
    fn test_document_checksum_is_stable() {
        let models = vec![ModelDefinition::new("box")
            .with_attribute("name", AttributeSpec::scalar(AttributeType::String))];
        let options = TransformOptions::default();
        let first = Checksum::of_document(&transform(&models, &options)).unwrap();
        let second = Checksum::of_document(&transform(&models, &options)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
    }

    #[test]
    fn test_checksum_verification() {
        let content = br#"{"identity": "box"}"#;
        let checksum = Checksum::from_bytes(content);
        assert!(checksum.verify(content));
        assert!(!checksum.verify(b"different content"));
    }
}
