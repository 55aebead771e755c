//! Definition hashing utilities.
//!
//! This module provides the [`DefinitionHasher`] type used to compute a
//! stable SHA-256 digest over the definitions of one class. Reports carry the
//! digest so two runs can be compared without diffing the generated sources.
//!
//! # Examples
//!
//! ```
//! use stepsmith::hasher::DefinitionHasher;
//!
//! let empty = DefinitionHasher::hash(&[]);
//! assert_eq!(empty.len(), 64);
//! ```

use sha2::{Digest, Sha256};

use crate::model::{GeneratedDefinition, Parameter};

/// Computes stable digests for lists of [`GeneratedDefinition`]s.
pub struct DefinitionHasher;

impl DefinitionHasher {
    /// Calculate the hash of the definitions of one class, in order.
    #[must_use]
    pub fn hash(definitions: &[GeneratedDefinition]) -> String {
        let mut hasher = Sha256::new();
        for definition in definitions {
            Self::hash_definition(&mut hasher, definition);
        }
        format!("{:x}", hasher.finalize())
    }

    fn hash_definition(hasher: &mut Sha256, definition: &GeneratedDefinition) {
        hasher.update(b"def");
        Self::update_with_len(hasher, definition.keyword().as_str().as_bytes());
        Self::update_with_len(hasher, definition.method_name().as_bytes());
        Self::update_with_len(hasher, definition.match_pattern().as_bytes());
        Self::hash_parameters(hasher, definition.signature().captured());
        Self::hash_parameters(hasher, definition.signature().blocks());
        Self::update_with_len(hasher, definition.body().as_bytes());
    }

    fn hash_parameters(hasher: &mut Sha256, parameters: &[Parameter]) {
        hasher.update(format!("{}:", parameters.len()).as_bytes());
        for parameter in parameters {
            Self::update_with_len(hasher, parameter.ty().java_type().as_bytes());
            Self::update_with_len(hasher, parameter.name().as_bytes());
        }
    }

    fn update_with_len(hasher: &mut Sha256, bytes: &[u8]) {
        let len = bytes.len();
        hasher.update(format!("{len}:").as_bytes());
        hasher.update(bytes);
    }
}
