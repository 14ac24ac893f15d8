use thiserror::Error;

use crate::header::Version;

#[derive(Debug, Error)]
pub enum PasetokError {
    #[error("invalid signature for this token")]
    InvalidSignature,

    #[error("decryption failed: ciphertext or tag rejected")]
    DecryptionFailed,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("claims could not be serialised: {0}")]
    SerializationError(String),

    #[error("claims could not be decoded as a flat string map: {0}")]
    DecodeError(String),

    #[error("version {0} is not in the allowed set")]
    DisallowedVersion(Version),

    #[error("footer is not valid UTF-8")]
    BadEncoding,

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid key material: {0}")]
    InvalidKey(String),
}
