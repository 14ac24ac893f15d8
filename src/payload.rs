//! Payload variants for the two token purposes.
//!
//! Each variant self-encodes to a base64url-no-pad segment and rejects
//! decoded input whose length cannot hold its fixed-size components.

use crate::codec;
use crate::header::Purpose;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// XChaCha20-Poly1305 nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag length in bytes.
pub const TAG_LEN: usize = 16;

/// A self-encoding payload segment of a token.
pub trait Payload: Sized {
    /// The purpose tag this payload shape belongs to.
    const PURPOSE: Purpose;

    /// Deterministic encoding to a base64url-no-pad segment.
    fn encode(&self) -> String;

    /// Decode a base64url segment. Returns `None` if the base64 is invalid
    /// or the decoded length does not fit the expected layout.
    fn decode(encoded: &str) -> Option<Self>;
}

/// Payload of a `public` token: the message with a fixed-length Ed25519
/// signature appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    message: Vec<u8>,
    signature: [u8; SIGNATURE_LEN],
}

impl Signed {
    pub(crate) fn new(message: Vec<u8>, signature: [u8; SIGNATURE_LEN]) -> Signed {
        Signed { message, signature }
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature
    }
}

impl Payload for Signed {
    const PURPOSE: Purpose = Purpose::Public;

    fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(self.message.len() + SIGNATURE_LEN);
        raw.extend_from_slice(&self.message);
        raw.extend_from_slice(&self.signature);
        codec::b64_encode(&raw)
    }

    fn decode(encoded: &str) -> Option<Signed> {
        let raw = codec::b64_decode(encoded)?;
        if raw.len() < SIGNATURE_LEN {
            return None;
        }
        let (message, sig) = raw.split_at(raw.len() - SIGNATURE_LEN);
        let mut signature = [0u8; SIGNATURE_LEN];
        signature.copy_from_slice(sig);
        Some(Signed {
            message: message.to_vec(),
            signature,
        })
    }
}

/// Payload of a `local` token: the nonce followed by the ciphertext with
/// its authentication tag appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encrypted {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl Encrypted {
    pub(crate) fn new(nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Encrypted {
        Encrypted { nonce, ciphertext }
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Ciphertext including the trailing tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl Payload for Encrypted {
    const PURPOSE: Purpose = Purpose::Local;

    fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        raw.extend_from_slice(&self.nonce);
        raw.extend_from_slice(&self.ciphertext);
        codec::b64_encode(&raw)
    }

    fn decode(encoded: &str) -> Option<Encrypted> {
        let raw = codec::b64_decode(encoded)?;
        if raw.len() < NONCE_LEN + TAG_LEN {
            return None;
        }
        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Some(Encrypted {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
