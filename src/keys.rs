//! Version-tagged key material.
//!
//! Every key is generic over a protocol-version marker, so the type system
//! refuses a key whose version or purpose does not match the operation:
//! a `SymmetricKey` cannot verify a signed blob, and a v2-typed key cannot
//! be passed where a v4 implementation is expected.

use std::fmt;
use std::marker::PhantomData;

use zeroize::Zeroizing;

use crate::error::PasetokError;
use crate::header::Version;
use crate::version::{LocalVersion, PublicVersion};

/// Symmetric key length for `local` tokens.
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// Ed25519 seed length.
pub const ED25519_SEED_LEN: usize = 32;

/// Ed25519 public key length.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Symmetric key for `local` tokens. The material is zeroed from memory
/// when the key is dropped.
#[derive(Clone)]
pub struct SymmetricKey<V: LocalVersion> {
    material: Zeroizing<[u8; SYMMETRIC_KEY_LEN]>,
    _version: PhantomData<V>,
}

impl<V: LocalVersion> SymmetricKey<V> {
    pub fn from_bytes(bytes: &[u8]) -> Result<SymmetricKey<V>, PasetokError> {
        let material: [u8; SYMMETRIC_KEY_LEN] =
            bytes.try_into().map_err(|_| PasetokError::InvalidKeyLength {
                expected: SYMMETRIC_KEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(SymmetricKey {
            material: Zeroizing::new(material),
            _version: PhantomData,
        })
    }

    pub fn version(&self) -> Version {
        V::VERSION
    }

    pub(crate) fn material(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.material
    }
}

impl<V: LocalVersion> fmt::Debug for SymmetricKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("version", &V::VERSION)
            .finish_non_exhaustive()
    }
}

/// Ed25519 secret key for signing `public` tokens. The inner signing key
/// zeroes its secret scalar on drop.
#[derive(Clone)]
pub struct AsymmetricSecretKey<V: PublicVersion> {
    signing_key: ed25519_dalek::SigningKey,
    _version: PhantomData<V>,
}

impl<V: PublicVersion> AsymmetricSecretKey<V> {
    /// Build a secret key from a 32-byte Ed25519 seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<AsymmetricSecretKey<V>, PasetokError> {
        let seed: [u8; ED25519_SEED_LEN] =
            bytes.try_into().map_err(|_| PasetokError::InvalidKeyLength {
                expected: ED25519_SEED_LEN,
                actual: bytes.len(),
            })?;
        Ok(AsymmetricSecretKey {
            signing_key: ed25519_dalek::SigningKey::from_bytes(&seed),
            _version: PhantomData,
        })
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> AsymmetricPublicKey<V> {
        AsymmetricPublicKey {
            verifying_key: self.signing_key.verifying_key(),
            _version: PhantomData,
        }
    }

    pub fn version(&self) -> Version {
        V::VERSION
    }

    pub(crate) fn signing_key(&self) -> &ed25519_dalek::SigningKey {
        &self.signing_key
    }
}

impl<V: PublicVersion> fmt::Debug for AsymmetricSecretKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricSecretKey")
            .field("version", &V::VERSION)
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key for verifying `public` tokens.
#[derive(Debug, Clone)]
pub struct AsymmetricPublicKey<V: PublicVersion> {
    verifying_key: ed25519_dalek::VerifyingKey,
    _version: PhantomData<V>,
}

impl<V: PublicVersion> AsymmetricPublicKey<V> {
    /// Build a public key from 32 bytes, rejecting non-canonical points.
    pub fn from_bytes(bytes: &[u8]) -> Result<AsymmetricPublicKey<V>, PasetokError> {
        let material: [u8; ED25519_PUBLIC_KEY_LEN] =
            bytes.try_into().map_err(|_| PasetokError::InvalidKeyLength {
                expected: ED25519_PUBLIC_KEY_LEN,
                actual: bytes.len(),
            })?;
        let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&material)
            .map_err(|e| PasetokError::InvalidKey(e.to_string()))?;
        Ok(AsymmetricPublicKey {
            verifying_key,
            _version: PhantomData,
        })
    }

    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LEN] {
        self.verifying_key.to_bytes()
    }

    pub fn version(&self) -> Version {
        V::VERSION
    }

    pub(crate) fn verifying_key(&self) -> &ed25519_dalek::VerifyingKey {
        &self.verifying_key
    }
}
