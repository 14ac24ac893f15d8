//! The decoded claims set: the user-facing model produced by verify/decrypt
//! and consumed by sign/encrypt.

use std::collections::BTreeMap;

use crate::blob::Blob;
use crate::error::PasetokError;
use crate::header::Version;
use crate::keys::{AsymmetricSecretKey, SymmetricKey};
use crate::payload::{Encrypted, Signed};
use crate::version::{LocalVersion, PublicVersion};

/// Flat string-to-string claims mapping. Keys are unique; order is
/// irrelevant to the contract.
pub type Claims = BTreeMap<String, String>;

/// A claims set with a footer and a version allow-list.
///
/// Immutable-value semantics: every mutation returns a new token and leaves
/// the original untouched. The allow-list is caller-supplied policy and is
/// checked before signing or encrypting does any cryptographic work; tokens
/// reconstructed from a verified blob carry that blob's version as their
/// allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    claims: Claims,
    footer: String,
    allowed_versions: Vec<Version>,
}

impl Token {
    /// Build a token from `(key, value)` claim pairs. The footer is empty
    /// and the allow-list defaults to the current recommended version.
    pub fn new<K, V, I>(claims: I) -> Token
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Token {
            claims: claims
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            footer: String::new(),
            allowed_versions: vec![Version::V4],
        }
    }

    /// Reconstruct a token from an authenticated claims document.
    ///
    /// Fails with `DecodeError` unless the document is a flat JSON object
    /// of string-to-string pairs.
    pub fn from_claims_json(
        claims_json: &[u8],
        footer: &str,
        allowed_versions: Vec<Version>,
    ) -> Result<Token, PasetokError> {
        let claims: Claims = serde_json::from_slice(claims_json)
            .map_err(|e| PasetokError::DecodeError(e.to_string()))?;
        Ok(Token {
            claims,
            footer: footer.to_string(),
            allowed_versions,
        })
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    pub fn allowed_versions(&self) -> &[Version] {
        &self.allowed_versions
    }

    /// Look up a single claim.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.claims.get(key).map(String::as_str)
    }

    pub fn with_claims(&self, claims: Claims) -> Token {
        Token {
            claims,
            footer: self.footer.clone(),
            allowed_versions: self.allowed_versions.clone(),
        }
    }

    pub fn with_footer(&self, footer: impl Into<String>) -> Token {
        Token {
            claims: self.claims.clone(),
            footer: footer.into(),
            allowed_versions: self.allowed_versions.clone(),
        }
    }

    pub fn with_allowed_versions(&self, allowed_versions: &[Version]) -> Token {
        Token {
            claims: self.claims.clone(),
            footer: self.footer.clone(),
            allowed_versions: allowed_versions.to_vec(),
        }
    }

    /// Overlay a partial claims mapping onto this token's claims.
    /// Right-biased: overlay values win on key conflicts, untouched keys
    /// are kept as they are.
    pub fn merge_claims(&self, overlay: &Claims) -> Token {
        let mut merged = self.claims.clone();
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
        self.with_claims(merged)
    }

    fn serialized_claims(&self) -> Result<Vec<u8>, PasetokError> {
        serde_json::to_vec(&self.claims)
            .map_err(|e| PasetokError::SerializationError(e.to_string()))
    }

    fn check_allowed(&self, version: Version) -> Result<(), PasetokError> {
        if self.allowed_versions.contains(&version) {
            Ok(())
        } else {
            Err(PasetokError::DisallowedVersion(version))
        }
    }

    /// Sign the claims under `key`'s version. Fails with `DisallowedVersion`
    /// before any cryptographic work when the key's version is not in the
    /// allow-list.
    pub fn sign<V: PublicVersion>(
        &self,
        key: &AsymmetricSecretKey<V>,
    ) -> Result<Blob<Signed>, PasetokError> {
        self.check_allowed(V::VERSION)?;
        let claims = self.serialized_claims()?;
        Ok(V::sign(&claims, key, self.footer.as_bytes()))
    }

    /// Encrypt the claims under `key`'s version, with the same allow-list
    /// check as [`Token::sign`].
    pub fn encrypt<V: LocalVersion>(
        &self,
        key: &SymmetricKey<V>,
    ) -> Result<Blob<Encrypted>, PasetokError> {
        self.check_allowed(V::VERSION)?;
        let claims = self.serialized_claims()?;
        V::encrypt(&claims, key, self.footer.as_bytes())
    }

    /// Non-throwing variant of [`Token::sign`]: any failure collapses to
    /// `None`.
    pub fn sign_opt<V: PublicVersion>(&self, key: &AsymmetricSecretKey<V>) -> Option<Blob<Signed>> {
        self.sign(key).ok()
    }

    /// Non-throwing variant of [`Token::encrypt`].
    pub fn encrypt_opt<V: LocalVersion>(&self, key: &SymmetricKey<V>) -> Option<Blob<Encrypted>> {
        self.encrypt(key).ok()
    }
}

impl Default for Token {
    fn default() -> Token {
        Token::new(Claims::new())
    }
}
