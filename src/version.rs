//! Protocol version dispatch.
//!
//! Each supported version is a sealed marker type. The [`PublicVersion`] and
//! [`LocalVersion`] capability traits carry the actual sign/verify and
//! encrypt/decrypt algorithms as provided methods, so a version opts into a
//! purpose with a bare `impl`. Keys are generic over these markers, which is
//! what keeps a key bound to the payload variant and algorithm of its
//! version at compile time.

use chacha20poly1305::aead::{Aead, Payload as AeadPayload};
use chacha20poly1305::{KeyInit, XChaCha20Poly1305, XNonce};
use ed25519_dalek::Signer as _;
use rand::rngs::OsRng;
use rand::RngCore as _;

use crate::blob::Blob;
use crate::error::PasetokError;
use crate::header::{Header, Purpose, Version};
use crate::keys::{AsymmetricPublicKey, AsymmetricSecretKey, SymmetricKey};
use crate::pae::pae;
use crate::payload::{Encrypted, Signed, NONCE_LEN};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::V2 {}
    impl Sealed for super::V4 {}
}

/// Marker trait binding an implementation type to its version tag.
pub trait Implementation: sealed::Sealed + Sized {
    const VERSION: Version;
}

/// Version 2 of the protocol.
#[derive(Debug, Clone, Copy)]
pub struct V2;

/// Version 4 of the protocol.
#[derive(Debug, Clone, Copy)]
pub struct V4;

impl Implementation for V2 {
    const VERSION: Version = Version::V2;
}

impl Implementation for V4 {
    const VERSION: Version = Version::V4;
}

/// Signing and verification for `public` tokens.
///
/// The signed message is exactly `PAE([header, message, footer])`.
pub trait PublicVersion: Implementation {
    fn sign(
        message: &[u8],
        key: &AsymmetricSecretKey<Self>,
        footer: &[u8],
    ) -> Blob<Signed> {
        let header = Header::new(Self::VERSION, Purpose::Public);
        let header_bytes = header.serialize().into_bytes();

        let pre_auth = pae(&[header_bytes.as_slice(), message, footer]);
        let signature = key.signing_key().sign(&pre_auth);

        Blob::new(
            header,
            Signed::new(message.to_vec(), signature.to_bytes()),
            footer.to_vec(),
        )
    }

    fn verify(
        blob: &Blob<Signed>,
        key: &AsymmetricPublicKey<Self>,
    ) -> Result<Vec<u8>, PasetokError> {
        let header = blob.header();
        if header.version != Self::VERSION {
            return Err(PasetokError::DisallowedVersion(header.version));
        }
        let header_bytes = header.serialize().into_bytes();

        let payload = blob.payload();
        let pre_auth = pae(&[header_bytes.as_slice(), payload.message(), blob.footer()]);
        let signature = ed25519_dalek::Signature::from_bytes(payload.signature());

        key.verifying_key()
            .verify_strict(&pre_auth, &signature)
            .map_err(|_| PasetokError::InvalidSignature)?;

        Ok(payload.message().to_vec())
    }
}

/// Encryption and decryption for `local` tokens.
///
/// A fresh random 24-byte nonce is drawn per encryption; the associated
/// data is exactly `PAE([header, nonce, footer])`, so header, nonce and
/// footer are all bound by the tag without the footer being encrypted.
pub trait LocalVersion: Implementation {
    fn encrypt(
        message: &[u8],
        key: &SymmetricKey<Self>,
        footer: &[u8],
    ) -> Result<Blob<Encrypted>, PasetokError> {
        let header = Header::new(Self::VERSION, Purpose::Local);
        let header_bytes = header.serialize().into_bytes();

        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let pre_auth = pae(&[header_bytes.as_slice(), &nonce, footer]);
        let cipher = XChaCha20Poly1305::new(key.material().into());
        let ciphertext = cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                AeadPayload {
                    msg: message,
                    aad: &pre_auth,
                },
            )
            .map_err(|e| PasetokError::EncryptionFailed(e.to_string()))?;

        Ok(Blob::new(
            header,
            Encrypted::new(nonce, ciphertext),
            footer.to_vec(),
        ))
    }

    fn decrypt(
        blob: &Blob<Encrypted>,
        key: &SymmetricKey<Self>,
    ) -> Result<Vec<u8>, PasetokError> {
        let header = blob.header();
        if header.version != Self::VERSION {
            return Err(PasetokError::DisallowedVersion(header.version));
        }
        let header_bytes = header.serialize().into_bytes();

        let payload = blob.payload();
        let pre_auth = pae(&[
            header_bytes.as_slice(),
            payload.nonce().as_slice(),
            blob.footer(),
        ]);
        let cipher = XChaCha20Poly1305::new(key.material().into());

        cipher
            .decrypt(
                XNonce::from_slice(payload.nonce()),
                AeadPayload {
                    msg: payload.ciphertext(),
                    aad: &pre_auth,
                },
            )
            .map_err(|_| PasetokError::DecryptionFailed)
    }
}

impl PublicVersion for V2 {}
impl LocalVersion for V2 {}
impl PublicVersion for V4 {}
impl LocalVersion for V4 {}
