//! Pasetok: versioned, purpose-tagged security tokens.
//!
//! Tokens are dot-delimited strings `v{version}.{purpose}.{payload}[.{footer}]`
//! with either an Ed25519-signed (`public`) or XChaCha20-Poly1305-encrypted
//! (`local`) payload. The signed/authenticated message is the canonical
//! pre-authentication encoding of the token's fields, and keys carry their
//! protocol version as a type parameter so a key can only drive the
//! operations its version and purpose support.

pub mod blob;
pub mod codec;
pub mod error;
pub mod header;
pub mod keys;
pub mod pae;
pub mod payload;
pub mod token;
pub mod version;
