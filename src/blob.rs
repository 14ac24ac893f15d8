//! The dot-separated wire format: header, payload and optional footer.

use std::fmt;

use crate::codec;
use crate::error::PasetokError;
use crate::header::Header;
use crate::keys::{AsymmetricPublicKey, SymmetricKey};
use crate::payload::{Encrypted, Payload, Signed};
use crate::token::Token;
use crate::version::{LocalVersion, PublicVersion};

/// How a footer segment that fails base64 decoding is handled.
///
/// The original protocol implementation silently treated an undecodable
/// footer as empty. That policy is security-relevant (it changes which
/// bytes end up in the authenticated message), so it is an explicit choice
/// here rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterPolicy {
    /// Reject the whole token.
    #[default]
    Strict,
    /// Keep the token and treat the footer as empty.
    LenientEmpty,
}

/// A parsed or freshly produced token: header, payload and footer.
///
/// The footer is transmitted separately from the payload and is never
/// encrypted; it is bound into the authenticated message through PAE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob<P: Payload> {
    header: Header,
    payload: P,
    footer: Vec<u8>,
}

impl<P: Payload> Blob<P> {
    pub(crate) fn new(header: Header, payload: P, footer: Vec<u8>) -> Blob<P> {
        Blob {
            header,
            payload,
            footer,
        }
    }

    /// Parse a token string with the strict footer policy.
    ///
    /// Returns `None` on any hard failure: wrong segment count, unrecognized
    /// header tags, a header purpose that does not match `P`, or a payload
    /// segment that is not valid base64 of the expected layout. Malformed
    /// input is an expected condition, never an error.
    pub fn parse(token: &str) -> Option<Blob<P>> {
        Blob::parse_with(token, FooterPolicy::Strict)
    }

    /// Parse a token string under an explicit footer-decode policy.
    pub fn parse_with(token: &str, footer_policy: FooterPolicy) -> Option<Blob<P>> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }

        let header = Header::from_tags(parts[0], parts[1])?;
        if header.purpose != P::PURPOSE {
            return None;
        }
        let payload = P::decode(parts[2])?;

        let footer = if parts.len() == 4 {
            match codec::b64_decode(parts[3]) {
                Some(footer) => footer,
                None => match footer_policy {
                    FooterPolicy::Strict => return None,
                    FooterPolicy::LenientEmpty => Vec::new(),
                },
            }
        } else {
            Vec::new()
        };

        Some(Blob {
            header,
            payload,
            footer,
        })
    }

    /// Serialize to the wire string. The footer segment is omitted entirely
    /// when the footer is empty.
    pub fn serialize(&self) -> String {
        let mut out = self.header.serialize();
        out.push_str(&self.payload.encode());
        if !self.footer.is_empty() {
            out.push('.');
            out.push_str(&codec::b64_encode(&self.footer));
        }
        out
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn footer(&self) -> &[u8] {
        &self.footer
    }

    /// Build the user-facing token from an authenticated claims document.
    /// The allow-list of the resulting token is the blob's own version.
    fn token_from(&self, claims_json: &[u8]) -> Result<Token, PasetokError> {
        let footer = std::str::from_utf8(&self.footer).map_err(|_| PasetokError::BadEncoding)?;
        Token::from_claims_json(claims_json, footer, vec![self.header.version])
    }
}

impl Blob<Signed> {
    /// Verify the signature under `key`'s version and return the decoded
    /// claims as a [`Token`]. Fails with `InvalidSignature` when the
    /// recomputed pre-authentication encoding does not verify.
    pub fn verify<V: PublicVersion>(
        &self,
        key: &AsymmetricPublicKey<V>,
    ) -> Result<Token, PasetokError> {
        let message = V::verify(self, key)?;
        self.token_from(&message)
    }
}

impl Blob<Encrypted> {
    /// Decrypt under `key`'s version and return the decoded claims as a
    /// [`Token`]. Fails with `DecryptionFailed` on tag mismatch.
    pub fn decrypt<V: LocalVersion>(
        &self,
        key: &SymmetricKey<V>,
    ) -> Result<Token, PasetokError> {
        let message = V::decrypt(self, key)?;
        self.token_from(&message)
    }
}

impl<P: Payload> fmt::Display for Blob<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::header::{Purpose, Version};
    use crate::payload::{NONCE_LEN, SIGNATURE_LEN, TAG_LEN};

    fn signed_blob(footer: &[u8]) -> Blob<Signed> {
        Blob::new(
            Header::new(Version::V2, Purpose::Public),
            Signed::new(b"message".to_vec(), [0xAB; SIGNATURE_LEN]),
            footer.to_vec(),
        )
    }

    #[test]
    fn test_roundtrip_without_footer() {
        let blob = signed_blob(b"");
        let parsed = Blob::<Signed>::parse(&blob.serialize()).unwrap();
        assert_eq!(parsed, blob);
        assert_eq!(blob.serialize().matches('.').count(), 2);
    }

    #[test]
    fn test_roundtrip_with_footer() {
        let blob = signed_blob(b"key-id: gandalf");
        let parsed = Blob::<Signed>::parse(&blob.serialize()).unwrap();
        assert_eq!(parsed, blob);
        assert_eq!(blob.serialize().matches('.').count(), 3);
    }

    #[test]
    fn test_encrypted_roundtrip() {
        let blob = Blob::new(
            Header::new(Version::V4, Purpose::Local),
            Encrypted::new([0x11; NONCE_LEN], vec![0x22; 48]),
            b"footer".to_vec(),
        );
        let parsed = Blob::<Encrypted>::parse(&blob.serialize()).unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        assert!(Blob::<Signed>::parse("v2.public").is_none());
        assert!(Blob::<Signed>::parse("v2").is_none());
        assert!(Blob::<Signed>::parse("").is_none());

        let four_dots = format!("{}.extra.extra", signed_blob(b"").serialize());
        assert!(Blob::<Signed>::parse(&four_dots).is_none());
    }

    #[test]
    fn test_rejects_unknown_header() {
        assert!(Blob::<Signed>::parse("v9.public.AAAA").is_none());
        assert!(Blob::<Signed>::parse("v2.bogus.AAAA").is_none());
    }

    #[test]
    fn test_rejects_purpose_mismatch() {
        // A local token string cannot materialize as a signed blob.
        let local = Blob::new(
            Header::new(Version::V2, Purpose::Local),
            Encrypted::new([0; NONCE_LEN], vec![0; TAG_LEN]),
            Vec::new(),
        )
        .serialize();
        assert!(Blob::<Signed>::parse(&local).is_none());

        let public = signed_blob(b"").serialize();
        assert!(Blob::<Encrypted>::parse(&public).is_none());
    }

    #[test]
    fn test_rejects_undersized_payload() {
        assert!(Blob::<Signed>::parse("v2.public.AAAA").is_none());
    }

    #[test]
    fn test_footer_policy() {
        let with_bad_footer = format!("{}.!!!", signed_blob(b"").serialize());

        assert!(Blob::<Signed>::parse(&with_bad_footer).is_none());

        let lenient =
            Blob::<Signed>::parse_with(&with_bad_footer, FooterPolicy::LenientEmpty).unwrap();
        assert!(lenient.footer().is_empty());
    }

    #[test]
    fn test_display_matches_serialize() {
        let blob = signed_blob(b"f");
        assert_eq!(blob.to_string(), blob.serialize());
    }
}
