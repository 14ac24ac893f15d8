//! Tamper detection: any single-character corruption of a token's payload
//! or footer segment must either break the wire format or fail
//! authentication. Nothing corrupted may verify.

use pasetok::blob::Blob;
use pasetok::error::PasetokError;
use pasetok::header::Version;
use pasetok::keys::{AsymmetricPublicKey, AsymmetricSecretKey, SymmetricKey};
use pasetok::payload::{Encrypted, Signed};
use pasetok::token::Token;
use pasetok::version::{V2, V4};

/// Replace the character at `index` with a different base64url character.
fn corrupt_at(wire: &str, index: usize) -> String {
    let mut bytes = wire.as_bytes().to_vec();
    bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).expect("ascii substitution")
}

/// Byte range of the given dot-separated segment.
fn segment_range(wire: &str, segment: usize) -> std::ops::Range<usize> {
    let mut start = 0;
    for _ in 0..segment {
        start += wire[start..].find('.').expect("segment present") + 1;
    }
    let end = wire[start..]
        .find('.')
        .map_or(wire.len(), |offset| start + offset);
    start..end
}

fn signed_fixture() -> (String, AsymmetricPublicKey<V2>) {
    let key = AsymmetricSecretKey::<V2>::from_bytes(&[0x42u8; 32]).expect("seed length");
    let wire = Token::new([("sub", "alice")])
        .with_footer("key-id: gandalf")
        .with_allowed_versions(&[Version::V2])
        .sign(&key)
        .expect("sign")
        .serialize();
    (wire, key.public_key())
}

#[test]
fn test_signed_payload_corruption_never_verifies() {
    let (wire, public) = signed_fixture();

    for index in segment_range(&wire, 2) {
        let corrupted = corrupt_at(&wire, index);
        match Blob::<Signed>::parse(&corrupted) {
            None => {} // broke the wire format: acceptable
            Some(blob) => assert!(
                blob.verify(&public).is_err(),
                "corrupting payload byte {index} must fail verification"
            ),
        }
    }
}

#[test]
fn test_signed_footer_corruption_never_verifies() {
    let (wire, public) = signed_fixture();

    for index in segment_range(&wire, 3) {
        let corrupted = corrupt_at(&wire, index);
        match Blob::<Signed>::parse(&corrupted) {
            None => {}
            Some(blob) => assert!(
                blob.verify(&public).is_err(),
                "corrupting footer byte {index} must fail verification"
            ),
        }
    }
}

#[test]
fn test_stripping_footer_fails_verification() {
    let (wire, public) = signed_fixture();

    let last_dot = wire.rfind('.').expect("footer segment");
    let stripped = &wire[..last_dot];

    let blob = Blob::<Signed>::parse(stripped).expect("still well-formed");
    assert!(matches!(
        blob.verify(&public),
        Err(PasetokError::InvalidSignature)
    ));
}

#[test]
fn test_header_swap_is_rejected() {
    let (wire, public) = signed_fixture();

    // Rewrite the version tag: the blob parses but the key refuses it.
    let swapped = wire.replacen("v2.", "v4.", 1);
    let blob = Blob::<Signed>::parse(&swapped).expect("well-formed");
    assert!(blob.verify(&public).is_err());
}

#[test]
fn test_encrypted_payload_corruption_never_decrypts() {
    let key = SymmetricKey::<V4>::from_bytes(&[0x17u8; 32]).expect("key length");
    let wire = encrypted_fixture(&key);

    for index in segment_range(&wire, 2) {
        let corrupted = corrupt_at(&wire, index);
        match Blob::<Encrypted>::parse(&corrupted) {
            None => {}
            Some(blob) => assert!(
                blob.decrypt(&key).is_err(),
                "corrupting ciphertext byte {index} must fail decryption"
            ),
        }
    }
}

#[test]
fn test_encrypted_footer_corruption_never_decrypts() {
    let key = SymmetricKey::<V4>::from_bytes(&[0x17u8; 32]).expect("key length");
    let wire = encrypted_fixture(&key);

    for index in segment_range(&wire, 3) {
        let corrupted = corrupt_at(&wire, index);
        match Blob::<Encrypted>::parse(&corrupted) {
            None => {}
            Some(blob) => assert!(
                blob.decrypt(&key).is_err(),
                "corrupting footer byte {index} must fail decryption"
            ),
        }
    }
}

fn encrypted_fixture(key: &SymmetricKey<V4>) -> String {
    Token::new([("sub", "alice")])
        .with_footer("meta")
        .encrypt(key)
        .expect("encrypt")
        .serialize()
}
