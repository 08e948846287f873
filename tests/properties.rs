//! Behavioral properties exercised through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;

use pwcrypt::{ErrorCategory, ErrorKind, PasswordCipher, hash};

/// Inputs of varied length and content, all distinct.
fn corpus() -> Vec<Vec<u8>> {
    let mut inputs: Vec<Vec<u8>> = vec![Vec::new()];
    for len in 1..=64 {
        inputs.push(vec![0u8; len]);
        inputs.push(vec![0xffu8; len]);
    }
    for byte in 0..=255u8 {
        inputs.push(vec![byte, byte.wrapping_mul(31), 7]);
    }
    inputs.push(b"The quick brown fox jumps over the lazy dog".to_vec());
    inputs.push(b"The quick brown fox jumps over the lazy dog.".to_vec());
    inputs
}

#[test]
fn test_hash_is_deterministic() {
    for input in corpus() {
        assert_eq!(hash(&input).unwrap(), hash(&input).unwrap());
    }
}

#[test]
fn test_hash_distinct_inputs_distinct_digests() {
    let inputs = corpus();
    let unique_inputs: HashSet<&Vec<u8>> = inputs.iter().collect();
    assert_eq!(unique_inputs.len(), inputs.len(), "corpus has duplicates");

    let digests: HashSet<[u8; 32]> = inputs.iter().map(|i| hash(i).unwrap()).collect();
    assert_eq!(digests.len(), inputs.len());
}

#[test]
fn test_round_trip_text() {
    let cipher = PasswordCipher::new("correct horse battery staple", Some("NaCl"));
    let texts = [
        "",
        "a",
        "exactly sixteen!",
        "héllo wörld ✓",
        "日本語のテキスト",
        "line one\nline two\n\ttabbed",
        "{\"id\":42,\"tags\":[\"a\",\"b\"]}",
    ];

    for text in texts {
        let ciphertext = cipher.encrypt(text.as_bytes()).unwrap();
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), text.as_bytes());
    }
}

#[test]
fn test_round_trip_large_text() {
    let cipher = PasswordCipher::new("test", None);
    let text = "lorem ipsum dolor sit amet ".repeat(5000);
    let ciphertext = cipher.encrypt(text.as_bytes()).unwrap();
    assert_eq!(cipher.decrypt_to_string(&ciphertext).unwrap(), text);
}

#[test]
fn test_ciphertext_is_deterministic() {
    let a = PasswordCipher::new("test", Some("pepper"));
    let b = PasswordCipher::new("test", Some("pepper"));
    assert_eq!(
        a.encrypt(b"same input").unwrap(),
        b.encrypt(b"same input").unwrap()
    );

    // Identical leading blocks encrypt identically too.
    let one = a.encrypt(b"0123456789abcdefTAIL-ONE").unwrap();
    let two = a.encrypt(b"0123456789abcdefTAIL-TWO").unwrap();
    assert_eq!(one[..16], two[..16]);
    assert_ne!(one[16..], two[16..]);
}

#[test]
fn test_cross_salt_isolation() {
    let salted = PasswordCipher::new("test", Some("pepper"));
    let unsalted = PasswordCipher::new("test", None);

    let ciphertext = salted.encrypt(b"hello world").unwrap();
    assert_ne!(ciphertext, unsalted.encrypt(b"hello world").unwrap());

    let err = unsalted.decrypt(&ciphertext).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DecryptFailure);
    assert_eq!(err.len, ciphertext.len());
}

#[test]
fn test_corrupted_ciphertext_is_classified() {
    let cipher = PasswordCipher::new("test", None).with_namespace("ec");
    let ciphertext = cipher.encrypt(b"a message spanning multiple blocks").unwrap();

    for len in [0, 1, 15, 17, ciphertext.len() - 1] {
        let err = cipher.decrypt(&ciphertext[..len]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DecryptFailure);
        assert_eq!(err.category, ErrorCategory::BackEnd);
        assert_eq!(err.namespace, "ec");
        assert_eq!(err.len, len);
    }

    // Flipping a bit in the last block garbles the padding.
    let mut tampered = ciphertext.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;
    match cipher.decrypt(&tampered) {
        Ok(plaintext) => assert_ne!(plaintext, b"a message spanning multiple blocks"),
        Err(err) => assert_eq!(err.kind, ErrorKind::DecryptFailure),
    }
}
