//! Salted PBKDF2-HMAC-SHA256 password hashes.
//!
//! Encoded form: `pbkdf2-sha256$<iterations>$<salt>$<hash>` with salt and
//! hash in unpadded standard base64.

use crate::error::RegistryError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const SALT_LENGTH: usize = 16;
pub const HASH_LENGTH: usize = 32;
const SCHEME: &str = "pbkdf2-sha256";

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut hash);

    format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    )
}

/// Check `password` against an encoded hash in constant time.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, RegistryError> {
    let parsed = ParsedHash::parse(encoded).ok_or(RegistryError::MalformedPasswordHash)?;

    let mut candidate = vec![0u8; parsed.hash.len()];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        &parsed.salt,
        parsed.iterations,
        &mut candidate,
    );

    Ok(bool::from(candidate.ct_eq(&parsed.hash)))
}

struct ParsedHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl ParsedHash {
    fn parse(encoded: &str) -> Option<Self> {
        let mut parts = encoded.split('$');
        if parts.next()? != SCHEME {
            return None;
        }
        let iterations: u32 = parts.next()?.parse().ok().filter(|n| *n > 0)?;
        let salt = STANDARD_NO_PAD.decode(parts.next()?).ok()?;
        let hash = STANDARD_NO_PAD.decode(parts.next()?).ok()?;
        if parts.next().is_some() || salt.is_empty() || hash.is_empty() {
            return None;
        }
        Some(Self {
            iterations,
            salt,
            hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ITERATIONS: u32 = 1_000;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let encoded = hash_password("123", TEST_ITERATIONS);
        assert!(verify_password("123", &encoded).unwrap());
        assert!(!verify_password("1234", &encoded).unwrap());
        assert!(!verify_password("", &encoded).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hash_password("123", TEST_ITERATIONS);
        let b = hash_password("123", TEST_ITERATIONS);
        assert_ne!(a, b);
        assert!(a.starts_with("pbkdf2-sha256$1000$"));
    }

    #[test]
    fn plaintext_and_garbage_are_rejected_as_malformed() {
        for bad in [
            "123",
            "",
            "pbkdf2-sha256$0$c2FsdA$aGFzaA",
            "pbkdf2-sha256$x$c2FsdA$aGFzaA",
            "pbkdf2-sha256$10$!!$aGFzaA",
            "pbkdf2-sha256$10$c2FsdA$aGFzaA$extra",
            "md5$10$c2FsdA$aGFzaA",
        ] {
            assert!(
                matches!(
                    verify_password("123", bad),
                    Err(RegistryError::MalformedPasswordHash)
                ),
                "{bad:?} should be malformed"
            );
        }
    }
}
