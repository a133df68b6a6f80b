//! Opaque token generation and storage-hash derivation.
//!
//! Refresh tokens are random opaque strings handed to the client in
//! plaintext. Before storage they are run through PBKDF2-HMAC-SHA512 keyed
//! with a salt derived from the owning account's id, so the stored hash is
//! deterministic per (token, account) pair and lookups are a single
//! exact-match query.
//!
//! Adaptive password hashes (Argon2, bcrypt) are deliberately NOT used here:
//! their salts are random, so validating a presented token would require a
//! comparison loop over every stored row at full work-factor cost, and
//! refresh-token validation volume makes that prohibitive. The account-id
//! salt is reproducible and not secret — this scheme is obfuscation against
//! a leaked table, not confidentiality.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Alphabet for opaque refresh tokens (URL-safe).
const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Alphabet for emailed verification codes (alphanumeric only, so codes
/// survive copy/paste and URL embedding without escaping).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of emailed verification codes.
pub const VERIFICATION_CODE_LENGTH: usize = 32;

/// Generate a random opaque token of the given length.
///
/// SECURITY: Uses `OsRng` directly from the operating system's CSPRNG.
/// Do NOT use `Uuid::new_v4()` as it is not designed for cryptographic
/// security.
#[must_use]
pub fn generate_opaque_token(length: usize) -> String {
    random_string(TOKEN_ALPHABET, length)
}

/// Generate a random verification code over the fixed alphanumeric alphabet.
#[must_use]
pub fn generate_verification_code() -> String {
    random_string(CODE_ALPHABET, VERIFICATION_CODE_LENGTH)
}

fn random_string(alphabet: &[u8], length: usize) -> String {
    let mut rng = rand::rngs::OsRng;
    let mut out = String::with_capacity(length);
    let mut buf = [0u8; 64];

    while out.len() < length {
        rng.fill_bytes(&mut buf);
        for byte in buf {
            // Rejection sampling keeps the distribution uniform when the
            // alphabet size does not divide 256.
            let bound = 256 - (256 % alphabet.len());
            if (byte as usize) < bound {
                out.push(alphabet[byte as usize % alphabet.len()] as char);
                if out.len() == length {
                    break;
                }
            }
        }
    }

    out
}

/// Derive the storage hash for a refresh token.
///
/// The salt is the owning account's id, hex-flattened and reversed. That
/// only makes the salt less obvious in a leaked table; it adds no actual
/// secrecy. What matters is that it is reproducible, so the same
/// (token, account) pair always derives the same hash and the token row can
/// be found with an exact-match query.
///
/// # Arguments
///
/// * `token` - The plaintext opaque token
/// * `account_id` - The owning account's id (salt source)
/// * `rounds` - PBKDF2 iteration count
/// * `length` - Derived key length in bytes
#[must_use]
pub fn derive_token_hash(token: &str, account_id: &Uuid, rounds: u32, length: usize) -> String {
    let salt: String = account_id.simple().to_string().chars().rev().collect();

    let mut derived = vec![0u8; length];
    pbkdf2_hmac::<Sha512>(token.as_bytes(), salt.as_bytes(), rounds, &mut derived);

    STANDARD.encode(derived)
}

/// Verify a plaintext token against a stored hash using constant-time
/// comparison.
///
/// This prevents timing attacks by ensuring the comparison takes the same
/// amount of time regardless of where the first difference occurs.
#[must_use]
pub fn verify_token_hash_constant_time(
    token: &str,
    account_id: &Uuid,
    rounds: u32,
    length: usize,
    stored_hash: &str,
) -> bool {
    let derived = derive_token_hash(token, account_id, rounds, length);
    derived.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUNDS: u32 = 100;
    const LENGTH: usize = 64;

    #[test]
    fn opaque_token_length_and_charset() {
        let token = generate_opaque_token(64);
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[test]
    fn opaque_tokens_are_unique() {
        let token1 = generate_opaque_token(64);
        let token2 = generate_opaque_token(64);
        assert_ne!(token1, token2);
    }

    #[test]
    fn verification_code_length_and_charset() {
        let code = generate_verification_code();
        assert_eq!(code.len(), VERIFICATION_CODE_LENGTH);
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn token_hash_deterministic_per_account() {
        let account_id = Uuid::new_v4();
        let hash1 = derive_token_hash("my-token", &account_id, ROUNDS, LENGTH);
        let hash2 = derive_token_hash("my-token", &account_id, ROUNDS, LENGTH);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn token_hash_differs_across_accounts() {
        let hash1 = derive_token_hash("my-token", &Uuid::new_v4(), ROUNDS, LENGTH);
        let hash2 = derive_token_hash("my-token", &Uuid::new_v4(), ROUNDS, LENGTH);
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn token_hash_differs_across_tokens() {
        let account_id = Uuid::new_v4();
        let hash1 = derive_token_hash("token-one", &account_id, ROUNDS, LENGTH);
        let hash2 = derive_token_hash("token-two", &account_id, ROUNDS, LENGTH);
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn token_hash_is_base64_of_requested_length() {
        let hash = derive_token_hash("my-token", &Uuid::new_v4(), ROUNDS, LENGTH);
        let decoded = STANDARD.decode(&hash).unwrap();
        assert_eq!(decoded.len(), LENGTH);
    }

    #[test]
    fn constant_time_verification_correct_token() {
        let account_id = Uuid::new_v4();
        let hash = derive_token_hash("the-token", &account_id, ROUNDS, LENGTH);
        assert!(verify_token_hash_constant_time(
            "the-token",
            &account_id,
            ROUNDS,
            LENGTH,
            &hash
        ));
    }

    #[test]
    fn constant_time_verification_wrong_token() {
        let account_id = Uuid::new_v4();
        let hash = derive_token_hash("the-token", &account_id, ROUNDS, LENGTH);
        assert!(!verify_token_hash_constant_time(
            "wrong-token",
            &account_id,
            ROUNDS,
            LENGTH,
            &hash
        ));
    }

    #[test]
    fn constant_time_verification_wrong_account() {
        let account_id = Uuid::new_v4();
        let hash = derive_token_hash("the-token", &account_id, ROUNDS, LENGTH);
        assert!(!verify_token_hash_constant_time(
            "the-token",
            &Uuid::new_v4(),
            ROUNDS,
            LENGTH,
            &hash
        ));
    }
}
