//! Authentication primitives for troupe.
//!
//! This crate provides:
//! - JWT HS256 encoding and decoding for access tokens
//! - Argon2id password hashing with OWASP-recommended parameters
//! - Opaque token generation and deterministic storage-hash derivation for
//!   refresh tokens
//!
//! # Example
//!
//! ```rust
//! use troupe_auth::{encode_token, decode_token, Claims, hash_password, verify_password};
//!
//! let secret = b"signing-secret";
//!
//! // Create JWT claims and encode a token
//! let claims = Claims::new("user@example.com", 900);
//! let token = encode_token(&claims, secret).unwrap();
//!
//! // Decode the token
//! let decoded = decode_token(&token, secret).unwrap();
//! assert_eq!(decoded.email, "user@example.com");
//!
//! // Hash and verify a password
//! let hash = hash_password("my-secure-password").unwrap();
//! assert!(verify_password("my-secure-password", &hash).unwrap());
//! ```

mod claims;
mod error;
mod jwt;
mod password;
mod token_hash;

// Re-export public API
pub use claims::Claims;
pub use error::AuthError;
pub use jwt::{decode_token, decode_token_with_config, encode_token, ValidationConfig};
pub use password::{hash_password, verify_password, PasswordHasher};
pub use token_hash::{
    derive_token_hash, generate_opaque_token, generate_verification_code,
    verify_token_hash_constant_time, VERIFICATION_CODE_LENGTH,
};
