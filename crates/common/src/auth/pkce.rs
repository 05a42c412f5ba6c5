//! PKCE (Proof Key for Code Exchange) helpers for OAuth 2.0
//!
//! Implements RFC 7636 for the desktop sign-in flow, where no client secret
//! can be kept confidential.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// 32 random bytes, 43 characters once base64url encoded.
const RANDOM_TOKEN_BYTES: usize = 32;

fn random_token() -> String {
    let mut bytes = [0u8; RANDOM_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a code verifier (43 characters, within the 43-128 RFC range)
pub fn generate_code_verifier() -> String {
    random_token()
}

/// BASE64URL(SHA256(ASCII(verifier)))
pub fn generate_code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Random CSRF token echoed back by the authorization server
pub fn generate_state() -> String {
    random_token()
}

/// Compare state tokens without short-circuiting on the first difference
pub fn validate_state(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len()
        && expected.bytes().zip(actual.bytes()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

/// Verifier, challenge and state for one authorization attempt
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Kept secret until the token exchange
    pub code_verifier: String,
    /// Sent with the authorization request
    pub code_challenge: String,
    pub state: String,
}

impl PkceChallenge {
    pub fn generate() -> Self {
        let code_verifier = generate_code_verifier();
        let code_challenge = generate_code_challenge(&code_verifier);
        Self { code_verifier, code_challenge, state: generate_state() }
    }

    /// Always "S256"
    #[must_use]
    pub fn challenge_method(&self) -> &'static str {
        "S256"
    }
}
