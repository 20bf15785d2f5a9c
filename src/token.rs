//! Ephemeral display-only tokens.

use rand::RngCore;

/// Number of random bytes per token; hex encoding doubles the length
pub const TOKEN_BYTES: usize = 24;

/// Generate a fresh random token as lowercase hex
///
/// Tokens are shown once and never stored or validated.
pub fn generate_ephemeral_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
