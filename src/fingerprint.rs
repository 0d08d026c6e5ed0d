//! Content-addressed cache keys for conversation slices
//!
//! The fingerprint is a SHA-256 digest over a versioned, order-preserving,
//! length-prefixed serialization of the turn sequence. Unlike a language
//! built-in hash it is stable across process restarts, so it is safe to use
//! as an external cache or idempotency key.

use chrono::SecondsFormat;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::types::ConversationTurn;

/// Serialization version tag; bump when the canonical form changes
const VERSION_TAG: &[u8] = b"reflekta-fp-v1";

/// Deterministic identifier for a conversation slice or context string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint an ordered turn sequence (content + timestamps)
    pub fn of_turns(turns: &[ConversationTurn]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(VERSION_TAG);
        for turn in turns {
            write_field(&mut hasher, turn.question.as_bytes());
            write_field(&mut hasher, turn.response.as_bytes());
            let ts = turn.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
            write_field(&mut hasher, ts.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Fingerprint a rendered context string (question-generation path)
    pub fn of_text(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(VERSION_TAG);
        write_field(&mut hasher, text.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length-prefix each field so adjacent fields can never collide
/// (e.g. "ab"+"c" vs "a"+"bc")
fn write_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update(bytes.len().to_le_bytes());
    hasher.update(b":");
    hasher.update(bytes);
}
