//! Errors raised at the decoding boundary.
//!
//! Tree construction, proof derivation and verification never fail; every
//! variant here comes from turning untrusted text or bytes into typed values.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, WhitelistError>;

/// Failure to decode whitelist input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WhitelistError {
    /// Input is not a `0x`-prefixed 20-byte hex address.
    #[error("invalid address encoding {input:?}: {reason}")]
    InvalidAddressEncoding {
        /// The offending input, as received.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Mixed-case address whose casing does not match its EIP-55 checksum.
    #[error("address {input:?} fails EIP-55 checksum validation")]
    InvalidChecksum {
        /// The offending input, as received.
        input: String,
    },

    /// Input is not a `0x`-prefixed 32-byte hex hash.
    #[error("invalid hash encoding {input:?}: {reason}")]
    InvalidHashEncoding {
        /// The offending input, as received.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Proof text is neither blank, a JSON array of strings, nor a comma list.
    #[error("malformed proof: {reason}")]
    MalformedProof {
        /// What was wrong with it.
        reason: String,
    },
}

impl WhitelistError {
    pub(crate) fn address(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddressEncoding {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn hash(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHashEncoding {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
