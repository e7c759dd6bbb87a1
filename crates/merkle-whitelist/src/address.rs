//! Address decoding boundary.
//!
//! Every address is reduced to its 20 raw bytes here, before it can reach the
//! hasher. Display casing never influences a leaf.

use crate::error::{Result, WhitelistError};
use alloy_primitives::Address;

/// Number of bytes in a raw address
const ADDRESS_LEN: usize = 20;

/// Number of hex digits in an encoded address
const ADDRESS_HEX_LEN: usize = ADDRESS_LEN * 2;

/// How mixed-case input is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Mixed-case input must carry a valid EIP-55 checksum
    #[default]
    Strict,
    /// Casing is ignored entirely
    Lenient,
}

impl ChecksumPolicy {
    /// Returns the string representation of the policy
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl From<&str> for ChecksumPolicy {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lenient" | "ignore" | "off" => Self::Lenient,
            _ => Self::Strict,
        }
    }
}

/// Decode a `0x`-prefixed hex address, enforcing EIP-55 on mixed case.
pub fn decode_address(input: &str) -> Result<Address> {
    decode_address_with(input, ChecksumPolicy::Strict)
}

/// Decode a `0x`-prefixed hex address under the given checksum policy.
///
/// Surrounding whitespace is ignored. Anything other than exactly 40 hex
/// digits fails with [`WhitelistError::InvalidAddressEncoding`]; input is
/// never truncated or padded.
pub fn decode_address_with(input: &str, policy: ChecksumPolicy) -> Result<Address> {
    let trimmed = input.trim();
    let Some(digits) = trimmed.strip_prefix("0x") else {
        return Err(WhitelistError::address(input, "missing 0x prefix"));
    };

    if digits.len() != ADDRESS_HEX_LEN {
        return Err(WhitelistError::address(
            input,
            format!("expected {ADDRESS_HEX_LEN} hex digits, got {}", digits.len()),
        ));
    }

    let mut bytes = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|e| WhitelistError::address(input, e.to_string()))?;
    let address = Address::from(bytes);

    if policy == ChecksumPolicy::Strict
        && is_mixed_case(digits)
        && address.to_checksum(None) != trimmed
    {
        return Err(WhitelistError::InvalidChecksum {
            input: input.to_string(),
        });
    }

    Ok(address)
}

/// Decode an address from its raw binary form.
pub fn decode_address_bytes(bytes: &[u8]) -> Result<Address> {
    if bytes.len() != ADDRESS_LEN {
        return Err(WhitelistError::address(
            format!("0x{}", hex::encode(bytes)),
            format!("expected {ADDRESS_LEN} bytes, got {}", bytes.len()),
        ));
    }
    Ok(Address::from_slice(bytes))
}

fn is_mixed_case(digits: &str) -> bool {
    digits.bytes().any(|b| b.is_ascii_lowercase()) && digits.bytes().any(|b| b.is_ascii_uppercase())
}
