//! Transport encodings for whitelists and proofs.
//!
//! Proofs travel as a JSON array of `0x`-prefixed 32-byte hex strings or as
//! the same strings separated by commas. Whitelists travel as addresses
//! separated by newlines or commas. Everything is normalized here, once,
//! before it reaches the tree or the verifier.

use crate::{
    address::{ChecksumPolicy, decode_address_with},
    error::{Result, WhitelistError},
};
use alloy_primitives::{Address, B256};
use std::collections::HashSet;

/// Number of hex digits in an encoded hash
const HASH_HEX_LEN: usize = 64;

/// Output encoding for proofs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProofFormat {
    /// JSON array of hex strings
    #[default]
    Json,
    /// Comma-separated hex strings
    Csv,
}

impl ProofFormat {
    /// Returns the string representation of the format
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl From<&str> for ProofFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "csv" | "comma" => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Raw proof text, classified by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofInput<'a> {
    /// Blank input, meaning "no proof"
    Empty,
    /// A JSON array of strings
    Json(Vec<String>),
    /// Comma-separated entries, blanks already dropped
    Delimited(Vec<&'a str>),
}

impl<'a> ProofInput<'a> {
    /// Classify proof text without decoding its elements
    pub fn classify(input: &'a str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }

        if trimmed.starts_with('[') {
            let items: Vec<String> =
                serde_json::from_str(trimmed).map_err(|e| WhitelistError::MalformedProof {
                    reason: e.to_string(),
                })?;
            return Ok(Self::Json(items));
        }

        if trimmed.starts_with('{') || trimmed.starts_with('"') {
            return Err(WhitelistError::MalformedProof {
                reason: "expected a JSON array or a comma-separated list".to_string(),
            });
        }

        Ok(Self::Delimited(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        ))
    }

    /// Decode every element into a hash
    pub fn decode(self) -> Result<Vec<B256>> {
        match self {
            Self::Empty => Ok(Vec::new()),
            Self::Json(items) => items.iter().map(|item| decode_hash(item)).collect(),
            Self::Delimited(items) => items.into_iter().map(decode_hash).collect(),
        }
    }
}

/// Parse proof text in any accepted shape
pub fn parse_proof(input: &str) -> Result<Vec<B256>> {
    ProofInput::classify(input)?.decode()
}

/// Decode a `0x`-prefixed 32-byte hex hash
pub fn decode_hash(input: &str) -> Result<B256> {
    let trimmed = input.trim();
    let Some(digits) = trimmed.strip_prefix("0x") else {
        return Err(WhitelistError::hash(input, "missing 0x prefix"));
    };

    if digits.len() != HASH_HEX_LEN {
        return Err(WhitelistError::hash(
            input,
            format!("expected {HASH_HEX_LEN} hex digits, got {}", digits.len()),
        ));
    }

    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|e| WhitelistError::hash(input, e.to_string()))?;
    Ok(B256::from(bytes))
}

/// Format a hash as lowercase hex with `0x` prefix
pub fn format_hash(hash: &B256) -> String {
    format!("{hash:#x}")
}

/// Encode a proof for transport
pub fn format_proof(proof: &[B256], format: ProofFormat) -> String {
    let items: Vec<String> = proof.iter().map(format_hash).collect();
    match format {
        ProofFormat::Json => serde_json::Value::from(items).to_string(),
        ProofFormat::Csv => items.join(","),
    }
}

/// Outcome of parsing whitelist text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedWhitelist {
    /// Distinct addresses, in first-seen order
    pub addresses: Vec<Address>,
    /// Entries that failed to decode
    pub rejected: Vec<WhitelistError>,
}

/// Parse addresses separated by newlines or commas.
///
/// Blank entries are skipped, repeated addresses are kept once, and entries
/// that fail to decode are reported in [`ParsedWhitelist::rejected`] rather
/// than aborting the parse.
pub fn parse_whitelist(input: &str, policy: ChecksumPolicy) -> ParsedWhitelist {
    let mut parsed = ParsedWhitelist::default();
    let mut seen = HashSet::new();

    let entries = input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty());

    for entry in entries {
        match decode_address_with(entry, policy) {
            Ok(address) => {
                if seen.insert(address) {
                    parsed.addresses.push(address);
                }
            }
            Err(e) => {
                tracing::warn!(
                    target: "merkle_whitelist",
                    error = %e,
                    "Skipping whitelist entry"
                );
                parsed.rejected.push(e);
            }
        }
    }

    tracing::debug!(
        target: "merkle_whitelist",
        accepted = parsed.addresses.len(),
        rejected = parsed.rejected.len(),
        "Parsed whitelist"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const H1: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
    const H2: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";

    #[test]
    fn test_blank_proof_is_empty() {
        assert_eq!(parse_proof("").unwrap(), Vec::<B256>::new());
        assert_eq!(parse_proof("  \n\t ").unwrap(), Vec::<B256>::new());
        assert_eq!(ProofInput::classify(" ").unwrap(), ProofInput::Empty);
    }

    #[test]
    fn test_json_and_csv_proofs_agree() {
        let expected = vec![B256::repeat_byte(0x11), B256::repeat_byte(0x22)];
        assert_eq!(parse_proof(&format!("[\"{H1}\", \"{H2}\"]")).unwrap(), expected);
        assert_eq!(parse_proof(&format!("{H1}, {H2}")).unwrap(), expected);
        assert_eq!(parse_proof(&format!("{H1},{H2},")).unwrap(), expected);
        assert_eq!(parse_proof("[]").unwrap(), Vec::<B256>::new());
    }

    #[test]
    fn test_malformed_proofs_rejected() {
        assert!(matches!(
            parse_proof("[\"0x11\""),
            Err(WhitelistError::MalformedProof { .. })
        ));
        assert!(matches!(
            parse_proof(&format!("{{\"proof\": [\"{H1}\"]}}")),
            Err(WhitelistError::MalformedProof { .. })
        ));
        assert!(matches!(parse_proof("[1, 2]"), Err(WhitelistError::MalformedProof { .. })));
        assert!(matches!(
            parse_proof(&format!("{H1}, 0x1234")),
            Err(WhitelistError::InvalidHashEncoding { .. })
        ));
        assert!(matches!(
            parse_proof(&H1[2..]),
            Err(WhitelistError::InvalidHashEncoding { .. })
        ));
    }

    #[test]
    fn test_format_proof() {
        let proof = vec![B256::repeat_byte(0x11), B256::repeat_byte(0x22)];
        assert_eq!(format_proof(&proof, ProofFormat::Json), format!("[\"{H1}\",\"{H2}\"]"));
        assert_eq!(format_proof(&proof, ProofFormat::Csv), format!("{H1},{H2}"));
        assert_eq!(format_proof(&[], ProofFormat::Json), "[]");
        assert_eq!(format_proof(&[], ProofFormat::Csv), "");

        for format in [ProofFormat::Json, ProofFormat::Csv] {
            assert_eq!(parse_proof(&format_proof(&proof, format)).unwrap(), proof);
        }
    }

    #[test]
    fn test_parse_whitelist_dedupes_and_reports() {
        let input = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
                     0x70997970C51812dc3A010C7d01b50e0d17dc79C8, not-an-address\n\
                     \n\
                     0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266,0x1234";
        let parsed = parse_whitelist(input, ChecksumPolicy::Strict);

        assert_eq!(
            parsed.addresses,
            vec![
                address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
                address!("70997970c51812dc3a010c7d01b50e0d17dc79c8"),
            ]
        );
        assert_eq!(parsed.rejected.len(), 2);
        assert!(
            parsed
                .rejected
                .iter()
                .all(|e| matches!(e, WhitelistError::InvalidAddressEncoding { .. }))
        );
    }

    #[test]
    fn test_parse_whitelist_checksum_policy() {
        let bad = "0xf39fd6e51aad88F6F4ce6aB8827279cffFb92266";
        assert!(parse_whitelist(bad, ChecksumPolicy::Strict).addresses.is_empty());
        assert_eq!(parse_whitelist(bad, ChecksumPolicy::Lenient).addresses.len(), 1);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(ProofFormat::from("CSV"), ProofFormat::Csv);
        assert_eq!(ProofFormat::from("json"), ProofFormat::Json);
        assert_eq!(ProofFormat::from("whatever"), ProofFormat::Json);
    }
}
