//! Configuration

use merkle_whitelist::{ChecksumPolicy, ProofFormat};
use std::{env, path::PathBuf};

/// Whitelist file used when neither `--file` nor `WHITELIST_FILE` is set
const DEFAULT_WHITELIST_FILE: &str = "whitelist.txt";

/// CLI configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    /// Whitelist file, addresses separated by newlines or commas
    pub(crate) whitelist_file: PathBuf,
    /// Treatment of mixed-case addresses
    pub(crate) checksum: ChecksumPolicy,
    /// Proof output encoding
    pub(crate) format: ProofFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            whitelist_file: PathBuf::from(DEFAULT_WHITELIST_FILE),
            checksum: ChecksumPolicy::Strict,
            format: ProofFormat::Json,
        }
    }
}

impl Config {
    /// Load from environment variables
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            whitelist_file: lookup("WHITELIST_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.whitelist_file),
            checksum: lookup("WHITELIST_CHECKSUM")
                .map(|s| ChecksumPolicy::from(s.as_str()))
                .unwrap_or(defaults.checksum),
            format: lookup("PROOF_FORMAT")
                .map(|s| ProofFormat::from(s.as_str()))
                .unwrap_or(defaults.format),
        }
    }
}
