//! Whitelist admin CLI
//!
//! Builds the Merkle root for a whitelist file, hands out proofs to listed
//! buyers and checks pasted proofs before a discounted purchase is submitted.
//!
//! Run with:
//! ```bash
//! whitelist --file whitelist.txt root
//! whitelist --file whitelist.txt proof 0x70997970C51812dc3A010C7d01b50e0d17dc79C8
//! ```

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use merkle_whitelist::{
    Address, KeccakVerifier, MerkleTree, ProofVerifier, decode_address_with, decode_hash,
    format_hash, format_proof, leaf, parse_proof, parse_whitelist,
};
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;

/// Merkle whitelist tool for gated NFT purchases
#[derive(Parser, Debug)]
#[command(name = "whitelist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Whitelist file, addresses separated by newlines or commas
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Mixed-case address handling (strict, lenient)
    #[arg(long, global = true)]
    checksum: Option<String>,

    /// Proof encoding (json, csv)
    #[arg(long, global = true)]
    format: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Apply command-line flags on top of `config`
    fn merge(&self, mut config: Config) -> Config {
        if let Some(file) = &self.file {
            config.whitelist_file = file.clone();
        }
        if let Some(checksum) = self.checksum.as_deref() {
            config.checksum = checksum.into();
        }
        if let Some(format) = self.format.as_deref() {
            config.format = format.into();
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Merkle root of the whitelist
    Root {
        /// Also print every layer, leaves first
        #[arg(long)]
        layers: bool,
    },

    /// Print the leaf hash of an address
    Leaf {
        /// Address to hash
        address: String,
    },

    /// Print the proof for a whitelisted address
    Proof {
        /// Address to prove
        address: String,
    },

    /// Check a proof against a published root
    Verify {
        /// Address claiming membership
        address: String,

        /// Published Merkle root
        #[arg(long)]
        root: String,

        /// Proof as a JSON array or comma-separated hashes
        #[arg(long, default_value = "")]
        proof: String,
    },
}

/// Result of a command: lines for stdout plus the exit status
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    lines: Vec<String>,
    success: bool,
}

impl Outcome {
    fn ok(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: true,
        }
    }

    fn rejected(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: false,
        }
    }
}

fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = cli.merge(Config::from_env());

    let outcome = execute(&cli.command, &config)?;
    for line in &outcome.lines {
        println!("{line}");
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr, stdout carries command output only
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn execute(command: &Commands, config: &Config) -> Result<Outcome> {
    match command {
        Commands::Root { layers } => {
            let tree = load_tree(config)?;
            if tree.is_empty() {
                warn!("No whitelist configured, reporting the zero root");
            }

            let mut lines = vec![format_hash(&tree.root())];
            if *layers {
                let encoded = tree
                    .layers()
                    .iter()
                    .map(|layer| format_proof(layer, config.format));
                lines.extend(encoded);
            }
            Ok(Outcome::ok(lines))
        }

        Commands::Leaf { address } => {
            let address = decode(address, config)?;
            Ok(Outcome::ok(vec![format_hash(&leaf(&address))]))
        }

        Commands::Proof { address } => {
            let address = decode(address, config)?;
            let tree = load_tree(config)?;
            let record = tree.proof(&address);

            if !record.is_member {
                warn!(address = %address.to_checksum(None), "Address is not whitelisted");
                return Ok(Outcome::rejected(vec![]));
            }
            if record.proof.is_empty() {
                info!("Single-member whitelist, the proof is empty");
            }
            Ok(Outcome::ok(vec![format_proof(&record.proof, config.format)]))
        }

        Commands::Verify { address, root, proof } => {
            let address = decode(address, config)?;
            let root = decode_hash(root).context("invalid root")?;
            let proof = parse_proof(proof).context("invalid proof")?;

            let valid = KeccakVerifier.verify_proof(&proof, &root, &leaf(&address));
            info!(address = %address.to_checksum(None), valid, "Checked proof");

            let lines = vec![valid.to_string()];
            Ok(if valid {
                Outcome::ok(lines)
            } else {
                Outcome::rejected(lines)
            })
        }
    }
}

fn decode(address: &str, config: &Config) -> Result<Address> {
    decode_address_with(address, config.checksum).context("invalid address")
}

fn load_tree(config: &Config) -> Result<MerkleTree> {
    let path = &config.whitelist_file;
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read whitelist file {}", path.display()))?;

    let whitelist = parse_whitelist(&text, config.checksum);
    info!(
        file = %path.display(),
        addresses = whitelist.addresses.len(),
        rejected = whitelist.rejected.len(),
        "Loaded whitelist"
    );

    Ok(MerkleTree::build(&whitelist.addresses))
}
