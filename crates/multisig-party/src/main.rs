//! Multisig Party CLI
//!
//! Command-line interface for HMAC multisignature operations:
//! - Key and seed generation
//! - Per-key signing and combination
//! - Verification against stored or seed-derived keys

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use multisig_hmac_core::{
    Algorithm, CombinedSignature, KeyMaterial, MultisigHmac, Seed, Signature, SignerIndex,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

/// Multisig Party - HMAC threshold signatures
#[derive(Parser)]
#[command(name = "multisig-party")]
#[command(about = "HMAC threshold multisignature tool")]
#[command(version)]
struct Cli {
    /// HMAC algorithm (HmacSHA256, HmacSHA384, HmacSHA512)
    #[arg(short, long, env = "MULTISIG_ALGORITHM", default_value = "HmacSHA256")]
    algorithm: Algorithm,

    /// Data directory for keys and signatures
    #[arg(short, long, env = "DEST", default_value = "./data")]
    dest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key for a signer
    Keygen {
        /// Signer index (0-31)
        #[arg(short, long)]
        index: SignerIndex,
    },

    /// Generate a master seed for derived keys
    Seed,

    /// Derive a signer's key from the master seed
    Derive {
        /// Signer index (0-31)
        #[arg(short, long)]
        index: SignerIndex,
    },

    /// Sign a message with one signer's key
    Sign {
        /// Signer index (0-31)
        #[arg(short, long)]
        index: SignerIndex,

        #[command(flatten)]
        message: MessageArgs,
    },

    /// Combine per-signer signatures
    Combine {
        /// Signer indices whose signatures to combine (comma-separated)
        #[arg(short, long)]
        indices: String,
    },

    /// Verify the combined signature against stored keys
    Verify {
        /// Key indices, in order (comma-separated)
        #[arg(short, long)]
        keys: String,

        #[command(flatten)]
        message: MessageArgs,

        /// Minimum number of signers
        #[arg(short, long, default_value_t = multisig_hmac_core::DEFAULT_THRESHOLD)]
        threshold: usize,
    },

    /// Verify the combined signature against keys derived from the seed
    VerifyDerived {
        #[command(flatten)]
        message: MessageArgs,

        /// Minimum number of signers
        #[arg(short, long, default_value_t = multisig_hmac_core::DEFAULT_THRESHOLD)]
        threshold: usize,
    },

    /// Show algorithm parameters
    Info,

    /// Run the stored-key and derived-key flows end to end in memory
    Demo,
}

#[derive(clap::Args)]
struct MessageArgs {
    /// Message to sign or verify
    #[arg(short, long)]
    message: String,

    /// Treat the message as hex-encoded bytes
    #[arg(long)]
    hex: bool,
}

impl MessageArgs {
    fn bytes(&self) -> Result<Vec<u8>> {
        if self.hex {
            hex::decode(&self.message).context("Message is not valid hex")
        } else {
            Ok(self.message.as_bytes().to_vec())
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let scheme = MultisigHmac::new(cli.algorithm);

    // Ensure data directory exists
    std::fs::create_dir_all(&cli.dest)?;

    match &cli.command {
        Commands::Keygen { index } => {
            let key = scheme.generate_key(*index)?;
            let path = save(&cli.dest, &key_file(*index), &key)?;
            info!(index, path = ?path, "Random key saved");
        }
        Commands::Seed => {
            let seed = scheme.generate_seed();
            let path = save(&cli.dest, "seed.json", &seed)?;
            info!(path = ?path, "Master seed saved");
        }
        Commands::Derive { index } => {
            let seed: Seed = load(&cli.dest, "seed.json")?;
            let key = scheme.derive_key(&seed, *index)?;
            let path = save(&cli.dest, &key_file(*index), &key)?;
            info!(index, path = ?path, "Derived key saved");
        }
        Commands::Sign { index, message } => {
            let key: KeyMaterial = load(&cli.dest, &key_file(*index))?;
            let signature = scheme.sign(&key, &message.bytes()?)?;
            let path = save(&cli.dest, &signature_file(*index), &signature)?;
            info!(index, path = ?path, "Signature saved");
            println!("Signature: {}", hex::encode(&signature.bytes));
        }
        Commands::Combine { indices } => {
            let signatures = parse_indices(indices)?
                .into_iter()
                .map(|i| load::<Signature>(&cli.dest, &signature_file(i)))
                .collect::<Result<Vec<_>>>()?;
            let combined = scheme.combine(&signatures)?;
            let path = save(&cli.dest, "combined.json", &combined)?;
            info!(signers = combined.signer_count(), path = ?path, "Combined signature saved");
            println!("Combined: {}", hex::encode(&combined.bytes));
            println!("Bitfield: {:#034b}", combined.bitfield);
        }
        Commands::Verify {
            keys,
            message,
            threshold,
        } => {
            let keys = parse_indices(keys)?
                .into_iter()
                .map(|i| load::<KeyMaterial>(&cli.dest, &key_file(i)))
                .collect::<Result<Vec<_>>>()?;
            let combined: CombinedSignature = load(&cli.dest, "combined.json")?;
            let valid = scheme.verify(&keys, &combined, &message.bytes()?, *threshold)?;
            info!(valid, threshold, "Verification finished");
            println!("{}", valid);
        }
        Commands::VerifyDerived { message, threshold } => {
            let seed: Seed = load(&cli.dest, "seed.json")?;
            let combined: CombinedSignature = load(&cli.dest, "combined.json")?;
            let valid = scheme.verify_derived(&seed, &combined, &message.bytes()?, *threshold)?;
            info!(valid, threshold, "Verification finished");
            println!("{}", valid);
        }
        Commands::Info => show_info(&scheme),
        Commands::Demo => run_demo(&scheme)?,
    }

    Ok(())
}

fn show_info(scheme: &MultisigHmac) {
    println!("Algorithm Info:");
    println!("  Name: {}", scheme.algorithm());
    println!("  Key Length: {} bytes", scheme.key_length());
    println!("  Signature Length: {} bytes", scheme.signature_length());
    println!("  Max Signers: {}", multisig_hmac_core::MAX_SIGNERS);
}

fn run_demo(scheme: &MultisigHmac) -> Result<()> {
    let data = b"hello world";
    let threshold = multisig_hmac_core::DEFAULT_THRESHOLD;

    // Stored keys
    let keys = (0..3)
        .map(|i| scheme.generate_key(i))
        .collect::<multisig_hmac_core::Result<Vec<_>>>()?;
    let signatures = vec![scheme.sign(&keys[0], data)?, scheme.sign(&keys[2], data)?];
    let combined = scheme.combine(&signatures)?;
    println!("Stored keys: {}", scheme.verify(&keys, &combined, data, threshold)?);

    // Derived keys
    let seed = scheme.generate_seed();
    let signatures = [0, 2]
        .into_iter()
        .map(|i| scheme.derive_key(&seed, i).and_then(|key| scheme.sign(&key, data)))
        .collect::<multisig_hmac_core::Result<Vec<_>>>()?;
    let combined = scheme.combine(&signatures)?;
    println!(
        "Derived keys: {}",
        scheme.verify_derived(&seed, &combined, data, threshold)?
    );

    Ok(())
}

fn key_file(index: SignerIndex) -> String {
    format!("key.{}.json", index)
}

fn signature_file(index: SignerIndex) -> String {
    format!("signature.{}.json", index)
}

fn parse_indices(list: &str) -> Result<Vec<SignerIndex>> {
    list.split(',')
        .map(|s| s.trim().parse().context("Invalid signer index"))
        .collect()
}

fn save<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

fn load<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("0, 2,5").unwrap(), vec![0, 2, 5]);
        assert!(parse_indices("0,x").is_err());
    }

    #[test]
    fn test_message_bytes() {
        let text = MessageArgs {
            message: "hello world".into(),
            hex: false,
        };
        assert_eq!(text.bytes().unwrap(), b"hello world");

        let encoded = MessageArgs {
            message: "dead".into(),
            hex: true,
        };
        assert_eq!(encoded.bytes().unwrap(), vec![0xde, 0xad]);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "multisig-party",
            "--algorithm",
            "sha512",
            "verify",
            "--keys",
            "0,1,2",
            "--message",
            "hello world",
            "--threshold",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.algorithm, Algorithm::HmacSha512);
        assert!(matches!(cli.command, Commands::Verify { threshold: 2, .. }));
    }
}
