//! Vendor-side license token generator.
//!
//! Issues signed DoceGest license tokens in the wire format the desktop
//! engine verifies: `base64(gzip(payload_json)).base64(signature)`, with the
//! Ed25519 signature computed over the base64 text of the payload segment.
//!
//! This tool never ships to end users; the application embeds only the
//! public half of the key pair.

use anyhow::{bail, Context};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use docegest_license::EntitlementRecord;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey};
use ed25519_dalek::{Signer, SigningKey};
use flate2::write::GzEncoder;
use flate2::Compression;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "docegest-licgen", about = "Issue signed DoceGest license tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new Ed25519 signing key pair as PEM files.
    Keygen {
        /// Directory to write private.pem and public.pem into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Issue a signed license token for a subject.
    Generate {
        /// Path to the PKCS#8 private key PEM.
        #[arg(long)]
        key: PathBuf,

        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: String,

        /// License duration in days.
        #[arg(long, default_value_t = 365)]
        days: i64,
    },

    /// Print the SPKI public key PEM for embedding in the application.
    PublicKey {
        /// Path to the PKCS#8 private key PEM.
        #[arg(long)]
        key: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Keygen { out_dir } => keygen(&out_dir),
        Command::Generate {
            key,
            user_id,
            email,
            days,
        } => {
            let signing_key = load_signing_key(&key)?;
            let token = generate(&signing_key, &user_id, &email, days)?;
            println!("{token}");
            Ok(())
        }
        Command::PublicKey { key } => {
            let signing_key = load_signing_key(&key)?;
            let pem = signing_key
                .verifying_key()
                .to_public_key_pem(LineEnding::LF)
                .context("encode public key PEM")?;
            print!("{pem}");
            Ok(())
        }
    }
}

fn keygen(out_dir: &Path) -> anyhow::Result<()> {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    let signing_key = SigningKey::from_bytes(&seed);

    let private_pem = signing_key
        .to_pkcs8_pem(LineEnding::LF)
        .context("encode private key PEM")?;
    let public_pem = signing_key
        .verifying_key()
        .to_public_key_pem(LineEnding::LF)
        .context("encode public key PEM")?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir.display()))?;
    let private_path = out_dir.join("private.pem");
    let public_path = out_dir.join("public.pem");
    fs::write(&private_path, private_pem.as_bytes())
        .with_context(|| format!("write {}", private_path.display()))?;
    fs::write(&public_path, &public_pem)
        .with_context(|| format!("write {}", public_path.display()))?;

    println!("wrote {}", private_path.display());
    println!("wrote {}", public_path.display());
    Ok(())
}

fn load_signing_key(path: &Path) -> anyhow::Result<SigningKey> {
    let pem = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    SigningKey::from_pkcs8_pem(&pem)
        .with_context(|| format!("parse private key PEM {}", path.display()))
}

fn generate(signing_key: &SigningKey, user_id: &str, email: &str, days: i64) -> anyhow::Result<String> {
    if user_id.is_empty() {
        bail!("user id must not be empty");
    }
    if email.is_empty() || !email.contains('@') {
        bail!("email must contain '@'");
    }
    if days <= 0 {
        bail!("days must be positive");
    }

    let now = Utc::now();
    let record = EntitlementRecord {
        subject_id: user_id.to_string(),
        email: email.to_string(),
        issued_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        expires_at: (now + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    let json = serde_json::to_vec(&record)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let packed = encoder.finish()?;

    let payload_b64 = BASE64.encode(packed);
    let signature = signing_key.sign(payload_b64.as_bytes());
    let sig_b64 = BASE64.encode(signature.to_bytes());

    Ok(format!("{payload_b64}.{sig_b64}"))
}
