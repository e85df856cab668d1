//! Chroma CLI - post-quantum key encapsulation and signing from the shell.

use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chroma::kem::{ColorKem1024, ColorKem512, ColorKem768, Kem};
use chroma::sign::cose::{CoseSign1, ALG_LEVEL_44, ALG_LEVEL_65, ALG_LEVEL_87};
use chroma::sign::kat::KatRecord;
use chroma::sign::{ColorSign44, ColorSign65, ColorSign87, Signer};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use rand::thread_rng;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Post-quantum cryptography CLI tool
#[derive(Parser)]
#[command(name = "chroma")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Keygen {
        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "kem-768")]
        algo: Algorithm,

        /// Output file prefix (creates `<prefix>.pub` and `<prefix>.sec`)
        #[arg(short, long)]
        output: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Encapsulate a shared secret using a public key
    Encaps {
        /// Algorithm the key belongs to
        #[arg(short, long, value_enum, default_value = "kem-768")]
        algo: Algorithm,

        /// Path to the public key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// Output file for ciphertext (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Decapsulate a shared secret using a secret key
    Decaps {
        /// Algorithm the key belongs to
        #[arg(short, long, value_enum, default_value = "kem-768")]
        algo: Algorithm,

        /// Path to the secret key file
        #[arg(long = "key")]
        key: PathBuf,

        /// Path to the ciphertext file (reads from stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format for shared secret
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Sign a file
    Sign {
        /// Algorithm the key belongs to
        #[arg(short, long, value_enum, default_value = "sign-65")]
        algo: Algorithm,

        /// Path to the secret key file
        #[arg(long = "key")]
        key: PathBuf,

        /// Input file to sign
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the signature
        #[arg(short, long)]
        output: PathBuf,

        /// Wrap the signature and message in a COSE_Sign1 envelope
        #[arg(long)]
        cose: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Verify a signature
    Verify {
        /// Algorithm the key belongs to
        #[arg(short, long, value_enum, default_value = "sign-65")]
        algo: Algorithm,

        /// Path to the public key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// Input file that was signed (ignored for COSE envelopes, which
        /// carry their payload)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Signature (or COSE envelope) file
        #[arg(short, long)]
        signature: PathBuf,

        /// Treat the signature file as a COSE_Sign1 envelope
        #[arg(long)]
        cose: bool,
    },

    /// Generate a known-answer record for a signature level
    Kat {
        /// Signature algorithm
        #[arg(short, long, value_enum, default_value = "sign-44")]
        algo: Algorithm,

        /// Keygen seed as 64 hex characters (all zeros if omitted)
        #[arg(long)]
        seed: Option<String>,

        /// Message to sign (UTF-8)
        #[arg(short, long, default_value = "Hello World")]
        message: String,

        /// Output file for the binary record
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display information about supported algorithms
    Info,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// KEM level 512 (NIST category 1)
    Kem512,
    /// KEM level 768 (NIST category 3)
    Kem768,
    /// KEM level 1024 (NIST category 5)
    Kem1024,
    /// Signature level 44 (NIST category 2)
    Sign44,
    /// Signature level 65 (NIST category 3)
    Sign65,
    /// Signature level 87 (NIST category 5)
    Sign87,
}

impl Algorithm {
    fn is_kem(self) -> bool {
        matches!(self, Self::Kem512 | Self::Kem768 | Self::Kem1024)
    }

    fn cose_alg(self) -> Result<i64> {
        match self {
            Self::Sign44 => Ok(ALG_LEVEL_44),
            Self::Sign65 => Ok(ALG_LEVEL_65),
            Self::Sign87 => Ok(ALG_LEVEL_87),
            _ => bail!("not a signature algorithm"),
        }
    }

    fn kat_level(self) -> Result<u32> {
        match self {
            Self::Sign44 => Ok(44),
            Self::Sign65 => Ok(65),
            Self::Sign87 => Ok(87),
            _ => bail!("known-answer records cover signature levels only"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Lowercase hex
    Hex,
    /// Base64 (standard alphabet)
    Base64,
    /// Raw binary
    Raw,
}

fn encode_output(bytes: &[u8], format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Hex => hex_encode(bytes).into_bytes(),
        OutputFormat::Base64 => BASE64.encode(bytes).into_bytes(),
        OutputFormat::Raw => bytes.to_vec(),
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(hex: &str) -> Result<Vec<u8>> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        bail!("hex input has odd length");
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| anyhow!("invalid hex at offset {i}: {e}"))
        })
        .collect()
}

/// Read a key/ciphertext file, auto-detecting hex, base64, or raw bytes.
fn read_material(path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    if let Ok(text) = std::str::from_utf8(&raw) {
        let text = text.trim();
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_hexdigit()) && text.len() % 2 == 0 {
            return hex_decode(text);
        }
        if let Ok(decoded) = BASE64.decode(text) {
            return Ok(decoded);
        }
    }
    Ok(raw)
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(p) => fs::write(p, data).with_context(|| format!("writing {}", p.display())),
        None => {
            io::stdout().write_all(data)?;
            io::stdout().write_all(b"\n")?;
            Ok(())
        }
    }
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

fn cmd_keygen(algo: Algorithm, output: &str, format: OutputFormat, verbose: bool) -> Result<()> {
    let mut rng = thread_rng();

    let (sec, pub_) = match algo {
        Algorithm::Kem512 => {
            let (dk, ek) = ColorKem512::keygen(&mut rng)?;
            (dk.as_bytes().to_vec(), ek.as_bytes().to_vec())
        }
        Algorithm::Kem768 => {
            let (dk, ek) = ColorKem768::keygen(&mut rng)?;
            (dk.as_bytes().to_vec(), ek.as_bytes().to_vec())
        }
        Algorithm::Kem1024 => {
            let (dk, ek) = ColorKem1024::keygen(&mut rng)?;
            (dk.as_bytes().to_vec(), ek.as_bytes().to_vec())
        }
        Algorithm::Sign44 => {
            let (sk, pk) = ColorSign44::keygen(&mut rng)?;
            (sk.as_bytes().to_vec(), pk.as_bytes().to_vec())
        }
        Algorithm::Sign65 => {
            let (sk, pk) = ColorSign65::keygen(&mut rng)?;
            (sk.as_bytes().to_vec(), pk.as_bytes().to_vec())
        }
        Algorithm::Sign87 => {
            let (sk, pk) = ColorSign87::keygen(&mut rng)?;
            (sk.as_bytes().to_vec(), pk.as_bytes().to_vec())
        }
    };

    let pub_path = format!("{output}.pub");
    let sec_path = format!("{output}.sec");
    fs::write(&pub_path, encode_output(&pub_, format))
        .with_context(|| format!("writing {pub_path}"))?;
    fs::write(&sec_path, encode_output(&sec, format))
        .with_context(|| format!("writing {sec_path}"))?;

    if verbose {
        eprintln!(
            "wrote {} ({} bytes) and {} ({} bytes)",
            pub_path,
            pub_.len(),
            sec_path,
            sec.len()
        );
    }
    Ok(())
}

fn cmd_encaps(
    algo: Algorithm,
    pubkey: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    if !algo.is_kem() {
        bail!("encapsulation needs a KEM algorithm");
    }
    let ek_bytes = read_material(pubkey)?;
    let mut rng = thread_rng();

    let (ct, ss) = match algo {
        Algorithm::Kem512 => {
            let ek = chroma::kem::kem512::EncapsulationKey::from_bytes(&ek_bytes)?;
            let (ct, ss) = ColorKem512::encaps(&ek, &mut rng)?;
            (ct.as_bytes().to_vec(), ss.as_ref().to_vec())
        }
        Algorithm::Kem768 => {
            let ek = chroma::kem::kem768::EncapsulationKey::from_bytes(&ek_bytes)?;
            let (ct, ss) = ColorKem768::encaps(&ek, &mut rng)?;
            (ct.as_bytes().to_vec(), ss.as_ref().to_vec())
        }
        Algorithm::Kem1024 => {
            let ek = chroma::kem::kem1024::EncapsulationKey::from_bytes(&ek_bytes)?;
            let (ct, ss) = ColorKem1024::encaps(&ek, &mut rng)?;
            (ct.as_bytes().to_vec(), ss.as_ref().to_vec())
        }
        _ => unreachable!(),
    };

    write_output(output, &encode_output(&ct, format))?;
    eprintln!("shared secret: {}", hex_encode(&ss));
    Ok(())
}

fn cmd_decaps(
    algo: Algorithm,
    key: &Path,
    input: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    if !algo.is_kem() {
        bail!("decapsulation needs a KEM algorithm");
    }
    let dk_bytes = read_material(key)?;
    let ct_bytes = match input {
        Some(p) => read_material(p)?,
        None => read_stdin()?,
    };

    let ss = match algo {
        Algorithm::Kem512 => {
            let dk = chroma::kem::kem512::DecapsulationKey::from_bytes(&dk_bytes)?;
            let ct = chroma::kem::kem512::Ciphertext::from_bytes(&ct_bytes)?;
            ColorKem512::decaps(&dk, &ct)?.as_ref().to_vec()
        }
        Algorithm::Kem768 => {
            let dk = chroma::kem::kem768::DecapsulationKey::from_bytes(&dk_bytes)?;
            let ct = chroma::kem::kem768::Ciphertext::from_bytes(&ct_bytes)?;
            ColorKem768::decaps(&dk, &ct)?.as_ref().to_vec()
        }
        Algorithm::Kem1024 => {
            let dk = chroma::kem::kem1024::DecapsulationKey::from_bytes(&dk_bytes)?;
            let ct = chroma::kem::kem1024::Ciphertext::from_bytes(&ct_bytes)?;
            ColorKem1024::decaps(&dk, &ct)?.as_ref().to_vec()
        }
        _ => unreachable!(),
    };

    write_output(None, &encode_output(&ss, format))
}

fn cmd_sign(
    algo: Algorithm,
    key: &Path,
    input: &Path,
    output: &Path,
    cose: bool,
    format: OutputFormat,
) -> Result<()> {
    let sk_bytes = read_material(key)?;
    let message = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let sig = match algo {
        Algorithm::Sign44 => {
            let sk = chroma::sign::sign44::SigningKey::from_bytes(&sk_bytes)?;
            ColorSign44::sign(&sk, &message)?.as_bytes().to_vec()
        }
        Algorithm::Sign65 => {
            let sk = chroma::sign::sign65::SigningKey::from_bytes(&sk_bytes)?;
            ColorSign65::sign(&sk, &message)?.as_bytes().to_vec()
        }
        Algorithm::Sign87 => {
            let sk = chroma::sign::sign87::SigningKey::from_bytes(&sk_bytes)?;
            ColorSign87::sign(&sk, &message)?.as_bytes().to_vec()
        }
        _ => bail!("signing needs a signature algorithm"),
    };

    let payload = if cose {
        CoseSign1::new(&message, &sig, algo.cose_alg()?).to_bytes()
    } else {
        sig
    };

    write_output(Some(output), &encode_output(&payload, format))
}

fn cmd_verify(
    algo: Algorithm,
    pubkey: &Path,
    input: Option<&Path>,
    signature: &Path,
    cose: bool,
) -> Result<()> {
    let pk_bytes = read_material(pubkey)?;
    let sig_bytes = read_material(signature)?;

    let (message, sig_bytes) = if cose {
        let envelope = CoseSign1::from_bytes(&sig_bytes).context("parsing COSE envelope")?;
        let expected = algo.cose_alg()?;
        let found = envelope.algorithm()?;
        if found != expected {
            bail!("envelope algorithm {found} does not match requested {expected}");
        }
        (envelope.payload.clone(), envelope.signature)
    } else {
        let input = input.ok_or_else(|| anyhow!("--input is required without --cose"))?;
        let message = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        (message, sig_bytes)
    };

    let valid = match algo {
        Algorithm::Sign44 => {
            let pk = chroma::sign::sign44::VerificationKey::from_bytes(&pk_bytes)?;
            let sig = chroma::sign::sign44::Signature::from_bytes(&sig_bytes)?;
            ColorSign44::verify(&pk, &message, &sig)
        }
        Algorithm::Sign65 => {
            let pk = chroma::sign::sign65::VerificationKey::from_bytes(&pk_bytes)?;
            let sig = chroma::sign::sign65::Signature::from_bytes(&sig_bytes)?;
            ColorSign65::verify(&pk, &message, &sig)
        }
        Algorithm::Sign87 => {
            let pk = chroma::sign::sign87::VerificationKey::from_bytes(&pk_bytes)?;
            let sig = chroma::sign::sign87::Signature::from_bytes(&sig_bytes)?;
            ColorSign87::verify(&pk, &message, &sig)
        }
        _ => bail!("verification needs a signature algorithm"),
    };

    if valid {
        println!("OK");
        Ok(())
    } else {
        bail!("signature verification failed");
    }
}

fn cmd_kat(algo: Algorithm, seed: Option<&str>, message: &str, output: &Path) -> Result<()> {
    let level = algo.kat_level()?;
    let seed: [u8; 32] = match seed {
        Some(hex) => hex_decode(hex)?
            .try_into()
            .map_err(|_| anyhow!("seed must be exactly 32 bytes"))?,
        None => [0u8; 32],
    };

    let record = KatRecord::generate(level, seed, message.as_bytes())?;
    fs::write(output, record.to_bytes())
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "level {level}: pk {} bytes, sk {} bytes, sig {} bytes",
        record.public_key.len(),
        record.secret_key.len(),
        record.signature.len()
    );
    Ok(())
}

fn cmd_info() {
    println!("Supported algorithms:");
    println!();
    println!("  KEM (shared secret 32 bytes):");
    println!("    kem-512    pk 800    sk 1632   ct 768");
    println!("    kem-768    pk 1184   sk 2400   ct 1088");
    println!("    kem-1024   pk 1568   sk 3168   ct 1568");
    println!();
    println!("  Signatures (deterministic):");
    println!("    sign-44    pk 1312   sk 2560   sig 2420");
    println!("    sign-65    pk 1952   sk 4032   sig 3309");
    println!("    sign-87    pk 2592   sk 4896   sig 4627");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen {
            algo,
            output,
            format,
        } => cmd_keygen(algo, &output, format, cli.verbose),
        Commands::Encaps {
            algo,
            pubkey,
            output,
            format,
        } => cmd_encaps(algo, &pubkey, output.as_deref(), format),
        Commands::Decaps {
            algo,
            key,
            input,
            format,
        } => cmd_decaps(algo, &key, input.as_deref(), format),
        Commands::Sign {
            algo,
            key,
            input,
            output,
            cose,
            format,
        } => cmd_sign(algo, &key, &input, &output, cose, format),
        Commands::Verify {
            algo,
            pubkey,
            input,
            signature,
            cose,
        } => cmd_verify(algo, &pubkey, input.as_deref(), &signature, cose),
        Commands::Kat {
            algo,
            seed,
            message,
            output,
        } => cmd_kat(algo, seed.as_deref(), &message, &output),
        Commands::Info => {
            cmd_info();
            Ok(())
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "chroma", &mut io::stdout());
            Ok(())
        }
    }
}
