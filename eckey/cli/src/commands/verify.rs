use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use data_encoding::BASE64;

use eckey_ecdsa::{Ecdsa, HashAlgorithm};

/**
    Verify a Base64 `R ‖ S` signature over a file.

    Exits with an error if the signature does not verify.
*/
#[derive(Args)]
pub struct VerifyCommand {
    /// Public or private key file (PEM or Base64 key blob).
    #[arg(short, long)]
    key: PathBuf,

    /// Digest applied before verifying.
    #[arg(long, default_value = "sha256")]
    hash: HashAlgorithm,

    /// Signed file, `-` for stdin.
    input: PathBuf,

    /// Base64 signature, or `@path` to read it from a file.
    signature: String,
}

impl VerifyCommand {
    pub fn run(self) -> Result<()> {
        let key = super::read_key_text(&self.key)?;
        let data = super::read_input(&self.input)?;

        let encoded = match self.signature.strip_prefix('@') {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read signature file {path}"))?,
            None => self.signature.clone(),
        };
        let signature = BASE64
            .decode(encoded.trim().as_bytes())
            .context("signature is not valid base64")?;

        let valid = Ecdsa::new()
            .verify(&data, &key, &signature, self.hash)
            .context("failed to verify")?;
        if !valid {
            anyhow::bail!("{} signature does not verify", self.hash);
        }
        println!("Signature OK ({})", self.hash);
        Ok(())
    }
}
