use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use data_encoding::BASE64;

use eckey_ecdsa::{Ecdsa, HashAlgorithm};

/**
    Sign a file and print the Base64 `R ‖ S` signature.
*/
#[derive(Args)]
pub struct SignCommand {
    /// Private key file (PEM or Base64 key blob).
    #[arg(short, long)]
    key: PathBuf,

    /// Digest applied before signing.
    #[arg(long, default_value = "sha256")]
    hash: HashAlgorithm,

    /// File to sign, `-` for stdin.
    input: PathBuf,

    /// Write the signature to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SignCommand {
    pub fn run(self) -> Result<()> {
        let key = super::read_key_text(&self.key)?;
        let data = super::read_input(&self.input)?;

        let signature = Ecdsa::new()
            .sign(&data, &key, self.hash)
            .context("failed to sign")?;
        let encoded = BASE64.encode(&signature);

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{encoded}\n"))
                    .context("failed to write signature")?;
                eprintln!("Wrote {} signature to {}", self.hash, path.display());
            }
            None => println!("{encoded}"),
        }
        Ok(())
    }
}
