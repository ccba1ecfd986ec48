use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use eckey_ecdsa::load_key;

/**
    Convert a key between PEM and Base64 key blob form.

    Private keys become PKCS#8 `PRIVATE KEY` PEM, public keys SPKI
    `PUBLIC KEY` PEM. The result is printed to stdout.
*/
#[derive(Args)]
pub struct ConvertCommand {
    /// Key file (PEM or Base64 key blob).
    path: PathBuf,

    #[command(flatten)]
    target: Target,

    /// Emit only the public half of a private key.
    #[arg(long)]
    public: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Write PEM.
    #[arg(long)]
    pem: bool,

    /// Write a Base64 key blob.
    #[arg(long)]
    blob: bool,
}

impl ConvertCommand {
    pub fn run(self) -> Result<()> {
        let text = super::read_key_text(&self.path)?;
        let mut material = load_key(&text).context("failed to load key")?;
        if self.public {
            material = material.public_key();
        }

        if self.target.pem {
            print!("{}", material.to_pem().as_str());
        }
        if self.target.blob {
            println!("{}", material.to_blob_base64().as_str());
        }
        tracing::debug!(curve = %material.curve(), kind = %material.kind(), "converted key");
        Ok(())
    }
}
