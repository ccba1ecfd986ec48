use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use eckey_ecdsa::{Curve, Ecdsa, KeyProvider, SoftwareProvider};

/**
    Generate a new key pair.

    Prints Base64 key blobs by default, or PKCS#8 / SPKI PEM with `--pem`.
    With `--output`, writes `private.key` and `public.key` (or `.pem`)
    into that directory instead.
*/
#[derive(Args)]
pub struct GenerateCommand {
    /// Curve to generate the key on.
    #[arg(short, long, default_value = "p521")]
    curve: Curve,

    /// Output directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write PEM instead of key blobs.
    #[arg(long)]
    pem: bool,
}

impl GenerateCommand {
    pub fn run(self) -> Result<()> {
        let (private_key, public_key) = if self.pem {
            let material = SoftwareProvider
                .generate(self.curve)
                .context("failed to generate key")?;
            let public = material.public_key().to_pem().to_string();
            (material.to_pem(), public)
        } else {
            let key = Ecdsa::new()
                .generate_key(self.curve)
                .context("failed to generate key")?;
            (key.private_key, key.public_key)
        };

        let Some(out_dir) = &self.output else {
            if self.pem {
                print!("{}{public_key}", private_key.as_str());
            } else {
                println!("{}\n{public_key}", private_key.as_str());
            }
            return Ok(());
        };

        std::fs::create_dir_all(out_dir).context("failed to create output directory")?;
        let ext = if self.pem { "pem" } else { "key" };
        let private_path = out_dir.join(format!("private.{ext}"));
        let public_path = out_dir.join(format!("public.{ext}"));
        if private_path.exists() || public_path.exists() {
            anyhow::bail!("refusing to overwrite keys in {}", out_dir.display());
        }

        std::fs::write(&private_path, private_key.as_bytes())
            .context("failed to write private key")?;
        eprintln!("Wrote private key to {}", private_path.display());
        std::fs::write(&public_path, public_key.as_bytes())
            .context("failed to write public key")?;
        eprintln!("Wrote public key to {}", public_path.display());

        println!("Curve:  {}", self.curve);
        Ok(())
    }
}
