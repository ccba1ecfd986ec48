use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use eckey_ecdsa::{BlobMagic, KeyMaterial, PemBlock, load_key, looks_like_pem};

/**
    Show what a key file contains.

    Prints the format, kind, curve and public point. The private scalar is
    never printed.
*/
#[derive(Args)]
pub struct InspectCommand {
    /// Key file (PEM or Base64 key blob).
    path: PathBuf,

    /// Also dump the ASN.1 structure of a PEM key.
    #[arg(long)]
    tree: bool,
}

impl InspectCommand {
    pub fn run(self) -> Result<()> {
        let text = super::read_key_text(&self.path)?;
        let material = load_key(&text).context("failed to load key")?;

        let pem = if looks_like_pem(&text) {
            Some(PemBlock::parse(&text).context("failed to parse PEM")?)
        } else {
            None
        };

        match &pem {
            Some(block) => println!("Format:  PEM ({})", block.label()),
            None => println!(
                "Format:  key blob ({})",
                BlobMagic::new(material.curve(), material.kind())
            ),
        }
        print_material(&material);

        if self.tree {
            match &pem {
                Some(block) => {
                    let root = eckey_der::read_all(block.der()).context("failed to read DER")?;
                    println!();
                    print!("{root}");
                }
                None => eprintln!("Key blobs have no ASN.1 structure, --tree ignored"),
            }
        }

        Ok(())
    }
}

fn print_material(material: &KeyMaterial) {
    println!("Kind:    {}", material.kind());
    println!("Curve:   {} ({} bits)", material.curve(), material.curve().bits());
    println!("Width:   {} bytes", material.width());
    println!("X:       {}", hex::encode(material.x()));
    println!("Y:       {}", hex::encode(material.y()));
}
