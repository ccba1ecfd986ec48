mod convert;
mod generate;
mod inspect;
mod sign;
mod verify;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

pub use self::convert::ConvertCommand;
pub use self::generate::GenerateCommand;
pub use self::inspect::InspectCommand;
pub use self::sign::SignCommand;
pub use self::verify::VerifyCommand;

/**
    Read a key file as text.
*/
fn read_key_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key file {}", path.display()))
}

/**
    Read the data to sign or verify. `-` reads stdin.
*/
fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("failed to read stdin")?;
        return Ok(data);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
