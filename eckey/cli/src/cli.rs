use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::{
    ConvertCommand, GenerateCommand, InspectCommand, SignCommand, VerifyCommand,
};

/**
    ECDSA key and signature tool.
*/
#[derive(Parser)]
#[command(name = "eckey", version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new key pair.
    Generate(GenerateCommand),
    /// Show what a key file contains.
    Inspect(InspectCommand),
    /// Sign a file.
    Sign(SignCommand),
    /// Verify a signature over a file.
    Verify(VerifyCommand),
    /// Convert a key between PEM and key blob form.
    Convert(ConvertCommand),
}

impl Cli {
    /**
        Install a stderr log subscriber filtered by `RUST_LOG`, falling
        back to the `-v` level.
    */
    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Generate(cmd) => cmd.run(),
            Command::Inspect(cmd) => cmd.run(),
            Command::Sign(cmd) => cmd.run(),
            Command::Verify(cmd) => cmd.run(),
            Command::Convert(cmd) => cmd.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["eckey", "-vv", "inspect", "key.pem"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["eckey", "inspect", "key.pem", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn convert_needs_one_target() {
        assert!(Cli::try_parse_from(["eckey", "convert", "key.pem"]).is_err());
        assert!(Cli::try_parse_from(["eckey", "convert", "key.pem", "--pem", "--blob"]).is_err());
        assert!(Cli::try_parse_from(["eckey", "convert", "key.pem", "--blob"]).is_ok());
    }

    #[test]
    fn bad_curve_and_hash() {
        assert!(Cli::try_parse_from(["eckey", "generate", "--curve", "p999"]).is_err());
        assert!(
            Cli::try_parse_from(["eckey", "sign", "--key", "k", "--hash", "sha1", "in"]).is_err()
        );
        assert!(
            Cli::try_parse_from(["eckey", "sign", "--key", "k", "--hash", "SHA-384", "in"]).is_ok()
        );
    }
}
