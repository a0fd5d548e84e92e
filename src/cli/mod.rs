//! CLI module for Knowledge Chat
//!
//! - `serve`: HTTP API over the cached Q&A collection
//! - `seed`: bulk load a dataset into the configured store

pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

/// Knowledge Chat - answers questions from a curated Q&A collection
#[derive(Parser)]
#[command(name = "knowledge-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Load a Q&A dataset into the store
    Seed(seed::SeedArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_flags() {
        let cli = Cli::parse_from([
            "knowledge-chat",
            "seed",
            "--sample",
            "--keep-existing",
            "--batch-size",
            "100",
        ]);

        let Command::Seed(args) = cli.command else {
            panic!("expected seed command");
        };
        assert!(args.sample);
        assert!(args.keep_existing);
        assert_eq!(args.batch_size, 100);
    }

    #[test]
    fn test_sample_conflicts_with_file() {
        let result = Cli::try_parse_from(["knowledge-chat", "seed", "--sample", "--file", "x.json"]);
        assert!(result.is_err());
    }
}
