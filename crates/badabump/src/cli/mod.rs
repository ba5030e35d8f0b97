//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{BumpCommand, CiCommand};

/// Manage changelog and bump project version number using conventional
/// commits from the latest git tag
#[derive(Debug, Parser)]
#[command(name = "badabump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory with the project
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub bump: BumpCommand,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Commands for release commits and tags at CI
    Ci(CiCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Some(Commands::Ci(cmd)) => cmd.execute(self),
            None => self.bump.execute(self),
        }
    }
}
