// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use cargo_factory_common::universe_snapshot::FACTORY_DIR;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_OUT_DIR: &str = "src/generated";

// CLI Arguments
#[derive(Parser, Debug)]
#[command(name = "cargo-factory", bin_name = "cargo factory")]
#[command(author, version, about = "Validates factory declarations and generates keyed factories")]
#[command(propagate_version = true)]
pub struct FactoryCli {
    #[command(subcommand)]
    pub command: Option<FactoryCommand>,

    #[command(flatten)]
    pub options: PassOptions,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FactoryCommand {
    /// Validate declarations and write one factory per group (default)
    Generate,
    /// Validate and group declarations without writing anything
    Check,
    /// Print every group and its registered implementations
    PrintGroups,
    /// Propose a factory.ron from the type universe
    GenerateConfig,
}

/// Inputs shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PassOptions {
    /// Declaration file; repeat to concatenate several files into one pass
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub configs: Vec<PathBuf>,

    /// Universe snapshot file, or a directory of *_universe.json files
    #[arg(long, value_name = "PATH", default_value = FACTORY_DIR, global = true)]
    pub universe: PathBuf,

    /// Where generated factories are written
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR, global = true)]
    pub out_dir: PathBuf,
}

impl FactoryCli {
    /// The command to run, `generate` when none is given
    pub fn command(&self) -> FactoryCommand {
        self.command.clone().unwrap_or(FactoryCommand::Generate)
    }

    /// Parses `cargo-factory` arguments, accepting the extra `factory`
    /// argument cargo passes when invoked as `cargo factory`
    pub fn parse_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::parse_from(strip_cargo_subcommand(args))
    }
}

fn strip_cargo_subcommand<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args: Vec<String> = args.into_iter().collect();
    if args.get(1).is_some_and(|a| a == "factory") {
        args.remove(1);
    }
    args
}
