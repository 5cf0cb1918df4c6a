//!
//! cargo-factory
//! This is the entry point for our cargo extension, and what is ultimately run
//! when you type `cargo factory` on the command line. To run, it must be present
//! in the user's path.
//!
//! # Inputs
//!
//! A pass needs two things:
//!
//!   1. Declarations - a `factory.ron` listing `(id, group, implementation)`
//!      triples. Without `--config` we look for it in the cargo workspace root,
//!      then in the current directory. Several `--config` files are read in
//!      argument order and concatenated into a single pass.
//!   2. A type universe - one or more `*_universe.json` snapshots describing
//!      the shapes of the types the declarations name (kind, visibility,
//!      supertype, interfaces, constructors). `--universe` points at a file or
//!      a directory and defaults to `.factory/`.
//!
//! # Commands
//!
//!   * `generate` (default) validates every declaration, groups them, and writes
//!     one `<group_path>_factory.rs` per group into `--out-dir`.
//!   * `check` stops after validation and grouping.
//!   * `print-groups` prints the groups that would be generated.
//!   * `generate-config` proposes a starting `factory.ron` from the universe.
//!
//! A single invalid declaration or duplicate id fails the whole pass before
//! anything is written. A factory that fails to write does not stop the others.
//!

#![warn(rust_2018_idioms, unused_lifetimes)]

mod cli;
mod utils;

use cli::{FactoryCli, FactoryCommand, PassOptions};
use utils::console_sink::{ConsoleSink, summary_line};
use utils::group_tree::format_groups;
use utils::inputs::{load_declarations, load_universe, resolve_config_paths};

use ansi_term::Colour::{Green, Red, Yellow};
use anyhow::Context;
use cargo_factory_common::UniverseSnapshot;
use cargo_factory_common::workspace::FACTORY_RON;
use cargo_factory_config::{Declaration, DeclarationBuilder, GenerateFromUniverse};
use cargo_factory_impl::{PassOutcome, ProcessingDriver, RustSourceRenderer};
use std::env;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::process::exit;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CARGO_FACTORY_LOG";
const GENERATED_CONFIG: &str = "factory.generated.ron";

/// Simple error type that wraps a command exit code
#[derive(Debug)]
struct CommandExitStatus(i32);

impl fmt::Display for CommandExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command failed with exit code: {}", self.0)
    }
}

impl Error for CommandExitStatus {}

pub fn main() {
    setup_tracing();

    let cli = FactoryCli::parse_args(env::args());
    if let Err(status) = process(&cli) {
        exit(status.0);
    }
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr; stdout is for the user-facing report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn process(cli: &FactoryCli) -> Result<(), CommandExitStatus> {
    let result = match cli.command() {
        FactoryCommand::Generate => process_generate(&cli.options),
        FactoryCommand::Check => process_check(&cli.options),
        FactoryCommand::PrintGroups => process_print_groups(&cli.options),
        FactoryCommand::GenerateConfig => process_generate_config(&cli.options),
    };

    result.map_err(|error| match error.downcast::<CommandExitStatus>() {
        // Diagnostics were already printed
        Ok(status) => status,
        Err(error) => {
            println!("{}: {error:#}", Red.bold().paint("error"));
            CommandExitStatus(2)
        }
    })
}

fn load_inputs(options: &PassOptions) -> anyhow::Result<(Vec<Declaration>, UniverseSnapshot)> {
    let config_paths = resolve_config_paths(&options.configs)?;
    let declarations = load_declarations(&config_paths)?;
    let universe = load_universe(&options.universe)?;
    Ok((declarations, universe))
}

/// Validate, group, and write every factory
fn process_generate(options: &PassOptions) -> anyhow::Result<()> {
    let (declarations, universe) = load_inputs(options)?;

    let mut sink = ConsoleSink::new(false);
    let mut renderer = RustSourceRenderer::new(&options.out_dir);
    let driver = ProcessingDriver::new(&universe);

    match driver.run(&declarations, &mut renderer, &mut sink) {
        PassOutcome::Done(report) => {
            let groups = report.emitted.len() + report.failed.len();
            println!("{}", summary_line(groups, report.failed.len()));
            if report.is_clean() {
                Ok(())
            } else {
                Err(CommandExitStatus(1).into())
            }
        }
        PassOutcome::Aborted(_) => {
            println!("{}", Yellow.paint("No factories were generated."));
            Err(CommandExitStatus(1).into())
        }
    }
}

/// Validate and group without writing anything
fn process_check(options: &PassOptions) -> anyhow::Result<()> {
    let (declarations, universe) = load_inputs(options)?;

    let mut sink = ConsoleSink::new(false);
    let driver = ProcessingDriver::new(&universe);

    match driver.register(&declarations, &mut sink) {
        Ok(registry) => {
            println!(
                "{} {} declarations in {} groups",
                Green.bold().paint("Valid:"),
                declarations.len(),
                registry.len()
            );
            Ok(())
        }
        Err(_) => Err(CommandExitStatus(1).into()),
    }
}

fn process_print_groups(options: &PassOptions) -> anyhow::Result<()> {
    let (declarations, universe) = load_inputs(options)?;

    let mut sink = ConsoleSink::new(true);
    let registry = ProcessingDriver::new(&universe)
        .register(&declarations, &mut sink)
        .map_err(|_| CommandExitStatus(1))?;

    print!("{}", format_groups(&registry));
    Ok(())
}

/// Propose declarations for every group in the universe
fn process_generate_config(options: &PassOptions) -> anyhow::Result<()> {
    let generated = Path::new(GENERATED_CONFIG);
    if generated.exists() {
        println!("Error: {GENERATED_CONFIG} already exists.");
        println!("Remove it if you want to regenerate the configuration.");
        return Err(CommandExitStatus(1).into());
    }

    let universe = load_universe(&options.universe)?;

    let mut builder = DeclarationBuilder::new();
    Declaration::generate_from_universe(&universe, &mut builder);
    if builder.declarations.is_empty() {
        println!(
            "{}",
            Yellow.paint("No interface or abstract type in the universe has public concrete implementations.")
        );
    }

    builder
        .write_to_file(generated)
        .with_context(|| format!("Failed to write {GENERATED_CONFIG}"))?;

    // Adopt the generated file straight away if there's nothing to clobber
    if !Path::new(FACTORY_RON).exists() {
        match std::fs::rename(generated, FACTORY_RON) {
            Ok(()) => println!("Created {FACTORY_RON} from {GENERATED_CONFIG}"),
            Err(e) => println!("Warning: Failed to rename {GENERATED_CONFIG} to {FACTORY_RON}: {e}"),
        }
    } else {
        println!(
            "Wrote {} declarations to {}",
            builder.declarations.len(),
            Green.paint(GENERATED_CONFIG)
        );
    }

    Ok(())
}
