// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::*;
use colored::Colorize;
use crs_codegen::{
    crs_definition::{describe_crs, CrsDefinition},
    generator::{generate_with_options, OperationRequest},
    generator_options::Options,
    Direction, GeneratedProgram,
};
use log::{debug, LevelFilter};
use simplelog::{Config, WriteLogger};

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Generates ECMAScript or Python programs applying a coordinate operation, and describes coordinate reference systems",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Generator options (toml)
    #[clap(long = "config", short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Display detailed generation progress
    #[clap(name = "verbose", long, short = 'v', global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the program of a coordinate operation described in a toml file
    Operation {
        /// Operation description (toml)
        input: PathBuf,

        /// Media type of the program: text/javascript or text/x-python
        #[clap(long, short = 'f')]
        format: Option<String>,

        /// Entry points to generate: forward, inverse or both
        #[clap(long, short = 'd')]
        direction: Option<Direction>,

        /// Write the program to this file instead of stdout
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,

        /// Dump the text after every rewrite pass, using this base name
        #[clap(long = "dump-passes")]
        dump_passes: Option<String>,
    },
    /// Describe a coordinate reference system given in a toml file
    Define {
        /// CRS definition (toml)
        input: PathBuf,

        /// Media type of the description
        #[clap(long, short = 'f', default_value = "application/json")]
        format: String,
    },
    /// Print the effective generator options
    PrintConfig,
}

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let args = Args::parse();
    match execute(args) {
        Ok(_) => (),
        Err(err) => {
            let err = format!("{:?}", err);
            eprintln!("{}", err.bold().red());
            std::process::exit(1);
        }
    }
}

fn execute(args: Args) -> anyhow::Result<()> {
    let mut options = match &args.config {
        Some(path) => Options::from_toml_file(path)?,
        None => Options::default(),
    };
    if args.verbose {
        options.verbosity_level = LevelFilter::Trace;
    }
    // Log to stderr; stdout carries the generated program.
    WriteLogger::init(options.verbosity_level, Config::default(), std::io::stderr())
        .context("initializing logger")?;
    debug!("crs-codegen version: {}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Operation {
            input,
            format,
            direction,
            output,
            dump_passes,
        } => {
            if let Some(format) = format {
                options.output_format = format;
            }
            if let Some(direction) = direction {
                options.direction = direction;
            }
            if dump_passes.is_some() {
                options.dump_passes = dump_passes;
            }
            let request = OperationRequest::from_toml_file(&input)?;
            let program = generate_with_options(&request, &options)
                .with_context(|| format!("generating operation from `{}`", input.display()))?;
            emit(&program, output)
        }
        Command::Define { input, format } => {
            let crs = CrsDefinition::from_toml_file(&input)?;
            let description = describe_crs(&crs, &format)
                .with_context(|| format!("describing CRS from `{}`", input.display()))?;
            emit(&description, None)
        }
        Command::PrintConfig => {
            print!("{}", options.to_toml_string()?);
            Ok(())
        }
    }
}

fn emit(program: &GeneratedProgram, output: Option<PathBuf>) -> anyhow::Result<()> {
    debug!("emitting {}", program.media_type);
    match output {
        Some(path) => fs::write(&path, &program.text)
            .with_context(|| format!("writing `{}`", path.display())),
        None => {
            print!("{}", program.text);
            Ok(())
        }
    }
}
