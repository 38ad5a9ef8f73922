// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::Path};

use anyhow::Context;
use log::LevelFilter;
use operation_model::Direction;
use serde::{Deserialize, Serialize};

/// Represents options provided to the tool. Most of those options are configured via a toml
/// source; some over the command line flags.
///
/// NOTE: optional fields must stay at the end for making toml printing work. When changing
/// this config, use `crs-codegen print-config` to verify this works.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Media type of the generated program, `text/javascript` or `text/x-python`.
    pub output_format: String,
    /// Which transform directions get an entry point.
    pub direction: Direction,
    /// Verbosity level for logging.
    pub verbosity_level: LevelFilter,
    /// If set, the text left by every rewrite pass is written next to this base name.
    pub dump_passes: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_format: "text/javascript".to_string(),
            direction: Direction::Both,
            verbosity_level: LevelFilter::Info,
            dump_passes: None,
        }
    }
}

impl Options {
    pub fn from_toml_str(toml_source: &str) -> anyhow::Result<Options> {
        Ok(toml::from_str(toml_source)?)
    }

    pub fn from_toml_file(toml_file: impl AsRef<Path>) -> anyhow::Result<Options> {
        let toml_file = toml_file.as_ref();
        let toml_source = fs::read_to_string(toml_file)
            .with_context(|| format!("reading options from `{}`", toml_file.display()))?;
        Self::from_toml_str(&toml_source)
            .with_context(|| format!("parsing options from `{}`", toml_file.display()))
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }
}
