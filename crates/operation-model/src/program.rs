// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Program formats, transform directions and the per-request rendering plan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{chain::StepChain, metadata::OperationMetadata};

/// Languages a coordinate operation can be generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    EcmaScript,
    Python,
}

impl OutputFormat {
    /// Resolves a media type such as `text/javascript` or `Text/X-Python; charset=utf-8`.
    /// Parameters are ignored and the comparison is case-insensitive.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("text/javascript") {
            Some(OutputFormat::EcmaScript)
        } else if essence.eq_ignore_ascii_case("text/x-python") {
            Some(OutputFormat::Python)
        } else {
            None
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            OutputFormat::EcmaScript => "text/javascript",
            OutputFormat::Python => "text/x-python",
        }
    }

    /// Media type of generated text, including its charset.
    pub fn content_type(&self) -> String {
        format!("{}; charset=utf-8", self.media_type())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

/// Which entry points of an operation are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Inverse,
    #[default]
    Both,
}

impl Direction {
    pub fn includes_forward(&self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    pub fn includes_inverse(&self) -> bool {
        matches!(self, Direction::Inverse | Direction::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`, expected one of `forward`, `inverse` or `both`")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "inverse" => Ok(Direction::Inverse),
            "both" => Ok(Direction::Both),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Inverse => write!(f, "inverse"),
            Direction::Both => write!(f, "both"),
        }
    }
}

/// Everything a backend needs to render one program. A missing chain renders as an
/// explicitly undefined entry point.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    pub metadata: OperationMetadata,
    pub forward: Option<StepChain>,
    pub inverse: Option<StepChain>,
}

/// Generated source text together with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    pub media_type: String,
    pub text: String,
}
