// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Description of a coordinate reference system for clients that need its identifier,
//! units and axis layout next to the generated operations.

use std::{fs, path::Path};

use anyhow::Context;
use operation_model::{Envelope, GeneratedProgram};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A CRS as resolved by the geodesy layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrsDefinition {
    /// Authority code, e.g. `EPSG:3395`.
    pub code: String,
    #[serde(default)]
    pub domain_of_validity: Option<Envelope>,
    /// Name of the unit of the first axis.
    pub units: String,
    pub axis_directions: Vec<String>,
}

impl CrsDefinition {
    pub fn from_toml_file(toml_file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let toml_file = toml_file.as_ref();
        let toml_source = fs::read_to_string(toml_file)
            .with_context(|| format!("reading CRS definition from `{}`", toml_file.display()))?;
        toml::from_str(&toml_source)
            .with_context(|| format!("parsing CRS definition from `{}`", toml_file.display()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Description<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain_of_validity: Option<[f64; 4]>,
    units: &'a str,
    axis_direction: &'a [String],
}

/// Describes `crs` as JSON. `application/wkt` is a known format that is not produced.
pub fn describe_crs(crs: &CrsDefinition, media_type: &str) -> Result<GeneratedProgram, GenerationError> {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case("application/json") {
        let description = Description {
            code: &crs.code,
            domain_of_validity: crs.domain_of_validity.map(|e| e.to_array()),
            units: &crs.units,
            axis_direction: &crs.axis_directions,
        };
        Ok(GeneratedProgram {
            media_type: "application/json; charset=utf-8".to_string(),
            text: serde_json::to_string(&description)?,
        })
    } else if essence.eq_ignore_ascii_case("application/wkt") {
        Err(GenerationError::UnsupportedDefinitionFormat(essence.to_string()))
    } else {
        Err(GenerationError::UnsupportedFormat(media_type.to_string()))
    }
}
