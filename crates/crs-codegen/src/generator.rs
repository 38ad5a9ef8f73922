// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::Path};

use anyhow::Context;
use log::{debug, info};
use operation_model::{
    Direction, EmbeddedFragments, FragmentProvider, GeneratedProgram, OperationMetadata,
    OperationPlan, OutputFormat, StepChain, Transform,
};
use operation_python_backend::PythonRenderer;
use serde::{Deserialize, Serialize};

use crate::{error::GenerationError, generator_options::Options};

/// A resolved coordinate operation: its transform, the inverse transform when the operation
/// is invertible, and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationRequest {
    pub forward: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<Transform>,
    #[serde(default)]
    pub metadata: OperationMetadata,
}

impl OperationRequest {
    pub fn from_toml_str(toml_source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml_source)?)
    }

    pub fn from_toml_file(toml_file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let toml_file = toml_file.as_ref();
        let toml_source = fs::read_to_string(toml_file)
            .with_context(|| format!("reading operation from `{}`", toml_file.display()))?;
        Self::from_toml_str(&toml_source)
            .with_context(|| format!("parsing operation from `{}`", toml_file.display()))
    }
}

/// Generates the program of `request` for `direction` in the language named by `media_type`,
/// using the formula fragments carried by the transform steps.
pub fn generate(
    request: &OperationRequest,
    direction: Direction,
    media_type: &str,
) -> Result<GeneratedProgram, GenerationError> {
    generate_with_provider(request, direction, media_type, &EmbeddedFragments)
}

pub fn generate_with_provider(
    request: &OperationRequest,
    direction: Direction,
    media_type: &str,
    provider: &dyn FragmentProvider,
) -> Result<GeneratedProgram, GenerationError> {
    let format = resolve_format(media_type)?;
    let plan = plan(request, direction)?;
    Ok(render(&plan, format, provider, None))
}

/// Generates the program of `request` as configured by `options`.
pub fn generate_with_options(
    request: &OperationRequest,
    options: &Options,
) -> Result<GeneratedProgram, GenerationError> {
    let format = resolve_format(&options.output_format)?;
    let plan = plan(request, options.direction)?;
    Ok(render(
        &plan,
        format,
        &EmbeddedFragments,
        options.dump_passes.as_deref(),
    ))
}

fn resolve_format(media_type: &str) -> Result<OutputFormat, GenerationError> {
    OutputFormat::from_media_type(media_type)
        .ok_or_else(|| GenerationError::UnsupportedFormat(media_type.to_string()))
}

/// Flattens and validates the chains of the requested directions.
fn plan(request: &OperationRequest, direction: Direction) -> Result<OperationPlan, GenerationError> {
    let forward = if direction.includes_forward() {
        let forward = StepChain::from_transform(&request.forward)?;
        debug!("forward transform has {} steps", forward.len());
        Some(forward)
    } else {
        None
    };
    let inverse = match (&request.inverse, direction) {
        (None, Direction::Inverse) => return Err(GenerationError::UnsupportedDirection),
        (Some(inverse), _) if direction.includes_inverse() => {
            let inverse = StepChain::from_transform(inverse)?;
            debug!("inverse transform has {} steps", inverse.len());
            Some(inverse)
        }
        _ => None,
    };
    Ok(OperationPlan {
        metadata: request.metadata.clone(),
        forward,
        inverse,
    })
}

fn render(
    plan: &OperationPlan,
    format: OutputFormat,
    provider: &dyn FragmentProvider,
    dump_passes: Option<&str>,
) -> GeneratedProgram {
    info!("generating {} program", format);
    let text = match format {
        OutputFormat::EcmaScript => operation_ecmascript_backend::render_program(plan, provider),
        OutputFormat::Python => {
            let renderer = PythonRenderer::new(provider);
            match dump_passes {
                Some(base) => renderer.with_dump(base).render(plan),
                None => renderer.render(plan),
            }
        }
    };
    GeneratedProgram {
        media_type: format.content_type(),
        text,
    }
}
