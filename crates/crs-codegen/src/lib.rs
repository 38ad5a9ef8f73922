// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Entry point for generating coordinate operation programs and CRS descriptions.
//!
//! [`generator::generate`] flattens the forward and inverse transforms of an operation,
//! assembles their formula fragments into an ECMAScript program and, when Python is
//! requested, rewrites the assembled objects into a Python class.

pub mod crs_definition;
pub mod error;
pub mod generator;
pub mod generator_options;

pub use crs_definition::{describe_crs, CrsDefinition};
pub use error::{ErrorKind, GenerationError};
pub use generator::{generate, generate_with_options, generate_with_provider, OperationRequest};
pub use generator_options::Options;
pub use operation_model::{Direction, GeneratedProgram, OutputFormat};
