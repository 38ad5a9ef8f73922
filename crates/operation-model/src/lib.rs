// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Data model for coordinate operations handed to the code generators: transforms, their
//! flattened step chains, operation metadata and the program formats that can be produced.

pub mod chain;
pub mod metadata;
pub mod program;
pub mod transform;

pub use chain::{flatten, ChainError, StepChain};
pub use metadata::{Envelope, GeographicBoundingBox, OperationMetadata};
pub use program::{Direction, GeneratedProgram, OperationPlan, OutputFormat, ParseDirectionError};
pub use transform::{
    AtomicStep, EmbeddedFragments, FragmentProvider, ScriptConstant, ScriptFragment, Transform,
    UnsupportedStep,
};
