// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! ECMAScript backend: assembles the formula fragments of a step chain into an operation
//! object and wraps the objects of both directions into an `Operation` class.

pub mod assembler;
pub mod literals;
pub mod program_renderer;
pub mod script_writer;

pub use assembler::{assemble_object, ObjectAssembler};
pub use program_renderer::render_program;
pub use script_writer::ScriptWriter;
