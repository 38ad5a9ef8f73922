// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Python backend. The operation objects assembled by the ECMAScript backend are rewritten
//! into Python classes by an ordered pipeline of textual passes; see `pipeline_factory` for
//! the pass order.

pub mod passes;
pub mod pipeline_factory;
pub mod program_renderer;
pub mod rewrite_pipeline;

pub use pipeline_factory::{default_pipeline, transpile};
pub use program_renderer::{render_program, PythonRenderer};
pub use rewrite_pipeline::{RewritePass, RewritePipeline};
