// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Assembles the operation object of one transform direction.
//!
//! A single step becomes
//!
//! ```text
//! {
//!     m00 : 2.0,
//!     transform : function(src) {
//!         const dst = new Array(2);
//!         dst[0] = this.m00 * src[0];
//!         ...
//!         return dst;
//!     }
//! }
//! ```
//!
//! A chain of several steps nests one such object per step under `_step<i>` and adds a
//! `transform` function feeding the output of each step into the next one. Each step keeps
//! its own function scope, so local variables of different fragments never collide.

use log::{debug, warn};
use operation_model::{AtomicStep, EmbeddedFragments, FragmentProvider, StepChain};

use crate::{literals, script_writer::ScriptWriter};

pub struct ObjectAssembler<'a> {
    provider: &'a dyn FragmentProvider,
}

impl<'a> ObjectAssembler<'a> {
    pub fn new(provider: &'a dyn FragmentProvider) -> Self {
        Self { provider }
    }

    /// Returns the object text, without trailing newline.
    pub fn assemble(&self, chain: &StepChain) -> String {
        ScriptWriter::render_to_string("\t", |w| {
            if chain.is_single() {
                self.write_step_object(w, &chain.steps()[0]);
            } else {
                self.write_chain_object(w, chain);
            }
        })
    }

    fn write_chain_object(&self, w: &mut ScriptWriter<String>, chain: &StepChain) {
        w.line("{");
        w.indented(|w| {
            for (index, step) in chain.iter().enumerate() {
                w.write_fmt(format_args!("{} : ", step_member(index)));
                self.write_step_object(w, step);
                w.line(",");
            }
            w.line("transform : function(src) {");
            w.indented(|w| {
                w.line("let dst;");
                for index in 0..chain.len() {
                    w.line_fmt(format_args!(
                        "dst = src = this.{}.transform(src);",
                        step_member(index)
                    ));
                }
                w.line("return dst;");
            });
            w.line("}");
        });
        w.write("}");
    }

    fn write_step_object(&self, w: &mut ScriptWriter<String>, step: &AtomicStep) {
        let fragment = self.provider.fragment(step);
        w.line("{");
        w.indented(|w| {
            if let Ok(fragment) = &fragment {
                for constant in &fragment.constants {
                    w.line_fmt(format_args!(
                        "{} : {},",
                        constant.name,
                        literals::number(constant.value)
                    ));
                }
            }
            w.line("transform : function(src) {");
            w.indented(|w| {
                w.line_fmt(format_args!(
                    "const dst = new Array({});",
                    step.target_dimensions
                ));
                match &fragment {
                    Ok(fragment) => {
                        debug!("assembling step `{}`", step.type_name);
                        for line in body_lines(&fragment.body) {
                            w.line(line);
                        }
                    }
                    Err(err) => {
                        warn!("{}; emitting a placeholder", err);
                        w.line(&placeholder(step));
                    }
                }
                w.line("return dst;");
            });
            w.line("}");
        });
        w.write("}");
    }
}

/// Assembles `chain` with the fragments carried by its steps.
pub fn assemble_object(chain: &StepChain) -> String {
    ObjectAssembler::new(&EmbeddedFragments).assemble(chain)
}

/// Non-blank lines of a fragment body, without trailing whitespace and without the
/// indentation shared by all of them.
fn body_lines(body: &str) -> Vec<&str> {
    let lines: Vec<&str> = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::trim_end)
        .collect();
    let common = lines
        .iter()
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    lines.into_iter().map(|line| &line[common..]).collect()
}

fn step_member(index: usize) -> String {
    format!("_step{}", index)
}

/// Comment standing in for the formula of a step that cannot be expressed.
pub fn placeholder(step: &AtomicStep) -> String {
    format!(
        "// Unsupported step: {} (no formula available)",
        step.type_name
    )
}
