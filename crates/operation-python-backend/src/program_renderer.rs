// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders the Python `Operation` class. The metadata and entry points are written
//! directly; the operation objects are assembled as ECMAScript and transpiled.

use log::{info, warn};
use operation_ecmascript_backend::{ObjectAssembler, ScriptWriter};
use operation_model::{FragmentProvider, OperationPlan, StepChain};

use crate::pipeline_factory::shared_pipeline;

pub struct PythonRenderer<'a> {
    provider: &'a dyn FragmentProvider,
    dump_base_name: Option<String>,
}

impl<'a> PythonRenderer<'a> {
    pub fn new(provider: &'a dyn FragmentProvider) -> Self {
        Self {
            provider,
            dump_base_name: None,
        }
    }

    /// Writes the output of every rewrite pass to `<base>_<direction>_<n>_<pass>.py`.
    pub fn with_dump(mut self, dump_base_name: impl Into<String>) -> Self {
        self.dump_base_name = Some(dump_base_name.into());
        self
    }

    pub fn render(&self, plan: &OperationPlan) -> String {
        let assembler = ObjectAssembler::new(self.provider);
        let text = ScriptWriter::render_to_string("  ", |w| {
            w.line("#");
            w.line("# Coordinate operation generated by crs-codegen.");
            w.line("#");
            w.line("import math");
            w.newline();
            w.newline();
            w.line("class Operation:");
            w.indented(|w| {
                doc(
                    w,
                    "Valid geographic area of the operation as [west, south, east, north], or None.",
                );
                w.line_fmt(format_args!(
                    "operationGeographicBoundingBox = {}",
                    number_list(plan.metadata.geographic_bounding_box.map(|b| b.to_array()))
                ));
                w.newline();
                doc(
                    w,
                    "Domain of validity in target CRS coordinates as [minX, minY, maxX, maxY], or None.",
                );
                w.line_fmt(format_args!(
                    "domainOfValidity = {}",
                    number_list(plan.metadata.domain_of_validity.map(|e| e.to_array()))
                ));
                w.newline();
                doc(w, "Positional accuracy in metres, or math.nan if unknown.");
                w.line_fmt(format_args!(
                    "accuracy = {}",
                    number(plan.metadata.known_accuracy().unwrap_or(f64::NAN))
                ));
                w.newline();
                doc(
                    w,
                    "Formula transforming source coordinates to target coordinates, or None.",
                );
                self.write_entry_point(w, &assembler, plan.forward.as_ref(), "Forward", "transform");
                w.newline();
                doc(
                    w,
                    "Formula transforming target coordinates back to source coordinates, or None.",
                );
                self.write_entry_point(
                    w,
                    &assembler,
                    plan.inverse.as_ref(),
                    "Inverse",
                    "inverseTransform",
                );
            });
        });
        info!(
            "generated Python operation ({} forward steps, {} inverse steps)",
            plan.forward.as_ref().map_or(0, StepChain::len),
            plan.inverse.as_ref().map_or(0, StepChain::len)
        );
        text
    }

    fn write_entry_point(
        &self,
        w: &mut ScriptWriter<String>,
        assembler: &ObjectAssembler,
        chain: Option<&StepChain>,
        class: &str,
        method: &str,
    ) {
        match chain {
            Some(chain) => {
                let object = assembler.assemble(chain);
                let body = self.transpile(&object, &class.to_lowercase());
                w.line_fmt(format_args!("class _{}:", class));
                for line in body.lines().filter(|l| !l.trim().is_empty()) {
                    w.line(line.trim_end());
                }
                w.newline();
                w.line_fmt(format_args!("def {}(self, src):", method));
                w.indented(|w| {
                    w.line_fmt(format_args!("return self._{}().transform(src)", class))
                });
            }
            None => w.line_fmt(format_args!("{} = None", method)),
        }
    }

    fn transpile(&self, object: &str, direction: &str) -> String {
        if let Some(base) = &self.dump_base_name {
            let base_name = format!("{}_{}", base, direction);
            match shared_pipeline().run_with_dump(object, &base_name) {
                Ok(text) => return text,
                Err(err) => warn!("cannot dump rewrite passes to `{}`: {}", base, err),
            }
        }
        shared_pipeline().run(object)
    }
}

/// Renders a complete Python program for `plan` with the shared rewrite pipeline.
pub fn render_program(plan: &OperationPlan, provider: &dyn FragmentProvider) -> String {
    PythonRenderer::new(provider).render(plan)
}

fn doc(w: &mut ScriptWriter<String>, text: &str) {
    w.line("#");
    w.line_fmt(format_args!("# {}", text));
    w.line("#");
}

/// Formats a number as a Python expression that evaluates to the same `float`.
fn number(value: f64) -> String {
    if value.is_nan() {
        "math.nan".to_string()
    } else if value == f64::INFINITY {
        "math.inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-math.inf".to_string()
    } else {
        format!("{:?}", value)
    }
}

fn number_list(values: Option<[f64; 4]>) -> String {
    match values {
        Some(values) => format!("[{}]", values.map(number).join(", ")),
        None => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use operation_model::{
        AtomicStep, EmbeddedFragments, Envelope, OperationMetadata, ScriptFragment,
    };

    fn offset(dx: f64) -> StepChain {
        StepChain::new(vec![AtomicStep::new("Offset", 2, 2).with_fragment(
            ScriptFragment::new("dst[0] = src[0] + this.dx;\ndst[1] = src[1];")
                .with_constant("dx", dx),
        )])
        .unwrap()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(number(1.5), "1.5");
        assert_eq!(number(f64::NAN), "math.nan");
        assert_eq!(number(f64::NEG_INFINITY), "-math.inf");
        assert_eq!(number_list(None), "None");
        assert_eq!(number_list(Some([1.0, 2.0, 3.0, 4.5])), "[1.0, 2.0, 3.0, 4.5]");
    }

    #[test]
    fn test_program_layout() {
        let plan = OperationPlan {
            metadata: OperationMetadata {
                accuracy: None,
                geographic_bounding_box: None,
                domain_of_validity: Some(Envelope {
                    min_x: 0.0,
                    min_y: 1.0,
                    max_x: 2.0,
                    max_y: 3.0,
                }),
            },
            forward: Some(offset(10.0)),
            inverse: None,
        };
        let program = render_program(&plan, &EmbeddedFragments);
        assert!(program.starts_with("#\n# Coordinate operation generated by crs-codegen.\n#\nimport math\n\n\nclass Operation:\n"));
        assert!(program.contains("\n  operationGeographicBoundingBox = None\n"));
        assert!(program.contains("\n  domainOfValidity = [0.0, 1.0, 2.0, 3.0]\n"));
        assert!(program.contains("\n  accuracy = math.nan\n"));
        assert!(program.contains(
            "\n  class _Forward:\n\
             \x20   dx = 10.0\n\
             \x20   def transform(self, src):\n\
             \x20     dst = [None] * 2\n\
             \x20     dst[0] = src[0] + self.dx\n\
             \x20     dst[1] = src[1]\n\
             \x20     return dst\n\
             \n\
             \x20 def transform(self, src):\n\
             \x20   return self._Forward().transform(src)\n"
        ));
        assert!(program.ends_with("\n  inverseTransform = None\n"));
    }

    #[test]
    fn test_indented_fragment_matches_unindented() {
        let indented = StepChain::new(vec![AtomicStep::new("Offset", 2, 2).with_fragment(
            ScriptFragment::new("    dst[0] = src[0] + this.dx;\n    dst[1] = src[1];\n")
                .with_constant("dx", 10.0),
        )])
        .unwrap();
        let plan = |chain: StepChain| OperationPlan {
            metadata: OperationMetadata::default(),
            forward: Some(chain),
            inverse: None,
        };
        assert_eq!(
            render_program(&plan(indented), &EmbeddedFragments),
            render_program(&plan(offset(10.0)), &EmbeddedFragments)
        );
    }

    #[test]
    fn test_inverse_entry_point() {
        let plan = OperationPlan {
            metadata: OperationMetadata::default(),
            forward: Some(offset(10.0)),
            inverse: Some(offset(-10.0)),
        };
        let program = render_program(&plan, &EmbeddedFragments);
        assert!(program.contains("\n  class _Inverse:\n    dx = -10.0\n"));
        assert!(program.ends_with(
            "\n  def inverseTransform(self, src):\n    return self._Inverse().transform(src)\n"
        ));
    }

    #[test]
    fn test_dump_passes() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("op").to_string_lossy().to_string();
        let plan = OperationPlan {
            metadata: OperationMetadata::default(),
            forward: Some(offset(1.0)),
            inverse: None,
        };
        let dumped = PythonRenderer::new(&EmbeddedFragments)
            .with_dump(base.clone())
            .render(&plan);
        assert_eq!(dumped, render_program(&plan, &EmbeddedFragments));
        assert!(dir.path().join("op_forward_0_input.py").exists());
        assert!(dir.path().join("op_forward_23_list_concatenation.py").exists());
    }
}
