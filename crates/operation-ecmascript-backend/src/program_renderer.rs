// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders the `Operation` class exposing metadata and both transform directions.

use log::info;
use operation_model::{FragmentProvider, OperationPlan, StepChain};

use crate::{assembler::ObjectAssembler, literals, script_writer::ScriptWriter};

/// Renders a complete ECMAScript program for `plan`.
pub fn render_program(plan: &OperationPlan, provider: &dyn FragmentProvider) -> String {
    let assembler = ObjectAssembler::new(provider);
    let text = ScriptWriter::render_to_string("\t", |w| {
        w.line("/*");
        w.line(" * Coordinate operation generated by crs-codegen.");
        w.line(" */");
        w.line("class Operation {");
        w.indented(|w| {
            w.newline();
            doc(
                w,
                "Valid geographic area of the operation as [west, south, east, north], or undefined.",
            );
            w.line_fmt(format_args!(
                "operationGeographicBoundingBox = {};",
                literals::number_array(plan.metadata.geographic_bounding_box.map(|b| b.to_array()))
            ));
            w.newline();
            doc(
                w,
                "Domain of validity in target CRS coordinates as [minX, minY, maxX, maxY], or undefined.",
            );
            w.line_fmt(format_args!(
                "domainOfValidity = {};",
                literals::number_array(plan.metadata.domain_of_validity.map(|e| e.to_array()))
            ));
            w.newline();
            doc(w, "Positional accuracy in metres, or NaN if unknown.");
            w.line_fmt(format_args!(
                "accuracy = {};",
                literals::number(plan.metadata.known_accuracy().unwrap_or(f64::NAN))
            ));
            w.newline();
            doc(
                w,
                "Formula transforming source coordinates to target coordinates, or undefined.",
            );
            write_entry_point(w, &assembler, plan.forward.as_ref(), "forward", "transform");
            w.newline();
            doc(
                w,
                "Formula transforming target coordinates back to source coordinates, or undefined.",
            );
            write_entry_point(
                w,
                &assembler,
                plan.inverse.as_ref(),
                "inverse",
                "inverseTransform",
            );
        });
        w.line("}");
    });
    info!(
        "generated ECMAScript operation ({} forward steps, {} inverse steps)",
        plan.forward.as_ref().map_or(0, StepChain::len),
        plan.inverse.as_ref().map_or(0, StepChain::len)
    );
    text
}

fn doc(w: &mut ScriptWriter<String>, text: &str) {
    w.line("/*");
    w.line_fmt(format_args!(" * {}", text));
    w.line(" */");
}

fn write_entry_point(
    w: &mut ScriptWriter<String>,
    assembler: &ObjectAssembler,
    chain: Option<&StepChain>,
    field: &str,
    method: &str,
) {
    match chain {
        Some(chain) => {
            w.write_fmt(format_args!("#{} = ", field));
            w.write(&assembler.assemble(chain));
            w.line(";");
            w.newline();
            w.line_fmt(format_args!("{} = (src) => {{", method));
            w.indented(|w| {
                w.line_fmt(format_args!("return this.#{}.transform(src);", field))
            });
            w.line("};");
        }
        None => w.line_fmt(format_args!("{} = undefined;", method)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use operation_model::{
        AtomicStep, EmbeddedFragments, GeographicBoundingBox, OperationMetadata, ScriptFragment,
    };

    fn scale(factor: f64) -> StepChain {
        StepChain::new(vec![AtomicStep::new("Scale", 2, 2).with_fragment(
            ScriptFragment::new("dst[0] = this.k * src[0];\ndst[1] = this.k * src[1];")
                .with_constant("k", factor),
        )])
        .unwrap()
    }

    #[test]
    fn test_absent_metadata_is_undefined() {
        let plan = OperationPlan {
            metadata: OperationMetadata::default(),
            forward: Some(scale(2.0)),
            inverse: None,
        };
        let program = render_program(&plan, &EmbeddedFragments);
        assert!(program.contains("\toperationGeographicBoundingBox = undefined;\n"));
        assert!(program.contains("\tdomainOfValidity = undefined;\n"));
        assert!(program.contains("\taccuracy = NaN;\n"));
        assert!(program.contains("\tinverseTransform = undefined;\n"));
        assert!(!program.contains("#inverse"));
    }

    #[test]
    fn test_bounding_box_order() {
        let plan = OperationPlan {
            metadata: OperationMetadata {
                accuracy: Some(0.5),
                geographic_bounding_box: Some(GeographicBoundingBox {
                    west: -5.5,
                    south: 41.0,
                    east: 10.0,
                    north: 51.5,
                }),
                domain_of_validity: None,
            },
            forward: Some(scale(2.0)),
            inverse: Some(scale(0.5)),
        };
        let program = render_program(&plan, &EmbeddedFragments);
        assert!(program.contains("\toperationGeographicBoundingBox = [-5.5, 41.0, 10.0, 51.5];\n"));
        assert!(program.contains("\taccuracy = 0.5;\n"));
        assert!(program.contains(
            "\t#forward = {\n\t\tk : 2.0,\n\t\ttransform : function(src) {\n"
        ));
        assert!(program.contains(
            "\tinverseTransform = (src) => {\n\t\treturn this.#inverse.transform(src);\n\t};\n"
        ));
        assert!(program.contains("\t\tk : 0.5,\n"));
        assert!(program.ends_with("\t};\n}\n"));
    }

    #[test]
    fn test_forward_can_be_omitted() {
        let plan = OperationPlan {
            metadata: OperationMetadata::default(),
            forward: None,
            inverse: Some(scale(0.5)),
        };
        let program = render_program(&plan, &EmbeddedFragments);
        assert!(program.contains("\ttransform = undefined;\n"));
        assert!(program.contains("#inverse = {"));
        assert!(!program.contains("#forward"));
    }
}
