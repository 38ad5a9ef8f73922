// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use once_cell::sync::Lazy;

use crate::{
    passes::{
        arrays::{ArrayAllocation, ArraySlices, ListConcatenation},
        comments::{LineComments, StripBlockComments},
        control_flow::{ControlFlow, ForLoops},
        declarations::{DropForwardDeclarations, StripDeclarationKeywords},
        identifiers::{IdentifierSubstitution, NumericConstants, SelfReference},
        layout::{BlockDelimiters, CollapseTabs, StatementTerminators, UnwrapObject},
        objects::{MethodDefinitions, NestedObjects, ObjectProperties, StepInvocations},
        operators::{LineContinuations, LogicalOperators, TernaryExpressions},
    },
    rewrite_pipeline::{RewritePass, RewritePipeline},
};

static DEFAULT_PIPELINE: Lazy<RewritePipeline> = Lazy::new(default_pipeline);

pub fn default_pipeline_stages() -> Vec<Box<dyn RewritePass>> {
    // NOTE: the order of these passes is important!
    // Later passes rely on the layout left by earlier ones: declarations are recognised
    // before their keywords go away, object members before braces are dropped, and loops
    // and continuations after all delimiters and terminators are gone.
    vec![
        StripBlockComments::new(),
        UnwrapObject::new(),
        CollapseTabs::new(),
        DropForwardDeclarations::new(),
        StripDeclarationKeywords::new(),
        SelfReference::new(),
        LineComments::new(),
        StatementTerminators::new(),
        LogicalOperators::new(),
        IdentifierSubstitution::new(),
        NumericConstants::new(),
        NestedObjects::new(),
        StepInvocations::new(),
        ControlFlow::new(),
        BlockDelimiters::new(),
        MethodDefinitions::new(),
        ObjectProperties::new(),
        ArrayAllocation::new(),
        TernaryExpressions::new(),
        LineContinuations::new(),
        ForLoops::new(),
        ArraySlices::new(),
        ListConcatenation::new(),
    ]
}

pub fn default_pipeline() -> RewritePipeline {
    let mut pipeline = RewritePipeline::default();
    for pass in default_pipeline_stages() {
        pipeline.add_pass(pass);
    }
    pipeline
}

/// Rewrites an ECMAScript operation object into the body of a Python class.
pub fn transpile(object: &str) -> String {
    DEFAULT_PIPELINE.run(object)
}

/// The shared default pipeline.
pub fn shared_pipeline() -> &'static RewritePipeline {
    &DEFAULT_PIPELINE
}
