// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes mapping object literal members onto Python class members.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rewrite_pipeline::RewritePass;

static NESTED_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^( +)(\S+) +: +\{").unwrap());
static STEP_INVOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"self\._(step\d+)\.").unwrap());
static METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^( +)(\S+) *: *function *\((.*)\)").unwrap());
static PROPERTY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^( +)(\S+) *: *(\S+) *, *$").unwrap());

/// A nested object member `name : {` becomes the nested class `class nameC :`.
pub struct NestedObjects();

impl NestedObjects {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for NestedObjects {
    fn rewrite(&self, text: String) -> String {
        NESTED_OBJECT
            .replace_all(&text, |caps: &Captures| {
                format!("{}class {}C :", &caps[1], &caps[2])
            })
            .into_owned()
    }

    fn name(&self) -> String {
        "nested_objects".to_string()
    }
}

/// Calls on a step member instantiate the nested step class first.
pub struct StepInvocations();

impl StepInvocations {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for StepInvocations {
    fn rewrite(&self, text: String) -> String {
        STEP_INVOCATION
            .replace_all(&text, |caps: &Captures| format!("self._{}C().", &caps[1]))
            .into_owned()
    }

    fn name(&self) -> String {
        "step_invocations".to_string()
    }
}

/// `name : function(args)` becomes the method `def name(self, args):`.
pub struct MethodDefinitions();

impl MethodDefinitions {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for MethodDefinitions {
    fn rewrite(&self, text: String) -> String {
        METHOD
            .replace_all(&text, |caps: &Captures| {
                format!("{}def {}(self, {}):", &caps[1], &caps[2], &caps[3])
            })
            .into_owned()
    }

    fn name(&self) -> String {
        "method_definitions".to_string()
    }
}

/// `name : value,` becomes the class attribute `name = value`.
pub struct ObjectProperties();

impl ObjectProperties {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for ObjectProperties {
    fn rewrite(&self, text: String) -> String {
        PROPERTY
            .replace_all(&text, |caps: &Captures| {
                format!("{}{} = {}", &caps[1], &caps[2], &caps[3])
            })
            .into_owned()
    }

    fn name(&self) -> String {
        "object_properties".to_string()
    }
}
