// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Coordinate transforms as resolved by the geodesy layer, and the capability of a single
//! step to describe its own formula as an ECMAScript fragment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A coordinate transform: either one indivisible step or an ordered composition of
/// sub-transforms, which may themselves be composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    Atomic(AtomicStep),
    Composite { steps: Vec<Transform> },
}

impl Transform {
    pub fn is_atomic(&self) -> bool {
        matches!(self, Transform::Atomic(_))
    }

    /// The immediate sub-transforms. An atomic transform is its own single sub-transform.
    pub fn steps(&self) -> &[Transform] {
        match self {
            Transform::Atomic(_) => std::slice::from_ref(self),
            Transform::Composite { steps } => steps,
        }
    }
}

impl From<AtomicStep> for Transform {
    fn from(step: AtomicStep) -> Self {
        Transform::Atomic(step)
    }
}

/// One indivisible unit of a transform chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicStep {
    /// Diagnostic tag, e.g. `AffineTransform2D` or `Mercator`.
    pub type_name: String,
    pub source_dimensions: usize,
    pub target_dimensions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<ScriptFragment>,
}

impl AtomicStep {
    pub fn new(type_name: impl Into<String>, source_dimensions: usize, target_dimensions: usize) -> Self {
        Self {
            type_name: type_name.into(),
            source_dimensions,
            target_dimensions,
            fragment: None,
        }
    }

    pub fn with_fragment(mut self, fragment: ScriptFragment) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Returns the ECMAScript formula of this step, or an error if the step cannot express
    /// itself in that language.
    pub fn to_ecmascript(&self) -> Result<&ScriptFragment, UnsupportedStep> {
        self.fragment.as_ref().ok_or_else(|| UnsupportedStep {
            type_name: self.type_name.clone(),
        })
    }
}

/// ECMAScript formula of a step. The body reads `src[i]`, assigns `dst[j]`, and reads each
/// constant as `this.<name>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptFragment {
    #[serde(default)]
    pub constants: Vec<ScriptConstant>,
    pub body: String,
}

impl ScriptFragment {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            constants: vec![],
            body: body.into(),
        }
    }

    pub fn with_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.constants.push(ScriptConstant {
            name: name.into(),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptConstant {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transform step `{type_name}` cannot be expressed as ECMAScript")]
pub struct UnsupportedStep {
    pub type_name: String,
}

/// Supplies the formula fragment of an atomic step.
pub trait FragmentProvider: Send + Sync {
    fn fragment(&self, step: &AtomicStep) -> Result<ScriptFragment, UnsupportedStep>;
}

/// Provider reading the fragment carried by each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedFragments;

impl FragmentProvider for EmbeddedFragments {
    fn fragment(&self, step: &AtomicStep) -> Result<ScriptFragment, UnsupportedStep> {
        step.to_ecmascript().cloned()
    }
}
