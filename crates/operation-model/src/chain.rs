// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Decomposition of composite transforms into validated chains of atomic steps.

use itertools::Itertools;
use thiserror::Error;

use crate::transform::{AtomicStep, Transform};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("transform chain has no steps")]
    Empty,
    #[error("step {index} (`{type_name}`) declares a zero dimension")]
    ZeroDimension { index: usize, type_name: String },
    #[error(
        "step {index} (`{type_name}`) produces {produced} dimensions but step {} expects {expected}",
        .index + 1
    )]
    DimensionMismatch {
        index: usize,
        type_name: String,
        produced: usize,
        expected: usize,
    },
}

/// Expands a transform into its atomic steps, in application order.
pub fn flatten(transform: &Transform) -> Vec<AtomicStep> {
    let mut steps = vec![];
    collect_steps(transform, &mut steps);
    steps
}

fn collect_steps(transform: &Transform, steps: &mut Vec<AtomicStep>) {
    match transform {
        Transform::Atomic(step) => steps.push(step.clone()),
        Transform::Composite { steps: children } => {
            for child in children {
                collect_steps(child, steps);
            }
        }
    }
}

/// A non-empty sequence of atomic steps where each step consumes exactly what the previous
/// one produces.
#[derive(Debug, Clone, PartialEq)]
pub struct StepChain {
    steps: Vec<AtomicStep>,
}

impl StepChain {
    pub fn new(steps: Vec<AtomicStep>) -> Result<Self, ChainError> {
        if steps.is_empty() {
            return Err(ChainError::Empty);
        }
        if let Some((index, step)) = steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.source_dimensions == 0 || step.target_dimensions == 0)
        {
            return Err(ChainError::ZeroDimension {
                index,
                type_name: step.type_name.clone(),
            });
        }
        for (index, (current, next)) in steps.iter().tuple_windows().enumerate() {
            if current.target_dimensions != next.source_dimensions {
                return Err(ChainError::DimensionMismatch {
                    index,
                    type_name: current.type_name.clone(),
                    produced: current.target_dimensions,
                    expected: next.source_dimensions,
                });
            }
        }
        Ok(Self { steps })
    }

    pub fn from_transform(transform: &Transform) -> Result<Self, ChainError> {
        Self::new(flatten(transform))
    }

    pub fn steps(&self) -> &[AtomicStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept alongside `len` for the usual collection vocabulary.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.steps.len() == 1
    }

    pub fn source_dimensions(&self) -> usize {
        self.steps[0].source_dimensions
    }

    pub fn target_dimensions(&self) -> usize {
        self.steps[self.steps.len() - 1].target_dimensions
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtomicStep> {
        self.steps.iter()
    }
}

impl From<StepChain> for Transform {
    fn from(chain: StepChain) -> Self {
        if chain.is_single() {
            let mut steps = chain.steps;
            Transform::Atomic(steps.remove(0))
        } else {
            Transform::Composite {
                steps: chain.steps.into_iter().map(Transform::Atomic).collect(),
            }
        }
    }
}
