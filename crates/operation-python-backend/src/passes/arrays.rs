// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes rewriting array construction and array methods onto Python lists.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rewrite_pipeline::RewritePass;

static NEW_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"new Array\(([^()\n]*)\)").unwrap());
static SPREAD_SLICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\.\.\.(\S+?)\.slice\((-?\d+), *(-?\d+)\)\]").unwrap());
static RANGE_SLICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+?)\.slice\((-?\d+), *(-?\d+)\)").unwrap());
static TAIL_SLICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S+?)\.slice\((-?\d+)\)").unwrap());
static CONCAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)\.concat\((.+)\) *$").unwrap());

/// `new Array(n)` becomes `[None] * n`.
pub struct ArrayAllocation();

impl ArrayAllocation {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for ArrayAllocation {
    fn rewrite(&self, text: String) -> String {
        NEW_ARRAY
            .replace_all(&text, |caps: &Captures| format!("[None] * {}", &caps[1]))
            .into_owned()
    }

    fn name(&self) -> String {
        "array_allocation".to_string()
    }
}

/// `[...v.slice(a, b)]` and `v.slice(a, b)` become `v[a:b]`; `v.slice(k)` becomes `v[k:]`,
/// which like its ECMAScript counterpart yields a list, also for a negative `k`.
pub struct ArraySlices();

impl ArraySlices {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for ArraySlices {
    fn rewrite(&self, text: String) -> String {
        let text = SPREAD_SLICE.replace_all(&text, range_slice);
        let text = RANGE_SLICE.replace_all(&text, range_slice);
        TAIL_SLICE
            .replace_all(&text, |caps: &Captures| format!("{}[{}:]", &caps[1], &caps[2]))
            .into_owned()
    }

    fn name(&self) -> String {
        "array_slices".to_string()
    }
}

fn range_slice(caps: &Captures) -> String {
    format!("{}[{}:{}]", &caps[1], &caps[2], &caps[3])
}

/// A chain of `.concat(...)` calls ending a line becomes list addition.
pub struct ListConcatenation();

impl ListConcatenation {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for ListConcatenation {
    fn rewrite(&self, text: String) -> String {
        CONCAT
            .replace_all(&text, |caps: &Captures| {
                format!(" + {}", caps[1].replace(").concat(", " + "))
            })
            .into_owned()
    }

    fn name(&self) -> String {
        "list_concatenation".to_string()
    }
}
