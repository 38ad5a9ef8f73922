// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes renaming identifiers and library members to their Python counterparts.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rewrite_pipeline::RewritePass;

/// Identifiers used by the projection formulas, mapped to ASCII names. Applied in this
/// order, so the compound names must come before the single letters they contain.
pub const GREEK_IDENTIFIERS: &[(&str, &str)] = &[
    ("expΨ", "expPsi"),
    ("Ψ", "psi"),
    ("sinφ", "sinLat"),
    ("ℯsin", "esin"),
    ("φ", "lat"),
    ("θ", "theta"),
    ("μ", "mu"),
    ("λ", "long"),
    ("ν", "pvr"),
    ("η", "eta"),
    ("ξ", "xi"),
    ("β", "beta"),
    ("ρ", "rho"),
];

static NAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Number\.math\.NaN|Number\.NaN|\bNaN\b").unwrap());
static PI: Lazy<Regex> = Lazy::new(|| Regex::new(r"math\.PI|\bPI\b").unwrap());

/// `this.` becomes `self.`.
pub struct SelfReference();

impl SelfReference {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for SelfReference {
    fn rewrite(&self, text: String) -> String {
        text.replace("this.", "self.")
    }

    fn name(&self) -> String {
        "self_reference".to_string()
    }
}

/// Maps `Math` members and infinities onto the `math` module, then applies
/// [`GREEK_IDENTIFIERS`].
pub struct IdentifierSubstitution();

impl IdentifierSubstitution {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for IdentifierSubstitution {
    fn rewrite(&self, text: String) -> String {
        let mut text = text
            .replace("Math", "math")
            .replace("math.abs", "math.fabs")
            .replace("Number.POSITIVE_INFINITY", "math.inf")
            .replace("Number.NEGATIVE_INFINITY", "-math.inf")
            .replace("math.sign(", "math.copysign(1, ");
        for (greek, ascii) in GREEK_IDENTIFIERS {
            text = text.replace(greek, ascii);
        }
        text
    }

    fn name(&self) -> String {
        "identifier_substitution".to_string()
    }
}

/// `NaN` and `PI` in their various spellings become `math.nan` and `math.pi`.
pub struct NumericConstants();

impl NumericConstants {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for NumericConstants {
    fn rewrite(&self, text: String) -> String {
        let text = NAN.replace_all(&text, "math.nan");
        PI.replace_all(&text, "math.pi").into_owned()
    }

    fn name(&self) -> String {
        "numeric_constants".to_string()
    }
}
