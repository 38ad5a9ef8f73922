// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes dealing with the block and statement layout of the program text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rewrite_pipeline::RewritePass;

static TERMINATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"; *\n").unwrap());
static DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{|\},?").unwrap());

/// Removes the braces enclosing the whole operation object.
pub struct UnwrapObject();

impl UnwrapObject {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for UnwrapObject {
    fn rewrite(&self, text: String) -> String {
        let body = text.strip_prefix('{').unwrap_or(&text);
        body.strip_suffix('}').unwrap_or(body).to_string()
    }

    fn name(&self) -> String {
        "unwrap_object".to_string()
    }
}

/// Replaces each tab with two spaces.
pub struct CollapseTabs();

impl CollapseTabs {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for CollapseTabs {
    fn rewrite(&self, text: String) -> String {
        text.replace('\t', "  ")
    }

    fn name(&self) -> String {
        "collapse_tabs".to_string()
    }
}

/// Drops the `;` ending a line.
pub struct StatementTerminators();

impl StatementTerminators {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for StatementTerminators {
    fn rewrite(&self, text: String) -> String {
        TERMINATOR.replace_all(&text, "\n").into_owned()
    }

    fn name(&self) -> String {
        "statement_terminators".to_string()
    }
}

/// Removes the braces left once objects, functions and conditionals have been rewritten.
/// Python blocks are delimited by indentation alone.
pub struct BlockDelimiters();

impl BlockDelimiters {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for BlockDelimiters {
    fn rewrite(&self, text: String) -> String {
        DELIMITER.replace_all(&text, "").into_owned()
    }

    fn name(&self) -> String {
        "block_delimiters".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_only_outer_braces() {
        let text = "{\n\ta : {\n\t}\n}".to_string();
        assert_eq!(UnwrapObject::new().rewrite(text), "\n\ta : {\n\t}\n");
        assert_eq!(UnwrapObject::new().rewrite("x".to_string()), "x");
    }

    #[test]
    fn test_tabs() {
        assert_eq!(CollapseTabs::new().rewrite("\t\tx\n\ty".to_string()), "    x\n  y");
    }

    #[test]
    fn test_terminators_only_at_line_end() {
        let text = "a = 1;\nfor (i = 0; i < 2; i++) {\nb = 2;   \n".to_string();
        assert_eq!(
            StatementTerminators::new().rewrite(text),
            "a = 1\nfor (i = 0; i < 2; i++) {\nb = 2\n"
        );
    }

    #[test]
    fn test_delimiters() {
        let text = "  def f(self, src): \n    x = 1\n  \n  },\n".to_string();
        assert_eq!(
            BlockDelimiters::new().rewrite(text),
            "  def f(self, src): \n    x = 1\n  \n  \n"
        );
    }
}
