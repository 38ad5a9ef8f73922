// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rewrite_pipeline::RewritePass;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Removes `/* ... */` comments, including multi-line ones.
pub struct StripBlockComments();

impl StripBlockComments {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for StripBlockComments {
    fn rewrite(&self, text: String) -> String {
        BLOCK_COMMENT.replace_all(&text, "").into_owned()
    }

    fn name(&self) -> String {
        "strip_block_comments".to_string()
    }
}

/// Turns `//` comments into `#` comments.
pub struct LineComments();

impl LineComments {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for LineComments {
    fn rewrite(&self, text: String) -> String {
        text.replace("//", "#")
    }

    fn name(&self) -> String {
        "line_comments".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_comments_are_removed() {
        let text = "a = 1;\n/* first\n * second */\nb = 2; /* inline */ c = 3;\n".to_string();
        assert_eq!(
            StripBlockComments::new().rewrite(text),
            "a = 1;\n\nb = 2;  c = 3;\n"
        );
    }

    #[test]
    fn test_block_comments_are_not_greedy() {
        let text = "/* a */x/* b */".to_string();
        assert_eq!(StripBlockComments::new().rewrite(text), "x");
    }

    #[test]
    fn test_line_comments() {
        let text = "  x = 1; // note\n  // Unsupported step: Foo\n".to_string();
        assert_eq!(
            LineComments::new().rewrite(text),
            "  x = 1; # note\n  # Unsupported step: Foo\n"
        );
    }
}
