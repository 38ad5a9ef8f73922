// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rewrite_pipeline::RewritePass;

static FORWARD_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ *(?:let|const) +[^\s=;]+ *;* *\n").unwrap());
static DECLARATION_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:let|const|var) +").unwrap());

/// Deletes declarations without initializer such as `let count;`. Python variables come
/// into existence on first assignment.
pub struct DropForwardDeclarations();

impl DropForwardDeclarations {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for DropForwardDeclarations {
    fn rewrite(&self, text: String) -> String {
        FORWARD_DECLARATION.replace_all(&text, "").into_owned()
    }

    fn name(&self) -> String {
        "drop_forward_declarations".to_string()
    }
}

/// Strips `let`, `const` and `var` from declarations with initializer.
pub struct StripDeclarationKeywords();

impl StripDeclarationKeywords {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for StripDeclarationKeywords {
    fn rewrite(&self, text: String) -> String {
        DECLARATION_KEYWORD.replace_all(&text, "").into_owned()
    }

    fn name(&self) -> String {
        "strip_declaration_keywords".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_declarations() {
        let text = "    let dst;\n    const n = 2;\n    let x=1;\n  let count ;\n".to_string();
        assert_eq!(
            DropForwardDeclarations::new().rewrite(text),
            "    const n = 2;\n    let x=1;\n"
        );
    }

    #[test]
    fn test_declaration_keywords() {
        let text = "const λ = src[0];\nlet φ = 1;\nvar k = 2;\nfor (let i = 0; i < 2; i++) {\nconstant = 1;\n"
            .to_string();
        assert_eq!(
            StripDeclarationKeywords::new().rewrite(text),
            "λ = src[0];\nφ = 1;\nk = 2;\nfor (i = 0; i < 2; i++) {\nconstant = 1;\n"
        );
    }
}
