// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes rewriting operators and expression forms.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rewrite_pipeline::RewritePass;

static NEGATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)").unwrap());
static FALSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfalse\b").unwrap());
static TRUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btrue\b").unwrap());
static CONDITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(= +|return +|\( *)([^?:(),\n]+?) +\? +([^?:(),\n]+?) +: +([^?:(),\n]+?)( *\)| *$)")
        .unwrap()
});
static CONTINUED_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^( +)(.+ [-+*/]?= +)(.+?) *\n((?: +[-+*/] +.+\n)+)").unwrap()
});
static CONTINUATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^( +)([-+*/]) +(.+?) *$").unwrap());

/// Boolean operators, strict comparisons and boolean literals.
pub struct LogicalOperators();

impl LogicalOperators {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for LogicalOperators {
    fn rewrite(&self, text: String) -> String {
        let text = text
            .replace("&&", "and")
            .replace("||", "or")
            .replace("!==", "!=")
            .replace("===", "==");
        let text = negate_groups(&text);
        let text = NEGATION.replace_all(&text, "(not $1)");
        let text = FALSE.replace_all(&text, "False");
        TRUE.replace_all(&text, "True").into_owned()
    }

    fn name(&self) -> String {
        "logical_operators".to_string()
    }
}

/// `!(expr)` becomes `(not (expr))`. The closing parenthesis is found by nesting depth.
fn negate_groups(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    // Depths at which a negated group closes, innermost last.
    let mut negated: Vec<usize> = vec![];
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '!' if chars.peek() == Some(&'(') => {
                out.push_str("(not ");
                negated.push(depth);
            }
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                out.push(c);
                if negated.last() == Some(&depth) {
                    negated.pop();
                    out.push(')');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// `c ? x : y` becomes `x if c else y` when it makes up a whole assigned or returned
/// expression, or a whole parenthesized group. Other conditional expressions are left
/// untouched.
pub struct TernaryExpressions();

impl TernaryExpressions {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for TernaryExpressions {
    fn rewrite(&self, text: String) -> String {
        CONDITIONAL
            .replace_all(&text, |caps: &Captures| {
                format!(
                    "{}{} if {} else {}{}",
                    &caps[1],
                    &caps[3],
                    caps[2].replace("===", "=="),
                    &caps[4],
                    &caps[5]
                )
            })
            .into_owned()
    }

    fn name(&self) -> String {
        "ternary_expressions".to_string()
    }
}

/// An assignment whose expression continues on following lines starting with a binary
/// operator is wrapped in parentheses, which Python needs to read it as one statement.
pub struct LineContinuations();

impl LineContinuations {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for LineContinuations {
    fn rewrite(&self, text: String) -> String {
        CONTINUED_ASSIGNMENT
            .replace_all(&text, |caps: &Captures| {
                let mut out = format!("{}{}({}", &caps[1], &caps[2], &caps[3]);
                for line in CONTINUATION_LINE.captures_iter(&caps[4]) {
                    out.push_str(&format!("\n{}{} {}", &line[1], &line[2], &line[3]));
                }
                out.push_str(")\n");
                out
            })
            .into_owned()
    }

    fn name(&self) -> String {
        "line_continuations".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_operators() {
        let text = "if (a && !done || x !== y && z === 0 && !self.flag) {\nok = true\nbad = false\ntruest = 1\n"
            .to_string();
        assert_eq!(
            LogicalOperators::new().rewrite(text),
            "if (a and (not done) or x != y and z == 0 and (not self.flag)) {\nok = True\nbad = False\ntruest = 1\n"
        );
    }

    #[test]
    fn test_negated_groups() {
        let text = "ok = !(a > b) and !(f(x) or !(y))\nz = x != (y)\n".to_string();
        assert_eq!(
            LogicalOperators::new().rewrite(text),
            "ok = (not (a > b)) and (not (f(x) or (not (y))))\nz = x != (y)\n"
        );
    }

    #[test]
    fn test_conditional_expression() {
        let text = "    dst[0] = x === 0 ? a : b\n".to_string();
        assert_eq!(
            TernaryExpressions::new().rewrite(text),
            "    dst[0] = a if x == 0 else b\n"
        );
        let text = "    sign = lat < 0 ? -1 : 1\n".to_string();
        assert_eq!(
            TernaryExpressions::new().rewrite(text),
            "    sign = -1 if lat < 0 else 1\n"
        );
    }

    #[test]
    fn test_whole_expression_is_the_condition() {
        let text = "      dst[0] = src[0] - src[1] > 0 ? 1 : 2\n".to_string();
        assert_eq!(
            TernaryExpressions::new().rewrite(text),
            "      dst[0] = 1 if src[0] - src[1] > 0 else 2\n"
        );
        let text = "      y = x == 0 ? 1 : x / 2\n      return a <= b ? a : b\n".to_string();
        assert_eq!(
            TernaryExpressions::new().rewrite(text),
            "      y = 1 if x == 0 else x / 2\n      return a if a <= b else b\n"
        );
        let text = "      t = 2 * (n > 0 ? n : -n)\n".to_string();
        assert_eq!(
            TernaryExpressions::new().rewrite(text),
            "      t = 2 * (n if n > 0 else -n)\n"
        );
    }

    #[test]
    fn test_partial_conditional_is_left_alone() {
        let text = "      y = f(x) > 0 ? 1 : 2\n".to_string();
        assert_eq!(TernaryExpressions::new().rewrite(text.clone()), text);
    }

    #[test]
    fn test_text_without_conditional_is_unchanged() {
        let text = "    def transform(self, src): \n    x = a + b\n".to_string();
        assert_eq!(TernaryExpressions::new().rewrite(text.clone()), text);
    }

    #[test]
    fn test_continuation_is_parenthesized() {
        let text = "      dst[1] = a * b\n          + c * d  \n          - e\n      dst[0] = 1\n".to_string();
        assert_eq!(
            LineContinuations::new().rewrite(text),
            "      dst[1] = (a * b\n          + c * d\n          - e)\n      dst[0] = 1\n"
        );
    }

    #[test]
    fn test_continued_compound_assignment() {
        let text = "      t += src[1]\n        + 1\n      dst[0] = t\n".to_string();
        assert_eq!(
            LineContinuations::new().rewrite(text),
            "      t += (src[1]\n        + 1)\n      dst[0] = t\n"
        );
    }

    #[test]
    fn test_single_line_assignment_is_unchanged() {
        let text = "      x = a + b\n      y = -x\n".to_string();
        assert_eq!(LineContinuations::new().rewrite(text.clone()), text);
    }
}
