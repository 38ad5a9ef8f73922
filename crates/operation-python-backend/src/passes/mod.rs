// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Rewrite passes turning the ECMAScript dialect emitted by step fragments into Python.
//!
//! Every pass is a plain text-to-text function over the whole program. The dialect is
//! narrow: one statement per line, `let`/`const` locals, `Math` functions, `if`/`else`,
//! `while` and counted `for` loops with `continue`, negation, conditional expressions and
//! a few array methods. Anything outside of it passes through unchanged, so it fails when
//! the Python program is loaded rather than computing something else. Known gaps:
//!
//! - a block opened and closed on one line, like `if (c) { x = 1; }`, except the body of
//!   a `for` header;
//! - `do`/`while`, `switch` and labelled statements;
//! - a conditional expression whose parts contain parentheses or commas, like
//!   `f(x) > 0 ? 1 : 2`, or that is not a whole assigned, returned or parenthesized
//!   expression;
//! - statements spanning lines other than a continued assignment.

pub mod arrays;
pub mod comments;
pub mod control_flow;
pub mod declarations;
pub mod identifiers;
pub mod layout;
pub mod objects;
pub mod operators;

/// Number of leading spaces of `line`.
pub(crate) fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        assert_eq!(indentation("    x = 1"), 4);
        assert_eq!(indentation("x"), 0);
        assert_eq!(indentation("  "), 2);
    }
}
