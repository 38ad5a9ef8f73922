// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes rewriting conditionals and counted loops.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::indentation;
use crate::rewrite_pipeline::RewritePass;

static ELSE_IF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^( *)\} *else +if *\( *(.*)\) *\{ *\n").unwrap());
static IF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^( *)if *\( *(.*)\) *\{ *\n").unwrap());
static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^( *)\} *else *\{ *\n").unwrap());
static WHILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^( *)while *\( *(.*)\) *\{ *\n").unwrap());
static WHILE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *while .*:$").unwrap());
static FOR_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^( *)for *\( *([^=;]+?) *= *([^;]+?) *; *([^;]+?) *; *(.+?) *\) *(.*?) *$").unwrap()
});
static STEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+\+|--)? *(\w+) *(\+\+|--)?$").unwrap());

/// Line-anchored `if`, `else if`, `else` and `while` headers become Python block headers.
pub struct ControlFlow();

impl ControlFlow {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

impl RewritePass for ControlFlow {
    fn rewrite(&self, text: String) -> String {
        let text = ELSE_IF.replace_all(&text, |caps: &Captures| {
            format!("{}elif {}:\n", &caps[1], &caps[2])
        });
        let text = IF.replace_all(&text, |caps: &Captures| {
            format!("{}if {}:\n", &caps[1], &caps[2])
        });
        let text = WHILE.replace_all(&text, |caps: &Captures| {
            format!("{}while {}:\n", &caps[1], &caps[2])
        });
        ELSE.replace_all(&text, |caps: &Captures| format!("{}else:\n", &caps[1]))
            .into_owned()
    }

    fn name(&self) -> String {
        "control_flow".to_string()
    }
}

/// Counted `for` loops become `while` loops.
///
/// `for (i = a; cond; step)` turns into `i = a` followed by `while cond:`, and the step is
/// appended as the last statement of the loop body, at the body's indentation. Every
/// `continue` of the loop is preceded by the step as well. The body ends at the first
/// non-blank line indented no deeper than the header. A body written on the header line
/// itself is moved onto its own lines. `while` loops already rewritten by [`ControlFlow`]
/// are tracked too, so a `continue` inside them keeps its meaning.
pub struct ForLoops();

impl ForLoops {
    pub fn new() -> Box<Self> {
        Box::new(Self())
    }
}

struct OpenLoop {
    header_indent: usize,
    body_indent: Option<usize>,
    /// None for `while` loops.
    step: Option<String>,
}

impl RewritePass for ForLoops {
    fn rewrite(&self, text: String) -> String {
        let mut out: Vec<String> = vec![];
        let mut open: Vec<OpenLoop> = vec![];
        for line in text.split('\n') {
            if line.trim().is_empty() {
                out.push(line.to_string());
                continue;
            }
            let indent = indentation(line);
            close_loops(&mut out, &mut open, Some(indent));
            if let Some(innermost) = open.last_mut() {
                innermost.body_indent.get_or_insert(indent);
            }
            match FOR_HEADER.captures(line) {
                Some(caps) => {
                    let pad = &caps[1];
                    out.push(format!("{}{} = {}", pad, &caps[2], &caps[3]));
                    out.push(format!("{}while {}:", pad, &caps[4]));
                    let mut open_loop = OpenLoop {
                        header_indent: pad.len(),
                        body_indent: None,
                        step: Some(normalize_step(&caps[5])),
                    };
                    let inline_body: Vec<&str> = caps[6]
                        .split(';')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .collect();
                    if inline_body.is_empty() {
                        open.push(open_loop);
                    } else {
                        let body_indent = pad.len() + 2;
                        for statement in inline_body {
                            out.push(format!("{}{}", " ".repeat(body_indent), statement));
                        }
                        open_loop.body_indent = Some(body_indent);
                        append_step(&mut out, open_loop);
                    }
                }
                None => {
                    if line.trim() == "continue" {
                        if let Some(step) = open.last().and_then(|l| l.step.as_ref()) {
                            out.push(format!("{}{}", " ".repeat(indent), step));
                        }
                    }
                    out.push(line.to_string());
                    if WHILE_HEADER.is_match(line) {
                        open.push(OpenLoop {
                            header_indent: indent,
                            body_indent: None,
                            step: None,
                        });
                    }
                }
            }
        }
        close_loops(&mut out, &mut open, None);
        out.join("\n")
    }

    fn name(&self) -> String {
        "for_loops".to_string()
    }
}

/// Closes every open loop whose body ends before a line at `indent`, or all of them.
fn close_loops(out: &mut Vec<String>, open: &mut Vec<OpenLoop>, indent: Option<usize>) {
    while let Some(innermost) = open.last() {
        if indent.is_some_and(|indent| indent > innermost.header_indent) {
            break;
        }
        if let Some(open_loop) = open.pop() {
            append_step(out, open_loop);
        }
    }
}

/// Inserts the loop step right after the last non-blank line of the body.
fn append_step(out: &mut Vec<String>, open_loop: OpenLoop) {
    let Some(step) = open_loop.step else {
        return;
    };
    let body_indent = open_loop
        .body_indent
        .unwrap_or(open_loop.header_indent + 2);
    let position = out
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(out.len(), |p| p + 1);
    out.insert(position, format!("{}{}", " ".repeat(body_indent), step));
}

/// `i++` and `++i` become `i += 1`, `i--` and `--i` become `i -= 1`. Other step expressions
/// are already valid Python statements.
fn normalize_step(step: &str) -> String {
    if let Some(caps) = STEP.captures(step.trim()) {
        let operator = caps.get(1).or_else(|| caps.get(3)).map(|m| m.as_str());
        match operator {
            Some("++") => return format!("{} += 1", &caps[2]),
            Some("--") => return format!("{} -= 1", &caps[2]),
            _ => {}
        }
    }
    step.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditionals() {
        let text = "    if (a > b and c) {\n      x = 1\n    } else if (f(a) == 0) {\n      x = 2\n    } else {\n      x = 3\n    }\n"
            .to_string();
        assert_eq!(
            ControlFlow::new().rewrite(text),
            "    if a > b and c:\n      x = 1\n    elif f(a) == 0:\n      x = 2\n    else:\n      x = 3\n    }\n"
        );
    }

    #[test]
    fn test_while_header() {
        let text = "    while (n > 0 and m) {\n      n = n - 1\n    }\n".to_string();
        assert_eq!(
            ControlFlow::new().rewrite(text),
            "    while n > 0 and m:\n      n = n - 1\n    }\n"
        );
    }

    #[test]
    fn test_step_normalization() {
        assert_eq!(normalize_step("i++"), "i += 1");
        assert_eq!(normalize_step("++i"), "i += 1");
        assert_eq!(normalize_step("k--"), "k -= 1");
        assert_eq!(normalize_step("i = i + 1"), "i = i + 1");
        assert_eq!(normalize_step(" i += 2 "), "i += 2");
        assert_eq!(normalize_step("i"), "i");
    }

    #[test]
    fn test_loop_step_follows_body() {
        let text = "    count = 0\n    for (i = 0; i < 3; i++) \n      count = count + i\n      \n    dst[0] = count\n"
            .to_string();
        assert_eq!(
            ForLoops::new().rewrite(text),
            "    count = 0\n    i = 0\n    while i < 3:\n      count = count + i\n      i += 1\n      \n    dst[0] = count\n"
        );
    }

    #[test]
    fn test_loop_at_end_of_text() {
        let text = "  for (i = 0; i < 3; i = i + 1) \n    dst[i] = src[i]\n  ".to_string();
        assert_eq!(
            ForLoops::new().rewrite(text),
            "  i = 0\n  while i < 3:\n    dst[i] = src[i]\n    i = i + 1\n  "
        );
    }

    #[test]
    fn test_inline_body() {
        let text = "  for (i = 0; i < 3; i = i + 1)  dst[i] = src[i];  \n  return dst\n".to_string();
        assert_eq!(
            ForLoops::new().rewrite(text),
            "  i = 0\n  while i < 3:\n    dst[i] = src[i]\n    i = i + 1\n  return dst\n"
        );
    }

    #[test]
    fn test_continue_runs_the_step() {
        let text = "for (i = 0; i < 4; i++) \n  if i == 1:\n    continue\n  for (j = 0; j < 2; j++) \n    if j == i:\n      continue\n    s = s + j\n  s = s + i\n"
            .to_string();
        assert_eq!(
            ForLoops::new().rewrite(text),
            "i = 0\nwhile i < 4:\n  if i == 1:\n    i += 1\n    continue\n  j = 0\n  while j < 2:\n    if j == i:\n      j += 1\n      continue\n    s = s + j\n    j += 1\n  s = s + i\n  i += 1\n"
        );
    }

    #[test]
    fn test_continue_in_inner_while_keeps_outer_step() {
        let text = "for (i = 0; i < 2; i++) \n  while n > 0:\n    n = n - 1\n    continue\n  s = s + i\n"
            .to_string();
        assert_eq!(
            ForLoops::new().rewrite(text),
            "i = 0\nwhile i < 2:\n  while n > 0:\n    n = n - 1\n    continue\n  s = s + i\n  i += 1\n"
        );
    }

    #[test]
    fn test_continue_outside_loop_is_unchanged() {
        let text = "  x = 1\n  continue\n".to_string();
        assert_eq!(ForLoops::new().rewrite(text.clone()), text);
    }

    #[test]
    fn test_nested_loops() {
        let text = "for (i = 0; i < 2; i++) \n  for (j = 0; j < 2; j++) \n    s = s + i * j\n  t = t + 1\nu = s\n"
            .to_string();
        assert_eq!(
            ForLoops::new().rewrite(text),
            "i = 0\nwhile i < 2:\n  j = 0\n  while j < 2:\n    s = s + i * j\n    j += 1\n  t = t + 1\n  i += 1\nu = s\n"
        );
    }
}
