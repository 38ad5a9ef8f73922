// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Line-based writer for generated source code with configurable indentation.

use std::fmt::Write;

/// Writer context for generated programs.
/// Tracks indentation and inserts the indent unit at the start of every non-empty line.
pub struct ScriptWriter<W: Write> {
    out: W,
    unit: &'static str,
    indent: usize,
    at_line_start: bool,
}

impl<W: Write> ScriptWriter<W> {
    /// Create a writer indenting with `unit`, e.g. `"\t"` or `"  "`.
    pub fn new(out: W, unit: &'static str) -> Self {
        Self {
            out,
            unit,
            indent: 0,
            at_line_start: true,
        }
    }

    /// Write a string, handling indentation at line starts.
    /// Empty lines stay empty.
    pub fn write(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                writeln!(self.out).unwrap();
                self.at_line_start = true;
            } else {
                if self.at_line_start {
                    for _ in 0..self.indent {
                        self.out.write_str(self.unit).unwrap();
                    }
                }
                self.at_line_start = false;
                self.out.write_char(c).unwrap();
            }
        }
    }

    /// Write a complete line (adds newline at end).
    pub fn line(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write a formatted line.
    /// Convenience method to avoid `w.line(&format!(...))`.
    pub fn line_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        self.line(&args.to_string());
    }

    /// Write a formatted string.
    pub fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        self.write(&args.to_string());
    }

    /// Write an empty line.
    pub fn newline(&mut self) {
        self.write("\n");
    }

    /// Increase indentation for subsequent lines.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation for subsequent lines.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Run `render` one indentation level deeper.
    pub fn indented<F: FnOnce(&mut Self)>(&mut self, render: F) {
        self.indent();
        render(self);
        self.dedent();
    }

    /// Get the underlying writer (consumes self).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ScriptWriter<String> {
    /// Render with a fresh string-backed writer and return the text.
    pub fn render_to_string<F: FnOnce(&mut Self)>(unit: &'static str, render: F) -> String {
        let mut w = ScriptWriter::new(String::new(), unit);
        render(&mut w);
        w.into_inner()
    }
}
