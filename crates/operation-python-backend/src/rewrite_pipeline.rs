// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::{fs, io, path::PathBuf};

use log::debug;

/// A trait describing one textual rewrite pass.
pub trait RewritePass: Send + Sync {
    /// Rewrites the whole program text as left by the preceding pass. Passes never fail:
    /// text they do not recognise is left untouched.
    fn rewrite(&self, text: String) -> String;

    /// Returns a name for this pass. This should be suitable as a file suffix.
    fn name(&self) -> String;
}

/// An ordered sequence of rewrite passes, applied left to right.
#[derive(Default)]
pub struct RewritePipeline {
    passes: Vec<Box<dyn RewritePass>>,
}

impl RewritePipeline {
    /// Adds a pass to this pipeline. The pass will run after all previously added passes.
    pub fn add_pass(&mut self, pass: Box<dyn RewritePass>) {
        self.passes.push(pass)
    }

    pub fn passes(&self) -> impl Iterator<Item = &dyn RewritePass> {
        self.passes.iter().map(|p| p.as_ref())
    }

    /// Runs the pipeline, calling the hook with the pass count (starting at 1), the pass and
    /// its output after each pass.
    pub fn run_with_hook<H>(&self, text: &str, hook_after_each_pass: H) -> String
    where
        H: Fn(usize, &dyn RewritePass, &str),
    {
        let mut text = text.to_string();
        for (step_count, pass) in self.passes.iter().enumerate() {
            text = pass.rewrite(text);
            debug!("applied rewrite pass `{}`", pass.name());
            hook_after_each_pass(step_count + 1, pass.as_ref(), &text);
        }
        text
    }

    /// Runs the pipeline with no hooks in effect.
    pub fn run(&self, text: &str) -> String {
        self.run_with_hook(text, |_, _, _| {})
    }

    /// Runs the pipeline and writes the input and the text after each pass to
    /// `<base>_<n>_<pass>.py`.
    pub fn run_with_dump(&self, text: &str, dump_base_name: &str) -> io::Result<String> {
        Self::dump_to_file(dump_base_name, 0, "input", text)?;
        let mut text = text.to_string();
        for (step_count, pass) in self.passes.iter().enumerate() {
            text = pass.rewrite(text);
            Self::dump_to_file(dump_base_name, step_count + 1, &pass.name(), &text)?;
        }
        Ok(text)
    }

    fn dump_to_file(base_name: &str, step_count: usize, suffix: &str, content: &str) -> io::Result<()> {
        let file_name = PathBuf::from(format!("{}_{}_{}.py", base_name, step_count, suffix));
        debug!("dumping rewrite pass output to `{}`", file_name.display());
        fs::write(&file_name, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Append(&'static str);

    impl RewritePass for Append {
        fn rewrite(&self, text: String) -> String {
            text + self.0
        }

        fn name(&self) -> String {
            format!("append_{}", self.0)
        }
    }

    fn pipeline() -> RewritePipeline {
        let mut pipeline = RewritePipeline::default();
        pipeline.add_pass(Box::new(Append("a")));
        pipeline.add_pass(Box::new(Append("b")));
        pipeline
    }

    #[test]
    fn test_passes_run_in_order() {
        assert_eq!(pipeline().run("x"), "xab");
        assert_eq!(RewritePipeline::default().passes().count(), 0);
        assert_eq!(RewritePipeline::default().run("x"), "x");
    }

    #[test]
    fn test_hook_sees_every_pass() {
        let seen = Mutex::new(vec![]);
        pipeline().run_with_hook("x", |count, pass, text| {
            seen.lock()
                .unwrap()
                .push(format!("{} {} {}", count, pass.name(), text));
        });
        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["1 append_a xa", "2 append_b xab"]
        );
    }

    #[test]
    fn test_dump_writes_each_stage() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("op");
        let base = base.to_str().unwrap();
        assert_eq!(pipeline().run_with_dump("x", base).unwrap(), "xab");
        let read = |suffix: &str| fs::read_to_string(format!("{}_{}.py", base, suffix)).unwrap();
        assert_eq!(read("0_input"), "x");
        assert_eq!(read("1_append_a"), "xa");
        assert_eq!(read("2_append_b"), "xab");
    }
}
