//! Load, fix and emit each path argument in turn.

use std::path::{Path, PathBuf};

use structfix_backfill::{fix_file, BackfillError, FixedFile};
use thiserror::Error;

use crate::loader::{self, LoadError, LoadedFile};
use crate::sink::{Sink, SinkError};

/// Any error that ends a run.
#[derive(Debug, Error)]
pub enum FixError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{}: {error}", path.display())]
    Backfill {
        path: PathBuf,
        text: String,
        error: BackfillError,
    },
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Totals over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub rewrites: usize,
}

pub struct Driver<S: Sink> {
    sink: S,
    summary: Summary,
}

impl<S: Sink> Driver<S> {
    pub fn new(sink: S) -> Self {
        Driver {
            sink,
            summary: Summary::default(),
        }
    }

    /// Process `paths` in order, stopping at the first error. Output for
    /// earlier paths has already reached the sink by then.
    pub fn run(mut self, paths: &[PathBuf]) -> Result<Summary, FixError> {
        for path in paths {
            self.fix_path(path)?;
        }
        Ok(self.summary)
    }

    /// Every file under `path` is fixed before the first one is emitted, so
    /// an error anywhere leaves all of them unwritten.
    fn fix_path(&mut self, path: &Path) -> Result<(), FixError> {
        let _span = tracing::debug_span!("path", path = %path.display()).entered();

        let packages = loader::load(path)?;
        let mut outputs: Vec<(&LoadedFile, FixedFile)> = Vec::new();
        for package in &packages {
            let _package = tracing::debug_span!("package", name = %package.name).entered();
            for (id, file) in package.numbered_files() {
                let fixed = fix_file(id, &file.root, &package.bindings).map_err(|error| {
                    FixError::Backfill {
                        path: file.path.clone(),
                        text: file.text.clone(),
                        error,
                    }
                })?;
                outputs.push((file, fixed));
            }
        }
        outputs.sort_by(|(a, _), (b, _)| a.path.cmp(&b.path));

        for (file, fixed) in &outputs {
            self.sink.emit(&file.path, &file.text, fixed)?;
            self.summary.files += 1;
            self.summary.rewrites += fixed.rewrite_count();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::sink::{InPlaceSink, StreamSink};

    const DECL: &str = "package p\n\ntype T struct {\n\tIn struct{ X int }\n}\n";
    const USE: &str = "package p\n\nvar t = T{In: {X: 1}}\n";
    const FIXED_USE: &str = "package p\n\nvar t = T{In: struct{ X int }{X: 1}}\n";

    /// Runs the driver into a buffer; returns stdout text and the result.
    fn run_to_string(paths: &[PathBuf]) -> (String, Result<Summary, FixError>) {
        let mut out = Vec::new();
        let result = Driver::new(StreamSink::new(&mut out)).run(paths);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn directory_output_is_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_use.go"), USE).unwrap();
        fs::write(dir.path().join("a_decl.go"), DECL).unwrap();

        let (out, result) = run_to_string(&[dir.path().to_path_buf()]);
        assert_eq!(result.unwrap(), Summary { files: 2, rewrites: 1 });
        assert_eq!(out, format!("{DECL}{FIXED_USE}"));
    }

    #[test]
    fn earlier_paths_are_kept_when_a_later_one_fails() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.go");
        fs::write(&good, "package p\n").unwrap();

        let (out, result) = run_to_string(&[good, dir.path().join("missing.go")]);
        assert_eq!(out, "package p\n");
        assert!(matches!(result, Err(FixError::Load(LoadError::Stat { .. }))));
    }

    #[test]
    fn usage_error_aborts_whole_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), format!("{DECL}\nvar u = T{{In: {{X: 1}}}}\n")).unwrap();
        fs::write(dir.path().join("b.go"), "package p\n\nvar v = T{\"In\": {X: 1}}\n").unwrap();

        let result = Driver::new(InPlaceSink).run(&[dir.path().to_path_buf()]);
        match result {
            Err(FixError::Backfill { path, error, .. }) => {
                assert_eq!(path, dir.path().join("b.go"));
                assert!(matches!(error, BackfillError::NonIdentifierKey { .. }));
            }
            other => panic!("expected a usage error, got {other:?}"),
        }

        let a = fs::read_to_string(dir.path().join("a.go")).unwrap();
        assert!(a.ends_with("var u = T{In: {X: 1}}\n"), "a.go was rewritten: {a}");
    }
}
