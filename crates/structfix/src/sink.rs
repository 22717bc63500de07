//! Where fixed files go.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use structfix_backfill::FixedFile;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot write output: {0}")]
    Stream(#[source] io::Error),
    #[error("cannot create temporary file in {}: {source}", dir.display())]
    TempFile {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot copy permissions to {}: {source}", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot replace {}: {source}", path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Receives each file once it has been fixed.
pub trait Sink {
    /// `original` is the text that was read from `path`.
    fn emit(&mut self, path: &Path, original: &str, fixed: &FixedFile) -> Result<(), SinkError>;
}

/// Prints every file, one after another, to a single writer.
pub struct StreamSink<W: Write> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        StreamSink { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn emit(&mut self, _path: &Path, _original: &str, fixed: &FixedFile) -> Result<(), SinkError> {
        fixed.print(&mut self.out).map_err(SinkError::Stream)?;
        self.out.flush().map_err(SinkError::Stream)
    }
}

/// Writes each changed file back over its source.
///
/// The new text goes to a temporary file next to the original, which is
/// then renamed over it; the original keeps its permissions. Unchanged
/// files are not touched.
#[derive(Debug, Default)]
pub struct InPlaceSink;

impl Sink for InPlaceSink {
    fn emit(&mut self, path: &Path, original: &str, fixed: &FixedFile) -> Result<(), SinkError> {
        let text = fixed.text();
        if text == original {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(());
        }
        replace_file(path, text.as_bytes())?;
        tracing::debug!(path = %path.display(), rewrites = fixed.rewrite_count(), "wrote file");
        Ok(())
    }
}

fn replace_file(path: &Path, contents: &[u8]) -> Result<(), SinkError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = |source: io::Error| SinkError::Write {
        path: path.to_path_buf(),
        source,
    };

    let permissions = fs::metadata(path).map_err(write_error)?.permissions();

    let mut temp = NamedTempFile::new_in(dir).map_err(|source| SinkError::TempFile {
        dir: dir.to_path_buf(),
        source,
    })?;
    temp.write_all(contents).map_err(write_error)?;
    temp.flush().map_err(write_error)?;

    fs::set_permissions(temp.path(), permissions).map_err(|source| SinkError::Permissions {
        path: path.to_path_buf(),
        source,
    })?;

    temp.persist(path).map_err(|err| SinkError::Rename {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
