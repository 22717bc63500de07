//! Reading Go files and resolving them as packages.
//!
//! A file argument is a package of one file. A directory argument takes
//! every regular `*.go` file directly inside it (no recursion), groups them
//! by their `package` clause and resolves each group together, so a literal
//! in one file sees the types declared in its siblings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use structfix_parser::ast::item::SourceFile;
use structfix_parser::ast::AstNode;
use structfix_parser::{parse, ParseError, SyntaxNode};
use structfix_resolve::{resolve_package, BindingTable, FileId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot list directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {error}", path.display())]
    Parse {
        path: PathBuf,
        /// The file's full text, for rendering the error.
        text: String,
        error: ParseError,
    },
}

/// One parsed file.
#[derive(Debug)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub text: String,
    pub root: SyntaxNode,
}

/// Files sharing a package clause, with their bindings.
#[derive(Debug)]
pub struct LoadedPackage {
    pub name: String,
    pub files: Vec<LoadedFile>,
    pub bindings: BindingTable,
}

impl LoadedPackage {
    fn new(name: String, files: Vec<LoadedFile>) -> Self {
        let roots: Vec<(FileId, SyntaxNode)> = files
            .iter()
            .enumerate()
            .map(|(i, file)| (FileId(i as u32), file.root.clone()))
            .collect();
        let bindings = resolve_package(&roots);
        LoadedPackage {
            name,
            files,
            bindings,
        }
    }

    /// Files paired with the ids they were resolved under.
    pub fn numbered_files(&self) -> impl Iterator<Item = (FileId, &LoadedFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, file)| (FileId(i as u32), file))
    }
}

/// Load a file or directory argument.
///
/// Packages come back ordered by their first file; files within a package
/// are in lexical path order.
pub fn load(path: &Path) -> Result<Vec<LoadedPackage>, LoadError> {
    let metadata = fs::metadata(path).map_err(|source| LoadError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        let file = load_file(path)?;
        let name = package_name(&file.root);
        return Ok(vec![LoadedPackage::new(name, vec![file])]);
    }

    let mut groups: Vec<(String, Vec<LoadedFile>)> = Vec::new();
    for file_path in go_files(path)? {
        let file = load_file(&file_path)?;
        let name = package_name(&file.root);
        match groups.iter_mut().find(|(group, _)| *group == name) {
            Some((_, files)) => files.push(file),
            None => groups.push((name, vec![file])),
        }
    }

    tracing::debug!(dir = %path.display(), packages = groups.len(), "loaded directory");
    Ok(groups
        .into_iter()
        .map(|(name, files)| LoadedPackage::new(name, files))
        .collect())
}

/// Regular `*.go` files directly inside `dir`, sorted.
fn go_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_dir_error = |source: io::Error| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if !path.extension().is_some_and(|ext| ext == "go") {
            continue;
        }
        // Symlinks are followed.
        let metadata = fs::metadata(&path).map_err(|source| LoadError::Stat {
            path: path.clone(),
            source,
        })?;
        if metadata.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn load_file(path: &Path) -> Result<LoadedFile, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse(&text);
    if let Some(error) = parsed.errors().first() {
        return Err(LoadError::Parse {
            path: path.to_path_buf(),
            error: error.clone(),
            text,
        });
    }

    tracing::debug!(path = %path.display(), bytes = text.len(), "parsed file");
    Ok(LoadedFile {
        path: path.to_path_buf(),
        root: parsed.syntax(),
        text,
    })
}

fn package_name(root: &SyntaxNode) -> String {
    SourceFile::cast(root.clone())
        .and_then(|file| file.package_name())
        .unwrap_or_default()
}
