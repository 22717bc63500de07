//! Struct type backfilling.
//!
//! Go lets a nested composite literal omit its type only inside array,
//! slice and map literals. For a struct field whose type is an inline
//! `struct { ... }`, the nested value has to repeat that type:
//!
//! ```go
//! type Outer struct {
//!     Inner struct { X int }
//! }
//!
//! var o = Outer{Inner: {X: 1}}                   // before
//! var o = Outer{Inner: struct { X int }{X: 1}}   // after
//! ```
//!
//! [`fix_file`] finds such values and copies the field's declared struct
//! type into them, to any depth. It works in two phases:
//!
//! - [`collect_rewrites`] walks the immutable tree and decides which
//!   literals get which type. A literal is only matched against fields
//!   when its own type names (through the package's [`BindingTable`]) a
//!   struct declaration.
//! - [`apply_rewrites`] splices the types into a mutable clone of the tree.
//!
//! A key that is not a plain identifier inside such a literal is a
//! [`BackfillError`]; the file is then left alone.

mod apply;
mod collect;
mod error;

use std::io;

use rowan::TextRange;
use structfix_parser::ast::ty::StructType;
use structfix_parser::SyntaxNode;
use structfix_resolve::{BindingTable, FileId};

pub use error::BackfillError;

/// A literal that receives a struct type.
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// Range of the value literal in the unmodified tree.
    pub literal: TextRange,
    /// The field's declared type, placed in the literal's type slot.
    pub record: StructType,
}

/// Decide every rewrite for the file rooted at `root`.
///
/// `bindings` must be the table of the package `file` belongs to.
pub fn collect_rewrites(
    file: FileId,
    root: &SyntaxNode,
    bindings: &BindingTable,
) -> Result<Vec<Rewrite>, BackfillError> {
    let mut collector = collect::Collector::new(file, bindings);
    collector.walk(root)?;
    Ok(collector.finish())
}

/// Apply `rewrites` (collected on `root`) to a copy of `root`.
pub fn apply_rewrites(root: &SyntaxNode, rewrites: &[Rewrite]) -> SyntaxNode {
    apply::apply(root, rewrites)
}

/// A file after backfilling.
#[derive(Debug, Clone)]
pub struct FixedFile {
    root: SyntaxNode,
    rewrites: usize,
}

impl FixedFile {
    pub fn syntax(&self) -> &SyntaxNode {
        &self.root
    }

    /// Number of literals that received a type.
    pub fn rewrite_count(&self) -> usize {
        self.rewrites
    }

    pub fn is_changed(&self) -> bool {
        self.rewrites > 0
    }

    /// The file's source text. Untouched bytes are reproduced exactly.
    pub fn text(&self) -> String {
        self.root.to_string()
    }

    pub fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
        write!(out, "{}", self.root)
    }
}

/// Backfill one file of a package.
pub fn fix_file(
    file: FileId,
    root: &SyntaxNode,
    bindings: &BindingTable,
) -> Result<FixedFile, BackfillError> {
    let rewrites = collect_rewrites(file, root, bindings)?;
    let root = if rewrites.is_empty() {
        root.clone()
    } else {
        apply_rewrites(root, &rewrites)
    };
    tracing::debug!(file = file.0, rewrites = rewrites.len(), "backfilled file");
    Ok(FixedFile {
        root,
        rewrites: rewrites.len(),
    })
}
