//! Package-wide name resolution.
//!
//! Binds every identifier use (`NAME_REF`) in a package's files to the
//! declaration it names, following Go's block structure: package scope
//! (shared by all files), file scope (imports), then function, block,
//! statement and clause scopes.
//!
//! # Architecture
//!
//! - [`BindingTable`]: the read-only result, one per package.
//! - `scope`: the lexical scope stack.
//! - `resolver`: the tree walk that declares and binds names.
//!
//! Identifiers that denote no declaration of the package (universe types,
//! members of imported packages, selector members, struct field names and
//! literal keys) stay unbound.

mod resolver;
mod scope;

use rowan::TextRange;
use rustc_hash::FxHashMap;
use structfix_parser::ast::expr::NameRef;
use structfix_parser::ast::AstNode;
use structfix_parser::SyntaxNode;

/// Identifies one file of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

/// Index into [`BindingTable::decls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Type,
    Var,
    Const,
    Func,
    Param,
    Import,
}

/// A declared name.
#[derive(Debug, Clone)]
pub struct Decl {
    pub name: String,
    pub kind: DeclKind,
    /// File the declaration is written in.
    pub file: FileId,
    /// For declared types the `TYPE_SPEC`; for type parameters and
    /// everything else the defining `NAME`. Names introduced by `:=` and a
    /// method receiver's type parameters are `NAME_REF`s. Imports point at
    /// their `IMPORT_SPEC`.
    pub node: SyntaxNode,
}

/// Declarations of one package and the bindings of every resolved use.
#[derive(Debug, Default)]
pub struct BindingTable {
    decls: Vec<Decl>,
    refs: FxHashMap<(FileId, TextRange), DeclId>,
}

impl BindingTable {
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0 as usize]
    }

    pub fn decls(&self) -> impl Iterator<Item = &Decl> {
        self.decls.iter()
    }

    /// Declaration bound to an identifier use in `file`, if any.
    pub fn resolve(&self, file: FileId, name_ref: &NameRef) -> Option<&Decl> {
        let range = name_ref.syntax().text_range();
        self.refs.get(&(file, range)).map(|id| self.decl(*id))
    }

    fn add_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    fn bind(&mut self, file: FileId, range: TextRange, decl: DeclId) {
        self.refs.insert((file, range), decl);
    }
}

/// Resolve all files of one package together.
///
/// `files` pairs each file's id with its `SOURCE_FILE` root; ids must be
/// distinct. Top-level declarations of every file are visible in every
/// other file.
pub fn resolve_package(files: &[(FileId, SyntaxNode)]) -> BindingTable {
    let table = resolver::Resolver::new().run(files);
    tracing::debug!(
        files = files.len(),
        decls = table.decls.len(),
        refs = table.refs.len(),
        "resolved package"
    );
    table
}
