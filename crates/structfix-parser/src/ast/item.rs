//! Typed AST nodes for declarations: source file, package clause, imports,
//! const/var/type specs, functions and their parameter lists.

use crate::ast::ty::Type;
use crate::ast::{ast_node, child_node, child_nodes, child_token, ident_text, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// ── Source File ──────────────────────────────────────────────────────────

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn package_clause(&self) -> Option<PackageClause> {
        child_node(&self.syntax)
    }

    /// Name from the `package` clause.
    pub fn package_name(&self) -> Option<String> {
        self.package_clause()?.name().map(|n| n.text())
    }

    /// All top-level declarations, in source order.
    pub fn decls(&self) -> impl Iterator<Item = Decl> + '_ {
        self.syntax.children().filter_map(Decl::cast)
    }

    /// Import specs across all import declarations.
    pub fn imports(&self) -> impl Iterator<Item = ImportSpec> + '_ {
        self.syntax
            .children()
            .filter_map(ImportDecl::cast)
            .flat_map(|decl| decl.specs().collect::<Vec<_>>())
    }
}

ast_node!(PackageClause, PACKAGE_CLAUSE);

impl PackageClause {
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }
}

// ── Decl enum ────────────────────────────────────────────────────────────

/// A top-level or block-local declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    Import(ImportDecl),
    Const(ConstDecl),
    Var(VarDecl),
    Type(TypeDecl),
    Func(FuncDecl),
}

impl Decl {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IMPORT_DECL => Some(Decl::Import(ImportDecl { syntax: node })),
            SyntaxKind::CONST_DECL => Some(Decl::Const(ConstDecl { syntax: node })),
            SyntaxKind::VAR_DECL => Some(Decl::Var(VarDecl { syntax: node })),
            SyntaxKind::TYPE_DECL => Some(Decl::Type(TypeDecl { syntax: node })),
            SyntaxKind::FUNC_DECL => Some(Decl::Func(FuncDecl { syntax: node })),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Decl::Import(it) => it.syntax(),
            Decl::Const(it) => it.syntax(),
            Decl::Var(it) => it.syntax(),
            Decl::Type(it) => it.syntax(),
            Decl::Func(it) => it.syntax(),
        }
    }
}

// ── Imports ──────────────────────────────────────────────────────────────

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    pub fn specs(&self) -> impl Iterator<Item = ImportSpec> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(ImportSpec, IMPORT_SPEC);

impl ImportSpec {
    /// Explicit alias, `_` included.
    pub fn alias(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    /// `import . "pkg"`
    pub fn is_dot(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::DOT).is_some()
    }

    /// Import path with its quotes stripped.
    pub fn path(&self) -> Option<String> {
        let token = child_token(&self.syntax, SyntaxKind::STRING_LITERAL)
            .or_else(|| child_token(&self.syntax, SyntaxKind::RAW_STRING_LITERAL))?;
        let text = token.text();
        Some(text.get(1..text.len().saturating_sub(1)).unwrap_or_default().to_string())
    }

    /// Name the import binds in the file scope: the alias, or the last path
    /// element. `None` for dot imports.
    pub fn local_name(&self) -> Option<String> {
        if self.is_dot() {
            return None;
        }
        if let Some(alias) = self.alias() {
            return Some(alias.text());
        }
        let path = self.path()?;
        path.rsplit('/').next().map(str::to_string)
    }
}

// ── Const / Var / Type ───────────────────────────────────────────────────

ast_node!(ConstDecl, CONST_DECL);
ast_node!(VarDecl, VAR_DECL);
ast_node!(TypeDecl, TYPE_DECL);

impl ConstDecl {
    pub fn specs(&self) -> impl Iterator<Item = ConstSpec> + '_ {
        child_nodes(&self.syntax)
    }
}

impl VarDecl {
    pub fn specs(&self) -> impl Iterator<Item = VarSpec> + '_ {
        child_nodes(&self.syntax)
    }
}

impl TypeDecl {
    pub fn specs(&self) -> impl Iterator<Item = TypeSpec> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(ConstSpec, CONST_SPEC);
ast_node!(VarSpec, VAR_SPEC);

impl ConstSpec {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        child_nodes(&self.syntax)
    }
}

impl VarSpec {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(TypeSpec, TYPE_SPEC);

impl TypeSpec {
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        child_node(&self.syntax)
    }

    /// `type A = B`
    pub fn is_alias(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::EQ).is_some()
    }

    /// The declared type: the first child after the name and type
    /// parameters.
    pub fn ty(&self) -> Option<Type> {
        self.syntax
            .children()
            .filter(|n| !matches!(n.kind(), SyntaxKind::NAME | SyntaxKind::TYPE_PARAM_LIST))
            .find_map(Type::cast)
    }
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    pub fn params(&self) -> impl Iterator<Item = TypeParam> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        child_nodes(&self.syntax)
    }
}

// ── Functions ────────────────────────────────────────────────────────────

ast_node!(FuncDecl, FUNC_DECL);

impl FuncDecl {
    pub fn receiver(&self) -> Option<Receiver> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        child_node(&self.syntax)
    }

    pub fn params(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    pub fn result(&self) -> Option<FuncResult> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(Receiver, RECEIVER);

impl Receiver {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(Param, PARAM);

impl Param {
    /// Declared names; empty for an unnamed parameter.
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn ty(&self) -> Option<Type> {
        self.syntax
            .children()
            .filter(|n| n.kind() != SyntaxKind::NAME)
            .find_map(Type::cast)
    }
}

ast_node!(FuncResult, RESULT);

impl FuncResult {
    /// `(a int, err error)` form.
    pub fn params(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }
}

ast_node!(Block, BLOCK);

// ── Names ────────────────────────────────────────────────────────────────

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> String {
        ident_text(&self.syntax).unwrap_or_default()
    }
}
