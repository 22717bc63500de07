//! The resolution walk.
//!
//! Runs in two passes over a package: first every file's top-level names go
//! into the shared package scope, then each file is walked with its imports
//! in a file scope and local scopes pushed as blocks are entered.

use structfix_parser::ast::expr::{AssignStmt, Expr, NameRef, RangeClause};
use structfix_parser::ast::item::{Decl as AstDecl, FuncDecl, Name, SourceFile};
use structfix_parser::ast::AstNode;
use structfix_parser::{SyntaxKind, SyntaxNode};

use crate::scope::ScopeStack;
use crate::{BindingTable, Decl, DeclKind, FileId};

pub(crate) struct Resolver {
    table: BindingTable,
    scopes: ScopeStack,
    file: FileId,
}

impl Resolver {
    pub(crate) fn new() -> Self {
        Resolver {
            table: BindingTable::default(),
            scopes: ScopeStack::new(),
            file: FileId(0),
        }
    }

    pub(crate) fn run(mut self, files: &[(FileId, SyntaxNode)]) -> BindingTable {
        for (file, root) in files {
            self.file = *file;
            self.declare_package(root);
        }

        for (file, root) in files {
            self.file = *file;
            self.scopes.push_scope();
            self.declare_imports(root);
            for child in root.children() {
                self.top_level(&child);
            }
            self.scopes.pop_scope();
            debug_assert_eq!(self.scopes.depth(), 1, "unbalanced scopes in {:?}", file);
        }

        self.table
    }

    // ── Declaring ──────────────────────────────────────────────────────

    fn declare_package(&mut self, root: &SyntaxNode) {
        let Some(file) = SourceFile::cast(root.clone()) else {
            return;
        };
        for decl in file.decls() {
            match decl {
                AstDecl::Type(decl) => {
                    for spec in decl.specs() {
                        if let Some(name) = spec.name() {
                            self.declare_in_package(name.text(), DeclKind::Type, spec.syntax());
                        }
                    }
                }
                AstDecl::Var(decl) => {
                    for spec in decl.specs() {
                        for name in spec.names() {
                            self.declare_in_package(name.text(), DeclKind::Var, name.syntax());
                        }
                    }
                }
                AstDecl::Const(decl) => {
                    for spec in decl.specs() {
                        for name in spec.names() {
                            self.declare_in_package(name.text(), DeclKind::Const, name.syntax());
                        }
                    }
                }
                // Methods and `init` do not enter the package scope.
                AstDecl::Func(func) => {
                    if func.receiver().is_some() {
                        continue;
                    }
                    if let Some(name) = func.name().filter(|n| n.text() != "init") {
                        self.declare_in_package(name.text(), DeclKind::Func, name.syntax());
                    }
                }
                AstDecl::Import(_) => {}
            }
        }
    }

    fn declare_imports(&mut self, root: &SyntaxNode) {
        let Some(file) = SourceFile::cast(root.clone()) else {
            return;
        };
        for spec in file.imports() {
            if let Some(name) = spec.local_name() {
                self.declare(name, DeclKind::Import, spec.syntax());
            }
        }
    }

    fn new_decl(&mut self, name: &str, kind: DeclKind, node: &SyntaxNode) -> crate::DeclId {
        self.table.add_decl(Decl {
            name: name.to_string(),
            kind,
            file: self.file,
            node: node.clone(),
        })
    }

    fn declare_in_package(&mut self, name: String, kind: DeclKind, node: &SyntaxNode) {
        if name == "_" {
            return;
        }
        let id = self.new_decl(&name, kind, node);
        self.scopes.insert_package(name, id);
    }

    /// Bind `name` in the innermost scope. `_` is never declared.
    fn declare(&mut self, name: String, kind: DeclKind, node: &SyntaxNode) {
        if name.is_empty() || name == "_" {
            return;
        }
        let id = self.new_decl(&name, kind, node);
        self.scopes.insert(name, id);
    }

    fn declare_names(&mut self, parent: &SyntaxNode, kind: DeclKind) {
        for name in parent.children().filter_map(Name::cast) {
            self.declare(name.text(), kind, name.syntax());
        }
    }

    /// `a, b := ...`: names already declared in the innermost scope are
    /// reused, the rest are new variables.
    fn define_short_vars(&mut self, lhs: Vec<Expr>) {
        for expr in lhs {
            let Expr::NameRef(name_ref) = expr else {
                self.walk(expr.syntax());
                continue;
            };
            let name = name_ref.text();
            match self.scopes.lookup_local(&name) {
                Some(id) => self.table.bind(self.file, name_ref.syntax().text_range(), id),
                None => self.declare(name, DeclKind::Var, name_ref.syntax()),
            }
        }
    }

    // ── Top level ──────────────────────────────────────────────────────

    fn top_level(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::TYPE_DECL => {
                for spec in node.children() {
                    self.type_spec_body(&spec);
                }
            }
            SyntaxKind::VAR_DECL | SyntaxKind::CONST_DECL => {
                for spec in node.children() {
                    self.walk_except_names(&spec);
                }
            }
            SyntaxKind::FUNC_DECL => self.func_decl(node),
            _ => {}
        }
    }

    /// Type parameters and the declared type of a TYPE_SPEC whose name is
    /// already in scope.
    fn type_spec_body(&mut self, spec: &SyntaxNode) {
        self.scopes.push_scope();
        if let Some(params) = spec.children().find(|n| n.kind() == SyntaxKind::TYPE_PARAM_LIST) {
            self.type_params(&params);
        }
        for child in spec.children() {
            if !matches!(child.kind(), SyntaxKind::NAME | SyntaxKind::TYPE_PARAM_LIST) {
                self.walk(&child);
            }
        }
        self.scopes.pop_scope();
    }

    /// Declare every type parameter, then resolve the constraints.
    fn type_params(&mut self, list: &SyntaxNode) {
        for param in list.children() {
            self.declare_names(&param, DeclKind::Type);
        }
        for param in list.children() {
            self.walk_except_names(&param);
        }
    }

    fn func_decl(&mut self, node: &SyntaxNode) {
        let Some(func) = FuncDecl::cast(node.clone()) else {
            return;
        };
        self.scopes.push_scope();
        if let Some(receiver) = func.receiver() {
            self.receiver_type_params(receiver.syntax());
        }
        if let Some(params) = func.type_params() {
            self.type_params(params.syntax());
        }
        let lists: Vec<SyntaxNode> = node
            .children()
            .filter(|n| matches!(n.kind(), SyntaxKind::RECEIVER | SyntaxKind::PARAM_LIST | SyntaxKind::RESULT))
            .collect();
        self.signature(&lists);
        if let Some(body) = func.body() {
            self.walk_children(body.syntax());
        }
        self.scopes.pop_scope();
    }

    /// `func (l *List[K, V])` names the receiver type's parameters `K` and
    /// `V` for the whole method.
    fn receiver_type_params(&mut self, receiver: &SyntaxNode) {
        let Some(generic) = receiver
            .descendants()
            .find(|n| n.kind() == SyntaxKind::INDEX_EXPR)
        else {
            return;
        };
        for param in generic.children().skip(1).filter_map(NameRef::cast) {
            self.declare(param.text(), DeclKind::Type, param.syntax());
        }
    }

    /// Resolve parameter types, then declare parameter names in the current
    /// scope. `lists` holds RECEIVER, PARAM_LIST and RESULT nodes.
    fn signature(&mut self, lists: &[SyntaxNode]) {
        let params: Vec<SyntaxNode> = lists
            .iter()
            .flat_map(|list| {
                if list.kind() == SyntaxKind::RESULT {
                    list.children()
                        .filter(|n| n.kind() == SyntaxKind::PARAM_LIST)
                        .flat_map(|l| l.children().collect::<Vec<_>>())
                        .collect::<Vec<_>>()
                } else {
                    list.children().collect()
                }
            })
            .collect();

        // A RESULT holding a bare type has no PARAM children.
        for list in lists.iter().filter(|l| l.kind() == SyntaxKind::RESULT) {
            for child in list.children().filter(|n| n.kind() != SyntaxKind::PARAM_LIST) {
                self.walk(&child);
            }
        }
        for param in &params {
            self.walk_except_names(param);
        }
        for param in &params {
            self.declare_names(param, DeclKind::Param);
        }
    }

    // ── Walking ────────────────────────────────────────────────────────

    fn walk(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::NAME_REF => self.bind_use(node),
            SyntaxKind::NAME => {}

            // Literal keys may be field names; only non-identifier keys
            // are expressions to resolve.
            SyntaxKind::KEYED_ELEMENT => {
                let mut children = node.children();
                if let Some(key) = children.next() {
                    if key.kind() != SyntaxKind::NAME_REF {
                        self.walk(&key);
                    }
                }
                for value in children {
                    self.walk(&value);
                }
            }

            SyntaxKind::BLOCK
            | SyntaxKind::IF_STMT
            | SyntaxKind::FOR_STMT
            | SyntaxKind::SWITCH_STMT
            | SyntaxKind::SELECT_STMT
            | SyntaxKind::CASE_CLAUSE
            | SyntaxKind::COMM_CLAUSE => {
                self.scopes.push_scope();
                self.walk_children(node);
                self.scopes.pop_scope();
            }

            SyntaxKind::FUNC_LIT => {
                self.scopes.push_scope();
                let lists: Vec<SyntaxNode> = node
                    .children()
                    .filter(|n| matches!(n.kind(), SyntaxKind::PARAM_LIST | SyntaxKind::RESULT))
                    .collect();
                self.signature(&lists);
                if let Some(body) = node.children().find(|n| n.kind() == SyntaxKind::BLOCK) {
                    self.walk_children(&body);
                }
                self.scopes.pop_scope();
            }

            // Local type: the name is visible inside its own definition.
            SyntaxKind::TYPE_SPEC => {
                if let Some(name) = node.children().find_map(Name::cast) {
                    self.declare(name.text(), DeclKind::Type, node);
                }
                self.type_spec_body(node);
            }

            // Local var/const: names are visible after the spec.
            SyntaxKind::VAR_SPEC | SyntaxKind::CONST_SPEC => {
                self.walk_except_names(node);
                let kind = if node.kind() == SyntaxKind::VAR_SPEC {
                    DeclKind::Var
                } else {
                    DeclKind::Const
                };
                self.declare_names(node, kind);
            }

            SyntaxKind::ASSIGN_STMT => match AssignStmt::cast(node.clone()) {
                Some(assign) if assign.is_define() => {
                    for rhs in assign.rhs() {
                        self.walk(rhs.syntax());
                    }
                    self.define_short_vars(assign.lhs());
                }
                _ => self.walk_children(node),
            },

            SyntaxKind::RANGE_CLAUSE => match RangeClause::cast(node.clone()) {
                Some(range) if range.is_define() => {
                    if let Some(source) = range.source() {
                        self.walk(source.syntax());
                    }
                    self.define_short_vars(range.lhs());
                }
                _ => self.walk_children(node),
            },

            _ => self.walk_children(node),
        }
    }

    fn walk_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.walk(&child);
        }
    }

    fn walk_except_names(&mut self, node: &SyntaxNode) {
        for child in node.children().filter(|n| n.kind() != SyntaxKind::NAME) {
            self.walk(&child);
        }
    }

    fn bind_use(&mut self, node: &SyntaxNode) {
        let Some(name_ref) = NameRef::cast(node.clone()) else {
            return;
        };
        if let Some(id) = self.scopes.lookup(&name_ref.text()) {
            self.table.bind(self.file, node.text_range(), id);
        }
    }
}
