//! Typed AST nodes for expressions, composite literals and the statements
//! that introduce local names.

use crate::ast::ty::Type;
use crate::ast::{ast_node, child_node, child_token, ident_text, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// ── Expr enum ────────────────────────────────────────────────────────────

/// Any expression.
///
/// Type literals in expression position (conversions such as `[]byte(s)`,
/// `make` arguments) are carried as [`Expr::Type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    NameRef(NameRef),
    Paren(ParenExpr),
    Selector(SelectorExpr),
    Index(IndexExpr),
    Slice(SliceExpr),
    TypeAssert(TypeAssertExpr),
    Call(CallExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    CompositeLit(CompositeLit),
    FuncLit(FuncLit),
    Type(Type),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let expr = match node.kind() {
            SyntaxKind::LITERAL => Expr::Literal(Literal { syntax: node }),
            SyntaxKind::NAME_REF => Expr::NameRef(NameRef { syntax: node }),
            SyntaxKind::PAREN_EXPR => Expr::Paren(ParenExpr { syntax: node }),
            SyntaxKind::SELECTOR_EXPR => Expr::Selector(SelectorExpr { syntax: node }),
            SyntaxKind::INDEX_EXPR => Expr::Index(IndexExpr { syntax: node }),
            SyntaxKind::SLICE_EXPR => Expr::Slice(SliceExpr { syntax: node }),
            SyntaxKind::TYPE_ASSERT_EXPR => Expr::TypeAssert(TypeAssertExpr { syntax: node }),
            SyntaxKind::CALL_EXPR => Expr::Call(CallExpr { syntax: node }),
            SyntaxKind::UNARY_EXPR => Expr::Unary(UnaryExpr { syntax: node }),
            SyntaxKind::BINARY_EXPR => Expr::Binary(BinaryExpr { syntax: node }),
            SyntaxKind::COMPOSITE_LIT => Expr::CompositeLit(CompositeLit { syntax: node }),
            SyntaxKind::FUNC_LIT => Expr::FuncLit(FuncLit { syntax: node }),
            _ => return Type::cast(node).map(Expr::Type),
        };
        Some(expr)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Literal(it) => it.syntax(),
            Expr::NameRef(it) => it.syntax(),
            Expr::Paren(it) => it.syntax(),
            Expr::Selector(it) => it.syntax(),
            Expr::Index(it) => it.syntax(),
            Expr::Slice(it) => it.syntax(),
            Expr::TypeAssert(it) => it.syntax(),
            Expr::Call(it) => it.syntax(),
            Expr::Unary(it) => it.syntax(),
            Expr::Binary(it) => it.syntax(),
            Expr::CompositeLit(it) => it.syntax(),
            Expr::FuncLit(it) => it.syntax(),
            Expr::Type(it) => it.syntax(),
        }
    }
}

ast_node!(Literal, LITERAL);
ast_node!(ParenExpr, PAREN_EXPR);
ast_node!(SliceExpr, SLICE_EXPR);
ast_node!(TypeAssertExpr, TYPE_ASSERT_EXPR);
ast_node!(CallExpr, CALL_EXPR);
ast_node!(UnaryExpr, UNARY_EXPR);
ast_node!(BinaryExpr, BINARY_EXPR);
ast_node!(FuncLit, FUNC_LIT);

// ── Names and selectors ──────────────────────────────────────────────────

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn ident(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> String {
        ident_text(&self.syntax).unwrap_or_default()
    }
}

ast_node!(SelectorExpr, SELECTOR_EXPR);

impl SelectorExpr {
    pub fn base(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    /// The selected member; a bare token, never bound to a declaration.
    pub fn member(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }
}

ast_node!(IndexExpr, INDEX_EXPR);

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

// ── Composite literals ───────────────────────────────────────────────────

ast_node!(CompositeLit, COMPOSITE_LIT);

impl CompositeLit {
    /// The literal's type; `None` when elided (`{...}` nested in another
    /// literal).
    pub fn ty(&self) -> Option<Type> {
        self.syntax
            .children()
            .take_while(|n| n.kind() != SyntaxKind::LITERAL_VALUE)
            .find_map(Type::cast)
    }

    pub fn is_elided(&self) -> bool {
        self.ty().is_none()
    }

    pub fn literal_value(&self) -> Option<LiteralValue> {
        child_node(&self.syntax)
    }
}

ast_node!(LiteralValue, LITERAL_VALUE);

impl LiteralValue {
    /// Elements in source order.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.syntax.children().filter_map(Element::cast)
    }
}

/// One entry of a literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    Keyed(KeyedElement),
    Positional(Expr),
}

impl Element {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == SyntaxKind::KEYED_ELEMENT {
            return Some(Element::Keyed(KeyedElement { syntax: node }));
        }
        Expr::cast(node).map(Element::Positional)
    }
}

ast_node!(KeyedElement, KEYED_ELEMENT);

impl KeyedElement {
    pub fn key(&self) -> Option<Expr> {
        self.syntax.children().next().and_then(Expr::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.syntax.children().nth(1).and_then(Expr::cast)
    }
}

// ── Name-introducing statements ──────────────────────────────────────────

ast_node!(AssignStmt, ASSIGN_STMT);

impl AssignStmt {
    /// `a, b := ...`
    pub fn is_define(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::COLON_EQ).is_some()
    }

    /// Left-hand operands, in order.
    pub fn lhs(&self) -> Vec<Expr> {
        operands(self.syntax.children().next())
    }

    pub fn rhs(&self) -> Vec<Expr> {
        operands(self.syntax.children().nth(1))
    }
}

ast_node!(RangeClause, RANGE_CLAUSE);

impl RangeClause {
    pub fn is_define(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::COLON_EQ).is_some()
    }

    /// Iteration variables; empty for `for range x`.
    pub fn lhs(&self) -> Vec<Expr> {
        if child_token(&self.syntax, SyntaxKind::EQ).is_none() && !self.is_define() {
            return Vec::new();
        }
        operands(self.syntax.children().next())
    }

    /// The ranged-over expression.
    pub fn source(&self) -> Option<Expr> {
        self.syntax.children().last().and_then(Expr::cast)
    }
}

/// Flatten one operand slot: an EXPR_LIST or a single expression.
fn operands(node: Option<SyntaxNode>) -> Vec<Expr> {
    match node {
        Some(node) if node.kind() == SyntaxKind::EXPR_LIST => {
            node.children().filter_map(Expr::cast).collect()
        }
        Some(node) => Expr::cast(node).into_iter().collect(),
        None => Vec::new(),
    }
}
