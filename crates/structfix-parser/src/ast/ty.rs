//! Typed AST nodes for type expressions.

use crate::ast::expr::{IndexExpr, NameRef, SelectorExpr};
use crate::ast::item::Name;
use crate::ast::{ast_node, child_nodes, child_token, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

/// Any type expression.
///
/// Named types share their node kinds with expressions: `T` is a NAME_REF,
/// `pkg.T` a SELECTOR_EXPR and `T[int]` an INDEX_EXPR.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Name(NameRef),
    Qualified(SelectorExpr),
    Generic(IndexExpr),
    Struct(StructType),
    Pointer(PointerType),
    Array(ArrayType),
    Slice(SliceType),
    Map(MapType),
    Chan(ChanType),
    Func(FuncType),
    Interface(InterfaceType),
    Union(UnionType),
    Tilde(TildeType),
    Paren(ParenType),
}

impl Type {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let ty = match node.kind() {
            SyntaxKind::NAME_REF => Type::Name(NameRef { syntax: node }),
            SyntaxKind::SELECTOR_EXPR => Type::Qualified(SelectorExpr { syntax: node }),
            SyntaxKind::INDEX_EXPR => Type::Generic(IndexExpr { syntax: node }),
            SyntaxKind::STRUCT_TYPE => Type::Struct(StructType { syntax: node }),
            SyntaxKind::POINTER_TYPE => Type::Pointer(PointerType { syntax: node }),
            SyntaxKind::ARRAY_TYPE => Type::Array(ArrayType { syntax: node }),
            SyntaxKind::SLICE_TYPE => Type::Slice(SliceType { syntax: node }),
            SyntaxKind::MAP_TYPE => Type::Map(MapType { syntax: node }),
            SyntaxKind::CHAN_TYPE => Type::Chan(ChanType { syntax: node }),
            SyntaxKind::FUNC_TYPE => Type::Func(FuncType { syntax: node }),
            SyntaxKind::INTERFACE_TYPE => Type::Interface(InterfaceType { syntax: node }),
            SyntaxKind::UNION_TYPE => Type::Union(UnionType { syntax: node }),
            SyntaxKind::TILDE_TYPE => Type::Tilde(TildeType { syntax: node }),
            SyntaxKind::PAREN_TYPE => Type::Paren(ParenType { syntax: node }),
            _ => return None,
        };
        Some(ty)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Type::Name(it) => it.syntax(),
            Type::Qualified(it) => it.syntax(),
            Type::Generic(it) => it.syntax(),
            Type::Struct(it) => it.syntax(),
            Type::Pointer(it) => it.syntax(),
            Type::Array(it) => it.syntax(),
            Type::Slice(it) => it.syntax(),
            Type::Map(it) => it.syntax(),
            Type::Chan(it) => it.syntax(),
            Type::Func(it) => it.syntax(),
            Type::Interface(it) => it.syntax(),
            Type::Union(it) => it.syntax(),
            Type::Tilde(it) => it.syntax(),
            Type::Paren(it) => it.syntax(),
        }
    }
}

// ── Struct types ─────────────────────────────────────────────────────────

ast_node!(StructType, STRUCT_TYPE);

impl StructType {
    /// Field declarations in source order.
    pub fn fields(&self) -> impl Iterator<Item = FieldDecl> + '_ {
        child_nodes(&self.syntax)
    }

    /// First field declaring `name`. Embedded fields never match.
    pub fn field_named(&self, name: &str) -> Option<FieldDecl> {
        self.fields()
            .find(|field| field.names().any(|n| n.text() == name))
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    /// Declared field names; empty for an embedded field.
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn is_embedded(&self) -> bool {
        self.names().next().is_none()
    }

    pub fn ty(&self) -> Option<Type> {
        self.syntax
            .children()
            .filter(|n| n.kind() != SyntaxKind::NAME)
            .find_map(Type::cast)
    }

    pub fn tag(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::STRING_LITERAL)
            .or_else(|| child_token(&self.syntax, SyntaxKind::RAW_STRING_LITERAL))
    }
}

// ── Other type literals ──────────────────────────────────────────────────

ast_node!(PointerType, POINTER_TYPE);
ast_node!(ArrayType, ARRAY_TYPE);
ast_node!(SliceType, SLICE_TYPE);
ast_node!(MapType, MAP_TYPE);
ast_node!(ChanType, CHAN_TYPE);
ast_node!(FuncType, FUNC_TYPE);
ast_node!(InterfaceType, INTERFACE_TYPE);
ast_node!(UnionType, UNION_TYPE);
ast_node!(TildeType, TILDE_TYPE);
ast_node!(ParenType, PAREN_TYPE);

impl ParenType {
    pub fn inner(&self) -> Option<Type> {
        self.syntax.children().find_map(Type::cast)
    }
}
