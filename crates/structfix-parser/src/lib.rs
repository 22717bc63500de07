//! Lossless Go parser producing a rowan-based CST.
//!
//! This crate turns the token stream from `structfix-lexer` into a concrete
//! syntax tree that keeps every byte of the input, whitespace and comments
//! included, so printing the root reproduces the source exactly. The typed
//! wrappers in [`ast`] sit on top of the CST.

pub mod ast;
pub mod cst;
pub mod error;
mod parser;
pub mod syntax_kind;

pub use cst::{SyntaxElement, SyntaxNode, SyntaxToken};
pub use error::ParseError;
pub use syntax_kind::SyntaxKind;

use structfix_lexer::Lexer;

/// Result of parsing a Go source file.
///
/// Contains the green tree (the immutable, cheap-to-clone CST) and any
/// parse errors encountered. With the first-error-only strategy, `errors`
/// holds at most one error.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    /// Build the syntax tree root from the green node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The root as a typed [`ast::item::SourceFile`].
    pub fn tree(&self) -> Option<ast::item::SourceFile> {
        ast::AstNode::cast(self.syntax())
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Whether parsing completed without errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a Go source file into a CST.
///
/// The tree always covers the whole input; after a syntax error the
/// remaining tokens are attached to the root.
pub fn parse(source: &str) -> Parse {
    let tokens = Lexer::tokenize(source);
    let mut p = parser::Parser::new(tokens, source);
    parser::parse_source_file(&mut p);
    let (green, errors) = p.build_tree();
    tracing::debug!(bytes = source.len(), errors = errors.len(), "parsed source file");
    Parse { green, errors }
}

/// Indented `KIND@start..end` dump of a tree, tokens shown with their text.
pub fn debug_tree(node: &SyntaxNode) -> String {
    format!("{node:#?}")
}
