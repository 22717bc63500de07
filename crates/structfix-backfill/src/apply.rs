//! Splicing collected types into a mutable copy of the tree.

use rowan::TextRange;
use rustc_hash::FxHashMap;
use structfix_parser::ast::AstNode;
use structfix_parser::{SyntaxKind, SyntaxNode};

use crate::collect::type_slot;
use crate::Rewrite;

/// Apply `rewrites` to a mutable clone of `root` and return the clone.
///
/// Rewrite ranges refer to `root`; every target is located before the
/// first splice, so offsets shifted by earlier insertions do not matter.
pub(crate) fn apply(root: &SyntaxNode, rewrites: &[Rewrite]) -> SyntaxNode {
    let root = root.clone_for_update();

    let literals: FxHashMap<TextRange, SyntaxNode> = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::COMPOSITE_LIT)
        .map(|node| (node.text_range(), node))
        .collect();

    let targets: Vec<(SyntaxNode, &Rewrite)> = rewrites
        .iter()
        .filter_map(|rewrite| {
            let literal = literals.get(&rewrite.literal);
            if literal.is_none() {
                tracing::warn!(literal = ?rewrite.literal, "rewrite target not found");
            }
            literal.map(|node| (node.clone(), rewrite))
        })
        .collect();

    for (literal, rewrite) in targets {
        let ty = rewrite.record.syntax().clone_subtree().clone_for_update();
        // An existing type is replaced; an elided one is inserted up front.
        let replaced = match type_slot(&literal) {
            Some(existing) => {
                let index = existing.index();
                index..index + 1
            }
            None => 0..0,
        };
        literal.splice_children(replaced, vec![ty.into()]);
    }

    root
}
