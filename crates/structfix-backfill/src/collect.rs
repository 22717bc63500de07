//! The read-only walk that decides which literals get a type.

use rowan::TextRange;
use structfix_common::span::Span;
use structfix_parser::ast::expr::{CompositeLit, Element, Expr, KeyedElement, NameRef};
use structfix_parser::ast::item::TypeSpec;
use structfix_parser::ast::ty::{StructType, Type};
use structfix_parser::ast::AstNode;
use structfix_parser::{SyntaxKind, SyntaxNode};
use structfix_resolve::{BindingTable, DeclKind, FileId};

use crate::{BackfillError, Rewrite};

pub(crate) struct Collector<'a> {
    file: FileId,
    bindings: &'a BindingTable,
    rewrites: Vec<Rewrite>,
}

impl<'a> Collector<'a> {
    pub(crate) fn new(file: FileId, bindings: &'a BindingTable) -> Self {
        Collector {
            file,
            bindings,
            rewrites: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<Rewrite> {
        self.rewrites
    }

    /// Visit `node`. Literals whose type names a struct are matched against
    /// that struct's fields; everything else is searched for such literals.
    pub(crate) fn walk(&mut self, node: &SyntaxNode) -> Result<(), BackfillError> {
        if let Some(literal) = CompositeLit::cast(node.clone()) {
            if let Some(record) = self.literal_record(&literal) {
                return self.visit_resolved(&literal, &record);
            }
        }
        self.walk_children(node)
    }

    fn walk_children(&mut self, node: &SyntaxNode) -> Result<(), BackfillError> {
        for child in node.children() {
            self.walk(&child)?;
        }
        Ok(())
    }

    /// Visit the elements of `literal`, whose fields are those of `record`.
    fn visit_resolved(
        &mut self,
        literal: &CompositeLit,
        record: &StructType,
    ) -> Result<(), BackfillError> {
        let Some(value) = literal.literal_value() else {
            return Ok(());
        };
        for element in value.elements() {
            match element {
                Element::Positional(expr) => self.walk(expr.syntax())?,
                Element::Keyed(keyed) => self.visit_keyed(&keyed, record)?,
            }
        }
        Ok(())
    }

    fn visit_keyed(
        &mut self,
        keyed: &KeyedElement,
        record: &StructType,
    ) -> Result<(), BackfillError> {
        let key = match keyed.key() {
            Some(Expr::NameRef(key)) => key,
            Some(other) => return Err(non_identifier_key(other.syntax())),
            None => return self.walk_children(keyed.syntax()),
        };
        let Some(value) = keyed.value() else {
            return Ok(());
        };

        let inline = record
            .field_named(&key.text())
            .and_then(|field| match field.ty() {
                Some(Type::Struct(field_record)) => Some(field_record),
                _ => None,
            });

        match (inline, value) {
            (Some(field_record), Expr::CompositeLit(inner)) => {
                if needs_type(&inner, &field_record) {
                    self.record_rewrite(&inner, &field_record);
                }
                self.visit_resolved(&inner, &field_record)
            }
            (_, value) => self.walk(value.syntax()),
        }
    }

    fn record_rewrite(&mut self, literal: &CompositeLit, record: &StructType) {
        let range = literal.syntax().text_range();
        tracing::trace!(
            file = self.file.0,
            literal = ?range,
            ty = %record.syntax(),
            "backfilling struct type"
        );
        self.rewrites.push(Rewrite {
            literal: range,
            record: record.clone(),
        });
    }

    // ── Type lookup ────────────────────────────────────────────────────

    /// The struct a literal's type denotes, if its type is a plain name.
    fn literal_record(&self, literal: &CompositeLit) -> Option<StructType> {
        let Some(Type::Name(name)) = literal.ty() else {
            return None;
        };
        let mut seen = Vec::new();
        self.named_record(self.file, &name, &mut seen)
    }

    /// Follow `name`, used in `file`, through type declarations to a struct.
    /// `seen` holds the declarations already visited.
    fn named_record(
        &self,
        file: FileId,
        name: &NameRef,
        seen: &mut Vec<(FileId, TextRange)>,
    ) -> Option<StructType> {
        let decl = self.bindings.resolve(file, name)?;
        if decl.kind != DeclKind::Type {
            return None;
        }
        let spec = TypeSpec::cast(decl.node.clone())?;

        let key = (decl.file, spec.syntax().text_range());
        if seen.contains(&key) {
            return None;
        }
        seen.push(key);

        self.underlying(decl.file, spec.ty()?, seen)
    }

    fn underlying(
        &self,
        file: FileId,
        ty: Type,
        seen: &mut Vec<(FileId, TextRange)>,
    ) -> Option<StructType> {
        match ty {
            Type::Struct(record) => Some(record),
            Type::Paren(paren) => self.underlying(file, paren.inner()?, seen),
            Type::Name(name) => self.named_record(file, &name, seen),
            _ => None,
        }
    }
}

/// The node spelling a literal's type: a name, a qualified or instantiated
/// name, or a type literal. `None` when the type is elided.
pub(crate) fn type_slot(literal: &SyntaxNode) -> Option<SyntaxNode> {
    literal
        .children()
        .take_while(|node| node.kind() != SyntaxKind::LITERAL_VALUE)
        .next()
}

/// Whatever type the value spells is replaced, unless it is already the
/// field's own text.
fn needs_type(literal: &CompositeLit, record: &StructType) -> bool {
    match type_slot(literal.syntax()) {
        None => true,
        Some(existing) => existing.to_string() != record.syntax().to_string(),
    }
}

fn non_identifier_key(key: &SyntaxNode) -> BackfillError {
    let range = key.text_range();
    BackfillError::NonIdentifierKey {
        key: key.to_string(),
        span: Span::new(range.start().into(), range.end().into()),
    }
}
