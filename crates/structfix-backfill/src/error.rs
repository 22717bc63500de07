use structfix_common::span::Span;
use thiserror::Error;

/// A literal the traversal cannot handle. Fatal for the file it occurs in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackfillError {
    #[error("key `{key}` of a struct literal is not a field name")]
    NonIdentifierKey { key: String, span: Span },
}

impl BackfillError {
    pub fn span(&self) -> Span {
        match self {
            BackfillError::NonIdentifierKey { span, .. } => *span,
        }
    }
}
