//! Event-based parser for Go.
//!
//! The parser consumes the lexer's token stream and records a flat list of
//! events (Open/Close/Advance) which [`Parser::build_tree`] later turns into
//! a rowan green tree, following matklad's event-based approach as in
//! rust-analyzer. `open_before()` wraps an already completed node (turning
//! `f` into `f(x)`) through a "forward parent" link instead of inserting
//! into the event list.
//!
//! # Trivia
//!
//! Whitespace and comments are never seen by lookahead. They are attached
//! lazily: `open()` and `advance()` first flush pending trivia into whatever
//! node is currently open, so every node starts at a significant token and
//! leading comments stay with the enclosing node. This keeps composite
//! literals tight around their `{`, which is where the backfill inserts types.
//!
//! # Newlines
//!
//! The lexer has already applied Go's semicolon rule, so a `NEWLINE` token
//! is always a statement terminator. Lookahead reports it as `SEMICOLON`.

pub(crate) mod expressions;
pub(crate) mod items;
pub(crate) mod statements;
pub(crate) mod types;

use structfix_common::span::Span;
use structfix_common::token::Token;

use crate::error::ParseError;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug)]
enum Event {
    /// Start a node. `kind` stays TOMBSTONE until `close()` patches it.
    Open {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    Close,
    /// Consume one token, trivia included.
    Advance,
}

/// A started but not yet closed node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

/// A completed node, usable with `open_before()` and `retag()`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkClosed {
    index: usize,
}

pub(crate) struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    source: &'src str,
    /// Whether `Name {` may start a composite literal here. Cleared in
    /// `if`/`for`/`switch` headers, restored inside any bracket pair.
    composite_allowed: bool,
    errors: Vec<ParseError>,
    /// First-error-only: once set, parse functions bail out.
    has_error: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            source,
            composite_allowed: true,
            errors: Vec::new(),
            has_error: false,
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the Nth significant token ahead, with `NEWLINE` reported as
    /// `SEMICOLON` and `EOF` past the end.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        let mut pos = self.pos;
        let mut remaining = n;
        while pos < self.tokens.len() {
            let token_kind = &self.tokens[pos].kind;
            if token_kind.is_trivia() {
                pos += 1;
                continue;
            }
            if remaining == 0 {
                return match SyntaxKind::from(token_kind.clone()) {
                    SyntaxKind::NEWLINE => SyntaxKind::SEMICOLON,
                    kind => kind,
                };
            }
            remaining -= 1;
            pos += 1;
        }
        SyntaxKind::EOF
    }

    /// Kind of the token right after the bracket group that opens at the
    /// Nth significant token. Used to tell `a [N]T` from `T[int]`.
    pub(crate) fn nth_after_group(&self, n: usize) -> SyntaxKind {
        let mut depth = 0usize;
        let mut k = n;
        loop {
            match self.nth(k) {
                SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.nth(k + 1);
                    }
                }
                SyntaxKind::EOF => return SyntaxKind::EOF,
                _ => {}
            }
            k += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn current_text(&self) -> &str {
        let pos = self.skip_trivia_from(self.pos);
        match self.tokens.get(pos) {
            Some(token) => &self.source[token.span.start as usize..token.span.end as usize],
            None => "",
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        let pos = self.skip_trivia_from(self.pos);
        match self.tokens.get(pos) {
            Some(token) => token.span,
            None => Span::empty(self.source.len() as u32),
        }
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    pub(crate) fn composite_allowed(&self) -> bool {
        self.composite_allowed
    }

    /// Run `f` with composite literals after bare names enabled or disabled.
    pub(crate) fn with_composite<T>(&mut self, allowed: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.composite_allowed, allowed);
        let result = f(self);
        self.composite_allowed = saved;
        result
    }

    // ── Mutation: node management ──────────────────────────────────────

    /// Start a new node at the next significant token.
    pub(crate) fn open(&mut self) -> MarkOpened {
        // The root is opened before anything else; trivia can't precede it.
        if !self.events.is_empty() {
            self.eat_trivia();
        }
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        mark
    }

    /// Start a new node that will become the parent of `completed`.
    pub(crate) fn open_before(&mut self, completed: MarkClosed) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        if let Event::Open { forward_parent, .. } = &mut self.events[completed.index] {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    pub(crate) fn close(&mut self, m: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        if let Event::Open {
            kind: slot_kind, ..
        } = &mut self.events[m.index]
        {
            *slot_kind = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: m.index }
    }

    /// Change the kind of a completed node, e.g. a parameter that parsed as
    /// a type name but turned out to be a parameter name.
    pub(crate) fn retag(&mut self, m: MarkClosed, kind: SyntaxKind) {
        if let Event::Open {
            kind: slot_kind, ..
        } = &mut self.events[m.index]
        {
            *slot_kind = kind;
        }
    }

    /// Kind a completed node was closed with.
    pub(crate) fn closed_kind(&self, m: MarkClosed) -> SyntaxKind {
        match self.events[m.index] {
            Event::Open { kind, .. } => kind,
            _ => SyntaxKind::TOMBSTONE,
        }
    }

    // ── Mutation: token consumption ────────────────────────────────────

    /// Consume pending trivia and then the current significant token.
    pub(crate) fn advance(&mut self) {
        self.eat_trivia();
        if self.pos < self.tokens.len() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    /// Consume the current token wrapped in an ERROR_NODE.
    pub(crate) fn advance_with_error(&mut self, message: &str) {
        let m = self.open();
        self.error(message);
        self.advance();
        self.close(m, SyntaxKind::ERROR_NODE);
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            self.error(&format!("expected {}", kind.describe()));
            false
        }
    }

    /// Like `expect`, pointing back at where the group was opened.
    pub(crate) fn expect_closing(&mut self, kind: SyntaxKind, opened_at: Span, what: &str) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else if self.has_error {
            false
        } else {
            self.error_with_related(
                &format!("expected {}", kind.describe()),
                opened_at,
                &format!("{what} starts here"),
            );
            false
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Statement terminator. It may be omitted before a closing `)` or `}`.
    pub(crate) fn expect_semi(&mut self) {
        if self.eat(SyntaxKind::SEMICOLON) {
            return;
        }
        if !self.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            self.error("expected `;` or newline");
        }
    }

    // ── Error reporting ────────────────────────────────────────────────

    /// Record an error at the current token. Only the first one is kept.
    pub(crate) fn error(&mut self, message: &str) {
        if self.has_error {
            return;
        }
        let span = self.current_span();
        let message = if self.at(SyntaxKind::ERROR) {
            "invalid or unterminated token"
        } else {
            message
        };
        self.errors.push(ParseError::new(message, span));
        self.has_error = true;
    }

    pub(crate) fn error_with_related(&mut self, message: &str, related_span: Span, related_msg: &str) {
        if self.has_error {
            return;
        }
        let span = self.current_span();
        self.errors
            .push(ParseError::with_related(message, span, related_msg, related_span));
        self.has_error = true;
    }

    pub(crate) fn has_error(&self) -> bool {
        self.has_error
    }

    // ── Trivia ─────────────────────────────────────────────────────────

    fn eat_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    fn skip_trivia_from(&self, mut pos: usize) -> usize {
        while pos < self.tokens.len() && self.tokens[pos].kind.is_trivia() {
            pos += 1;
        }
        pos
    }

    // ── Tree building ──────────────────────────────────────────────────

    /// Convert the events into a green tree, consuming the parser.
    ///
    /// An Open event with a forward parent starts its whole wrapper chain,
    /// outermost first; the wrappers' own Open events are then tombstoned
    /// so they are skipped when reached.
    pub(crate) fn build_tree(mut self) -> (rowan::GreenNode, Vec<ParseError>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut token_pos: usize = 0;
        let mut chain: Vec<SyntaxKind> = Vec::new();

        for i in 0..self.events.len() {
            match self.events[i] {
                Event::Open {
                    kind,
                    forward_parent: None,
                } => {
                    if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(rowan::SyntaxKind(kind as u16));
                    }
                }
                Event::Open {
                    kind,
                    forward_parent: Some(first_parent),
                } => {
                    chain.clear();
                    chain.push(kind);
                    let mut next = Some(first_parent);
                    while let Some(idx) = next {
                        next = match &mut self.events[idx] {
                            Event::Open {
                                kind,
                                forward_parent,
                            } => {
                                chain.push(*kind);
                                *kind = SyntaxKind::TOMBSTONE;
                                forward_parent.take()
                            }
                            _ => None,
                        };
                    }
                    for &kind in chain.iter().rev() {
                        if kind != SyntaxKind::TOMBSTONE {
                            builder.start_node(rowan::SyntaxKind(kind as u16));
                        }
                    }
                }
                Event::Close => builder.finish_node(),
                Event::Advance => {
                    if let Some(token) = self.tokens.get(token_pos) {
                        let kind = SyntaxKind::from(token.kind.clone());
                        let text = &self.source[token.span.start as usize..token.span.end as usize];
                        builder.token(rowan::SyntaxKind(kind as u16), text);
                        token_pos += 1;
                    }
                }
            }
        }

        (builder.finish(), self.errors)
    }
}

// ── Top-level parsing ──────────────────────────────────────────────────

/// Parse a complete source file: package clause, then declarations.
///
/// After the first error the rest of the input is swallowed into the root
/// so the tree still covers every byte.
pub(crate) fn parse_source_file(p: &mut Parser) {
    let root = p.open();

    items::package_clause(p);
    if !p.has_error() {
        p.expect_semi();
    }

    loop {
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.has_error() || p.at(SyntaxKind::EOF) {
            break;
        }
        items::top_level_decl(p);
        if p.has_error() {
            break;
        }
        p.expect_semi();
    }

    while !p.at(SyntaxKind::EOF) {
        p.advance();
    }
    p.advance(); // EOF

    p.close(root, SyntaxKind::SOURCE_FILE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use structfix_lexer::Lexer;

    #[test]
    fn newline_is_seen_as_semicolon() {
        let source = "x\ny";
        let parser = Parser::new(Lexer::tokenize(source), source);
        assert_eq!(parser.current(), SyntaxKind::IDENT);
        assert_eq!(parser.nth(1), SyntaxKind::SEMICOLON);
        assert_eq!(parser.nth(2), SyntaxKind::IDENT);
        assert_eq!(parser.nth(3), SyntaxKind::EOF);
    }

    #[test]
    fn comments_are_skipped_by_lookahead() {
        let source = "x /* c */ + // d\ny";
        let parser = Parser::new(Lexer::tokenize(source), source);
        assert_eq!(parser.nth(1), SyntaxKind::PLUS);
        assert_eq!(parser.nth(2), SyntaxKind::IDENT);
        assert_eq!(parser.current_text(), "x");
    }

    #[test]
    fn nth_after_group_skips_nested_brackets() {
        let source = "a [N]int";
        let parser = Parser::new(Lexer::tokenize(source), source);
        assert_eq!(parser.nth_after_group(1), SyntaxKind::IDENT);

        let source = "T[map[K]V])";
        let parser = Parser::new(Lexer::tokenize(source), source);
        assert_eq!(parser.nth_after_group(1), SyntaxKind::R_PAREN);
    }

    #[test]
    fn open_flushes_leading_trivia_into_parent() {
        let source = "  f(42)";
        let mut parser = Parser::new(Lexer::tokenize(source), source);

        let root = parser.open();
        let name = parser.open();
        parser.advance(); // f
        let name_closed = parser.close(name, SyntaxKind::NAME_REF);
        let call = parser.open_before(name_closed);
        parser.advance(); // (
        parser.advance(); // 42
        parser.advance(); // )
        parser.close(call, SyntaxKind::CALL_EXPR);
        parser.advance(); // EOF
        parser.close(root, SyntaxKind::SOURCE_FILE);

        let (green, errors) = parser.build_tree();
        assert!(errors.is_empty());

        let root_node = crate::cst::SyntaxNode::new_root(green);
        assert_eq!(root_node.text().to_string(), source);
        let call_node = root_node.first_child().unwrap();
        assert_eq!(call_node.kind(), SyntaxKind::CALL_EXPR);
        assert_eq!(call_node.text().to_string(), "f(42)");
        assert_eq!(call_node.first_child().unwrap().kind(), SyntaxKind::NAME_REF);
    }

    #[test]
    fn retag_changes_closed_kind() {
        let source = "a";
        let mut parser = Parser::new(Lexer::tokenize(source), source);
        let root = parser.open();
        let m = parser.open();
        parser.advance();
        let closed = parser.close(m, SyntaxKind::NAME_REF);
        assert_eq!(parser.closed_kind(closed), SyntaxKind::NAME_REF);
        parser.retag(closed, SyntaxKind::NAME);
        assert_eq!(parser.closed_kind(closed), SyntaxKind::NAME);
        parser.advance();
        parser.close(root, SyntaxKind::SOURCE_FILE);

        let (green, _) = parser.build_tree();
        let root_node = crate::cst::SyntaxNode::new_root(green);
        assert_eq!(root_node.first_child().unwrap().kind(), SyntaxKind::NAME);
    }

    #[test]
    fn only_first_error_is_kept() {
        let source = "x";
        let mut parser = Parser::new(Lexer::tokenize(source), source);
        let root = parser.open();
        assert!(!parser.expect(SyntaxKind::L_BRACE));
        assert!(!parser.expect(SyntaxKind::R_BRACE));
        assert!(parser.has_error());
        parser.advance();
        parser.advance();
        parser.close(root, SyntaxKind::SOURCE_FILE);
        let (_green, errors) = parser.build_tree();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "expected `{`");
    }
}
