//! Lossless tokenizer for Go source text.
//!
//! Every byte of the input ends up in exactly one token, trivia included.
//! Go's automatic semicolon rule is applied here: a line break that follows
//! a statement-ending token is emitted as [`TokenKind::Newline`], every other
//! line break is plain [`TokenKind::Whitespace`].

mod cursor;

use cursor::Cursor;
use structfix_common::token::{keyword_from_str, Token, TokenKind};

/// The Go lexer. Converts source text into a stream of tokens.
///
/// Implements `Iterator<Item = Token>`; the last item is always `Eof`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    emitted_eof: bool,
    /// A token to emit on the next call to `next()` before resuming normal lexing.
    pending_token: Option<Token>,
    /// Whether a line break at the current position ends a statement.
    insert_semi: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
            pending_token: None,
            insert_semi: false,
        }
    }

    /// Tokenize the entire source, including the final `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn next_token(&mut self) -> Token {
        let start = self.cursor.pos();

        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            // ── Whitespace ───────────────────────────────────────────────
            '\n' if self.insert_semi => self.single_char_token(TokenKind::Newline, start),
            ' ' | '\t' | '\r' | '\n' => self.lex_whitespace(start),

            // ── Single-character delimiters ───────────────────────────────
            '(' => self.single_char_token(TokenKind::LParen, start),
            ')' => self.single_char_token(TokenKind::RParen, start),
            '[' => self.single_char_token(TokenKind::LBracket, start),
            ']' => self.single_char_token(TokenKind::RBracket, start),
            '{' => self.single_char_token(TokenKind::LBrace, start),
            '}' => self.single_char_token(TokenKind::RBrace, start),
            ',' => self.single_char_token(TokenKind::Comma, start),
            ';' => self.single_char_token(TokenKind::Semicolon, start),
            '~' => self.single_char_token(TokenKind::Tilde, start),

            // ── Operators ────────────────────────────────────────────────
            '+' => self.lex_doubled(start, TokenKind::Plus, TokenKind::PlusEq, TokenKind::PlusPlus),
            '-' => self.lex_doubled(start, TokenKind::Minus, TokenKind::MinusEq, TokenKind::MinusMinus),
            '|' => self.lex_doubled(start, TokenKind::Pipe, TokenKind::PipeEq, TokenKind::PipePipe),
            '=' => self.lex_with_eq(start, TokenKind::Eq, TokenKind::EqEq),
            '!' => self.lex_with_eq(start, TokenKind::Bang, TokenKind::NotEq),
            '*' => self.lex_with_eq(start, TokenKind::Star, TokenKind::StarEq),
            '%' => self.lex_with_eq(start, TokenKind::Percent, TokenKind::PercentEq),
            '^' => self.lex_with_eq(start, TokenKind::Caret, TokenKind::CaretEq),
            ':' => self.lex_with_eq(start, TokenKind::Colon, TokenKind::ColonEq),
            '&' => self.lex_amp(start),
            '<' => self.lex_lt(start),
            '>' => self.lex_gt(start),
            '.' => self.lex_dot(start),

            // ── Comments or division ─────────────────────────────────────
            '/' => match self.cursor.peek_nth(1) {
                Some('/') => self.lex_line_comment(start),
                Some('*') => self.lex_block_comment(start),
                _ => self.lex_with_eq(start, TokenKind::Slash, TokenKind::SlashEq),
            },

            // ── Literals ─────────────────────────────────────────────────
            '0'..='9' => self.lex_number(start),
            '\'' => self.lex_quoted(start, '\'', TokenKind::RuneLiteral),
            '"' => self.lex_quoted(start, '"', TokenKind::StringLiteral),
            '`' => self.lex_raw_string(start),

            // ── Identifiers and keywords ─────────────────────────────────
            c if is_ident_start(c) => self.lex_ident(start),

            _ => {
                self.cursor.advance();
                Token::new(TokenKind::Error, start, self.cursor.pos())
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    fn token_from(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, start, self.cursor.pos())
    }

    /// A run of blanks. Line breaks are included only while they are not
    /// statement terminators.
    fn lex_whitespace(&mut self, start: u32) -> Token {
        let newline_is_blank = !self.insert_semi;
        self.cursor.eat_while(|c| {
            matches!(c, ' ' | '\t' | '\r') || (c == '\n' && newline_is_blank)
        });
        self.token_from(TokenKind::Whitespace, start)
    }

    // ── Operator lexing ──────────────────────────────────────────────────

    /// `x` -> `plain`, `x=` -> `with_eq`
    fn lex_with_eq(&mut self, start: u32, plain: TokenKind, with_eq: TokenKind) -> Token {
        self.cursor.advance();
        if self.cursor.eat('=') {
            self.token_from(with_eq, start)
        } else {
            self.token_from(plain, start)
        }
    }

    /// `x` -> `plain`, `x=` -> `with_eq`, `xx` -> `doubled`
    fn lex_doubled(
        &mut self,
        start: u32,
        plain: TokenKind,
        with_eq: TokenKind,
        doubled: TokenKind,
    ) -> Token {
        let first = self.cursor.advance();
        if first.is_some_and(|c| self.cursor.eat(c)) {
            self.token_from(doubled, start)
        } else if self.cursor.eat('=') {
            self.token_from(with_eq, start)
        } else {
            self.token_from(plain, start)
        }
    }

    /// `&`, `&=`, `&&`, `&^`, `&^=`
    fn lex_amp(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '&'
        if self.cursor.eat('&') {
            return self.token_from(TokenKind::AmpAmp, start);
        }
        if self.cursor.eat('^') {
            return if self.cursor.eat('=') {
                self.token_from(TokenKind::AmpCaretEq, start)
            } else {
                self.token_from(TokenKind::AmpCaret, start)
            };
        }
        if self.cursor.eat('=') {
            return self.token_from(TokenKind::AmpEq, start);
        }
        self.token_from(TokenKind::Amp, start)
    }

    /// `<`, `<=`, `<<`, `<<=`, `<-`
    fn lex_lt(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '<'
        if self.cursor.eat('-') {
            return self.token_from(TokenKind::Arrow, start);
        }
        if self.cursor.eat('<') {
            return if self.cursor.eat('=') {
                self.token_from(TokenKind::ShlEq, start)
            } else {
                self.token_from(TokenKind::Shl, start)
            };
        }
        if self.cursor.eat('=') {
            return self.token_from(TokenKind::LtEq, start);
        }
        self.token_from(TokenKind::Lt, start)
    }

    /// `>`, `>=`, `>>`, `>>=`
    fn lex_gt(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '>'
        if self.cursor.eat('>') {
            return if self.cursor.eat('=') {
                self.token_from(TokenKind::ShrEq, start)
            } else {
                self.token_from(TokenKind::Shr, start)
            };
        }
        if self.cursor.eat('=') {
            return self.token_from(TokenKind::GtEq, start);
        }
        self.token_from(TokenKind::Gt, start)
    }

    /// `.`, `...`, or a float starting with a dot (`.5`).
    fn lex_dot(&mut self, start: u32) -> Token {
        if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            if matches!(self.cursor.peek(), Some('e' | 'E')) {
                self.lex_exponent();
            }
            return self.finish_number(start, TokenKind::FloatLiteral);
        }
        if self.cursor.peek_nth(1) == Some('.') && self.cursor.peek_nth(2) == Some('.') {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor.advance();
            return self.token_from(TokenKind::Ellipsis, start);
        }
        self.single_char_token(TokenKind::Dot, start)
    }

    // ── Comments ─────────────────────────────────────────────────────────

    /// `// ...` up to the line break, which is lexed separately.
    fn lex_line_comment(&mut self, start: u32) -> Token {
        self.cursor.eat_while(|c| c != '\n');
        self.token_from(TokenKind::LineComment, start)
    }

    /// `/* ... */`. A comment spanning lines ends the statement like a line
    /// break does, so a zero-length `Newline` is queued after it.
    fn lex_block_comment(&mut self, start: u32) -> Token {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'
        let mut spans_lines = false;
        loop {
            match self.cursor.peek() {
                None => return self.token_from(TokenKind::Error, start),
                Some('*') if self.cursor.peek_nth(1) == Some('/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    break;
                }
                Some(c) => {
                    spans_lines |= c == '\n';
                    self.cursor.advance();
                }
            }
        }
        let end = self.cursor.pos();
        if spans_lines && self.insert_semi {
            self.pending_token = Some(Token::new(TokenKind::Newline, end, end));
        }
        Token::new(TokenKind::BlockComment, start, end)
    }

    // ── Number lexing ────────────────────────────────────────────────────

    /// Integer, float, or imaginary literal.
    ///
    /// Digits are not validated against the base; the parser only needs the
    /// token boundaries.
    fn lex_number(&mut self, start: u32) -> Token {
        let mut kind = TokenKind::IntLiteral;
        let prefix = if self.cursor.peek() == Some('0') {
            self.cursor.peek_nth(1)
        } else {
            None
        };

        match prefix {
            Some('x' | 'X') => {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
                if self.cursor.eat('.') {
                    self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
                    kind = TokenKind::FloatLiteral;
                }
                if matches!(self.cursor.peek(), Some('p' | 'P')) {
                    self.lex_exponent();
                    kind = TokenKind::FloatLiteral;
                }
            }
            Some('b' | 'B' | 'o' | 'O') => {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
            _ => {
                self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
                if self.cursor.peek() == Some('.') && self.cursor.peek_nth(1) != Some('.') {
                    self.cursor.advance();
                    self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
                    kind = TokenKind::FloatLiteral;
                }
                if matches!(self.cursor.peek(), Some('e' | 'E')) {
                    self.lex_exponent();
                    kind = TokenKind::FloatLiteral;
                }
            }
        }

        self.finish_number(start, kind)
    }

    /// Consume an exponent marker (`e`, `E`, `p`, `P`), its sign and digits.
    fn lex_exponent(&mut self) {
        self.cursor.advance();
        if matches!(self.cursor.peek(), Some('+' | '-')) {
            self.cursor.advance();
        }
        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
    }

    /// Apply the imaginary suffix, if any.
    fn finish_number(&mut self, start: u32, kind: TokenKind) -> Token {
        if self.cursor.eat('i') {
            self.token_from(TokenKind::ImaginaryLiteral, start)
        } else {
            self.token_from(kind, start)
        }
    }

    // ── String and rune lexing ───────────────────────────────────────────

    /// Interpreted string or rune literal. A line break or end of input
    /// before the closing quote yields an `Error` token.
    fn lex_quoted(&mut self, start: u32, quote: char, kind: TokenKind) -> Token {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.peek() {
                None | Some('\n') => return self.token_from(TokenKind::Error, start),
                Some('\\') => {
                    self.cursor.advance();
                    if !matches!(self.cursor.peek(), None | Some('\n')) {
                        self.cursor.advance();
                    }
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return self.token_from(kind, start);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// `` `...` ``, which may span lines.
    fn lex_raw_string(&mut self, start: u32) -> Token {
        self.cursor.advance(); // opening backquote
        self.cursor.eat_while(|c| c != '`');
        if self.cursor.eat('`') {
            self.token_from(TokenKind::RawStringLiteral, start)
        } else {
            self.token_from(TokenKind::Error, start)
        }
    }

    // ── Identifier lexing ────────────────────────────────────────────────

    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.token_from(kind, start)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = match self.pending_token.take() {
            Some(token) => token,
            None if self.emitted_eof => return None,
            None => self.next_token(),
        };

        match token.kind {
            TokenKind::Eof => self.emitted_eof = true,
            TokenKind::Newline => self.insert_semi = false,
            ref kind if kind.is_trivia() => {}
            ref kind => self.insert_semi = kind.ends_statement(),
        }

        Some(token)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
