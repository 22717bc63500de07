//! SyntaxKind enum for the Go CST.
//!
//! A superset of `TokenKind` (mapped to SCREAMING_SNAKE_CASE) plus the node
//! kinds produced by the parser.

use structfix_common::token::TokenKind;

/// Every kind of syntax element in the Go CST.
///
/// Token kinds (leaves) are mapped 1:1 from [`TokenKind`]. The first two
/// values are sentinels used by the event-based parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────────
    /// Placeholder kind for incomplete/unfinished parser events.
    TOMBSTONE = 0,
    /// Wrapper for tokens that couldn't be parsed.
    ERROR_NODE = 1,

    // ── Keywords (25) ──────────────────────────────────────────────────
    BREAK_KW,
    CASE_KW,
    CHAN_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DEFER_KW,
    ELSE_KW,
    FALLTHROUGH_KW,
    FOR_KW,
    FUNC_KW,
    GO_KW,
    GOTO_KW,
    IF_KW,
    IMPORT_KW,
    INTERFACE_KW,
    MAP_KW,
    PACKAGE_KW,
    RANGE_KW,
    RETURN_KW,
    SELECT_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPE_KW,
    VAR_KW,

    // ── Operators (38) ─────────────────────────────────────────────────
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    SHL,
    SHR,
    AMP_CARET,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    AMP_CARET_EQ,
    AMP_AMP,
    PIPE_PIPE,
    ARROW,
    PLUS_PLUS,
    MINUS_MINUS,
    EQ_EQ,
    LT,
    GT,
    EQ,
    BANG,
    TILDE,
    NOT_EQ,
    LT_EQ,
    GT_EQ,
    COLON_EQ,
    ELLIPSIS,

    // ── Delimiters and punctuation (10) ────────────────────────────────
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    L_BRACE,
    R_BRACE,
    COMMA,
    SEMICOLON,
    DOT,
    COLON,

    // ── Literals (6) ───────────────────────────────────────────────────
    INT_LITERAL,
    FLOAT_LITERAL,
    IMAGINARY_LITERAL,
    RUNE_LITERAL,
    STRING_LITERAL,
    RAW_STRING_LITERAL,

    IDENT,

    // ── Trivia and special tokens ──────────────────────────────────────
    WHITESPACE,
    /// Line break acting as a statement terminator. The parser sees it as
    /// `SEMICOLON`; the tree keeps the original kind.
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    EOF,
    /// Lexer error token.
    ERROR,

    // ── Top level ──────────────────────────────────────────────────────
    SOURCE_FILE,
    /// `package name`
    PACKAGE_CLAUSE,
    /// `import "fmt"` or `import ( ... )`
    IMPORT_DECL,
    /// `[name | . | _] "path"`
    IMPORT_SPEC,
    CONST_DECL,
    /// `a, b T = 1, 2` inside a const declaration.
    CONST_SPEC,
    VAR_DECL,
    VAR_SPEC,
    TYPE_DECL,
    /// `Name[T any] = Type` or `Name Type`
    TYPE_SPEC,
    /// `[T any, U comparable]`
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    /// `func (r R) Name[T any](params) results { ... }`
    FUNC_DECL,
    /// Method receiver list `(r *R)`.
    RECEIVER,
    PARAM_LIST,
    PARAM,
    /// Function results: a single type or a parenthesized list.
    RESULT,
    BLOCK,
    /// A declared identifier (definition site).
    NAME,

    // ── Types ──────────────────────────────────────────────────────────
    /// `struct { ... }`
    STRUCT_TYPE,
    /// One line of a struct: names, type, optional tag; or an embedded type.
    FIELD_DECL,
    POINTER_TYPE,
    /// `[N]T` or `[...]T`
    ARRAY_TYPE,
    SLICE_TYPE,
    MAP_TYPE,
    CHAN_TYPE,
    /// `func(params) results` without a body.
    FUNC_TYPE,
    INTERFACE_TYPE,
    /// Method inside an interface.
    METHOD_SPEC,
    /// `A | ~B` in a constraint.
    UNION_TYPE,
    /// `~T`
    TILDE_TYPE,
    PAREN_TYPE,

    // ── Expressions ────────────────────────────────────────────────────
    LITERAL,
    /// An identifier use.
    NAME_REF,
    PAREN_EXPR,
    /// `x.f`; the member is a bare IDENT token.
    SELECTOR_EXPR,
    /// `a[i]`, also generic instantiation `T[int, string]`.
    INDEX_EXPR,
    /// `a[lo:hi:max]`
    SLICE_EXPR,
    /// `x.(T)` or `x.(type)`
    TYPE_ASSERT_EXPR,
    CALL_EXPR,
    ARG_LIST,
    UNARY_EXPR,
    BINARY_EXPR,
    /// `[Type] LiteralValue`. Without a type child the literal is elided.
    COMPOSITE_LIT,
    /// `{ elements }`
    LITERAL_VALUE,
    /// `key: value` inside a literal value.
    KEYED_ELEMENT,
    /// `func(params) results { body }`
    FUNC_LIT,
    /// Two or more comma-separated expressions.
    EXPR_LIST,

    // ── Statements ─────────────────────────────────────────────────────
    EXPR_STMT,
    /// `ch <- v`
    SEND_STMT,
    INC_DEC_STMT,
    /// `=`, `:=` and the compound assignment operators.
    ASSIGN_STMT,
    LABELED_STMT,
    GO_STMT,
    DEFER_STMT,
    RETURN_STMT,
    /// `break`, `continue`, `goto`, `fallthrough`
    BRANCH_STMT,
    IF_STMT,
    /// Expression and type switches.
    SWITCH_STMT,
    CASE_CLAUSE,
    SELECT_STMT,
    COMM_CLAUSE,
    FOR_STMT,
    /// `k, v := range x` in a for header.
    RANGE_CLAUSE,
}

impl SyntaxKind {
    /// Tokens skipped by parser lookahead. A `NEWLINE` is not trivia.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
        )
    }

    /// Source spelling of fixed-text tokens, for error messages.
    pub fn token_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::L_PAREN => "(",
            SyntaxKind::R_PAREN => ")",
            SyntaxKind::L_BRACKET => "[",
            SyntaxKind::R_BRACKET => "]",
            SyntaxKind::L_BRACE => "{",
            SyntaxKind::R_BRACE => "}",
            SyntaxKind::COMMA => ",",
            SyntaxKind::SEMICOLON => ";",
            SyntaxKind::DOT => ".",
            SyntaxKind::COLON => ":",
            SyntaxKind::EQ => "=",
            SyntaxKind::COLON_EQ => ":=",
            SyntaxKind::ARROW => "<-",
            SyntaxKind::ELLIPSIS => "...",
            SyntaxKind::CHAN_KW => "chan",
            SyntaxKind::FUNC_KW => "func",
            SyntaxKind::PACKAGE_KW => "package",
            SyntaxKind::RANGE_KW => "range",
            SyntaxKind::STRUCT_KW => "struct",
            SyntaxKind::TYPE_KW => "type",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable name used in "expected ..." messages.
    pub fn describe(self) -> String {
        match self.token_text() {
            Some(text) => format!("`{text}`"),
            None => match self {
                SyntaxKind::IDENT => "identifier".to_string(),
                SyntaxKind::EOF => "end of file".to_string(),
                SyntaxKind::STRING_LITERAL | SyntaxKind::RAW_STRING_LITERAL => {
                    "string literal".to_string()
                }
                other => format!("{other:?}"),
            },
        }
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            // Keywords
            TokenKind::Break => SyntaxKind::BREAK_KW,
            TokenKind::Case => SyntaxKind::CASE_KW,
            TokenKind::Chan => SyntaxKind::CHAN_KW,
            TokenKind::Const => SyntaxKind::CONST_KW,
            TokenKind::Continue => SyntaxKind::CONTINUE_KW,
            TokenKind::Default => SyntaxKind::DEFAULT_KW,
            TokenKind::Defer => SyntaxKind::DEFER_KW,
            TokenKind::Else => SyntaxKind::ELSE_KW,
            TokenKind::Fallthrough => SyntaxKind::FALLTHROUGH_KW,
            TokenKind::For => SyntaxKind::FOR_KW,
            TokenKind::Func => SyntaxKind::FUNC_KW,
            TokenKind::Go => SyntaxKind::GO_KW,
            TokenKind::Goto => SyntaxKind::GOTO_KW,
            TokenKind::If => SyntaxKind::IF_KW,
            TokenKind::Import => SyntaxKind::IMPORT_KW,
            TokenKind::Interface => SyntaxKind::INTERFACE_KW,
            TokenKind::Map => SyntaxKind::MAP_KW,
            TokenKind::Package => SyntaxKind::PACKAGE_KW,
            TokenKind::Range => SyntaxKind::RANGE_KW,
            TokenKind::Return => SyntaxKind::RETURN_KW,
            TokenKind::Select => SyntaxKind::SELECT_KW,
            TokenKind::Struct => SyntaxKind::STRUCT_KW,
            TokenKind::Switch => SyntaxKind::SWITCH_KW,
            TokenKind::Type => SyntaxKind::TYPE_KW,
            TokenKind::Var => SyntaxKind::VAR_KW,

            // Operators
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Percent => SyntaxKind::PERCENT,
            TokenKind::Amp => SyntaxKind::AMP,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Shl => SyntaxKind::SHL,
            TokenKind::Shr => SyntaxKind::SHR,
            TokenKind::AmpCaret => SyntaxKind::AMP_CARET,
            TokenKind::PlusEq => SyntaxKind::PLUS_EQ,
            TokenKind::MinusEq => SyntaxKind::MINUS_EQ,
            TokenKind::StarEq => SyntaxKind::STAR_EQ,
            TokenKind::SlashEq => SyntaxKind::SLASH_EQ,
            TokenKind::PercentEq => SyntaxKind::PERCENT_EQ,
            TokenKind::AmpEq => SyntaxKind::AMP_EQ,
            TokenKind::PipeEq => SyntaxKind::PIPE_EQ,
            TokenKind::CaretEq => SyntaxKind::CARET_EQ,
            TokenKind::ShlEq => SyntaxKind::SHL_EQ,
            TokenKind::ShrEq => SyntaxKind::SHR_EQ,
            TokenKind::AmpCaretEq => SyntaxKind::AMP_CARET_EQ,
            TokenKind::AmpAmp => SyntaxKind::AMP_AMP,
            TokenKind::PipePipe => SyntaxKind::PIPE_PIPE,
            TokenKind::Arrow => SyntaxKind::ARROW,
            TokenKind::PlusPlus => SyntaxKind::PLUS_PLUS,
            TokenKind::MinusMinus => SyntaxKind::MINUS_MINUS,
            TokenKind::EqEq => SyntaxKind::EQ_EQ,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::NotEq => SyntaxKind::NOT_EQ,
            TokenKind::LtEq => SyntaxKind::LT_EQ,
            TokenKind::GtEq => SyntaxKind::GT_EQ,
            TokenKind::ColonEq => SyntaxKind::COLON_EQ,
            TokenKind::Ellipsis => SyntaxKind::ELLIPSIS,

            // Delimiters and punctuation
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBracket => SyntaxKind::L_BRACKET,
            TokenKind::RBracket => SyntaxKind::R_BRACKET,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Colon => SyntaxKind::COLON,

            // Literals
            TokenKind::IntLiteral => SyntaxKind::INT_LITERAL,
            TokenKind::FloatLiteral => SyntaxKind::FLOAT_LITERAL,
            TokenKind::ImaginaryLiteral => SyntaxKind::IMAGINARY_LITERAL,
            TokenKind::RuneLiteral => SyntaxKind::RUNE_LITERAL,
            TokenKind::StringLiteral => SyntaxKind::STRING_LITERAL,
            TokenKind::RawStringLiteral => SyntaxKind::RAW_STRING_LITERAL,

            TokenKind::Ident => SyntaxKind::IDENT,

            // Trivia and special
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::LineComment => SyntaxKind::LINE_COMMENT,
            TokenKind::BlockComment => SyntaxKind::BLOCK_COMMENT,
            TokenKind::Eof => SyntaxKind::EOF,
            TokenKind::Error => SyntaxKind::ERROR,
        }
    }
}
