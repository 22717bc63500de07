use serde::Serialize;

use crate::span::Span;

/// A token produced by the Go lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

/// Every kind of token in Go source text.
///
/// The lexer is lossless: whitespace and comments are tokens too, so the
/// concatenated token texts always reproduce the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // ── Keywords (25) ──────────────────────────────────────────────────
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,

    // ── Operators (38) ─────────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `&^`
    AmpCaret,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `&=`
    AmpEq,
    /// `|=`
    PipeEq,
    /// `^=`
    CaretEq,
    /// `<<=`
    ShlEq,
    /// `>>=`
    ShrEq,
    /// `&^=`
    AmpCaretEq,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `<-`
    Arrow,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `==`
    EqEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `!=`
    NotEq,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `:=`
    ColonEq,
    /// `...`
    Ellipsis,

    // ── Delimiters (6) ─────────────────────────────────────────────────
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // ── Punctuation (4) ────────────────────────────────────────────────
    Comma,
    Semicolon,
    Dot,
    Colon,

    // ── Literals (6) ───────────────────────────────────────────────────
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    /// Interpreted string literal: `"..."`.
    StringLiteral,
    /// Raw string literal: `` `...` ``.
    RawStringLiteral,

    Ident,

    // ── Trivia (4) ─────────────────────────────────────────────────────
    /// Spaces, tabs, carriage returns, and newlines that do not end a
    /// statement.
    Whitespace,
    /// A newline that terminates a statement (an automatic semicolon).
    /// Zero-length when produced by a multi-line block comment.
    Newline,
    /// `// ...` up to, not including, the line break.
    LineComment,
    /// `/* ... */`
    BlockComment,

    // ── Special (2) ────────────────────────────────────────────────────
    Eof,
    /// Unrecognized character or unterminated literal/comment.
    Error,
}

impl TokenKind {
    /// Whether a line break right after this token ends the statement.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::ImaginaryLiteral
                | TokenKind::RuneLiteral
                | TokenKind::StringLiteral
                | TokenKind::RawStringLiteral
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Fallthrough
                | TokenKind::Return
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// Whitespace and comments. A `Newline` is not trivia.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }
}

/// Look up a keyword by its source spelling.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "break" => Some(TokenKind::Break),
        "case" => Some(TokenKind::Case),
        "chan" => Some(TokenKind::Chan),
        "const" => Some(TokenKind::Const),
        "continue" => Some(TokenKind::Continue),
        "default" => Some(TokenKind::Default),
        "defer" => Some(TokenKind::Defer),
        "else" => Some(TokenKind::Else),
        "fallthrough" => Some(TokenKind::Fallthrough),
        "for" => Some(TokenKind::For),
        "func" => Some(TokenKind::Func),
        "go" => Some(TokenKind::Go),
        "goto" => Some(TokenKind::Goto),
        "if" => Some(TokenKind::If),
        "import" => Some(TokenKind::Import),
        "interface" => Some(TokenKind::Interface),
        "map" => Some(TokenKind::Map),
        "package" => Some(TokenKind::Package),
        "range" => Some(TokenKind::Range),
        "return" => Some(TokenKind::Return),
        "select" => Some(TokenKind::Select),
        "struct" => Some(TokenKind::Struct),
        "switch" => Some(TokenKind::Switch),
        "type" => Some(TokenKind::Type),
        "var" => Some(TokenKind::Var),
        _ => None,
    }
}
