use insta::assert_snapshot;
use serde::Serialize;
use structfix_common::token::TokenKind;
use structfix_lexer::Lexer;

/// A human-readable representation of a token for snapshot testing.
#[derive(Serialize)]
struct TokenSnapshot {
    kind: String,
    text: String,
}

fn tokenize_snapshot(source: &str) -> Vec<TokenSnapshot> {
    Lexer::tokenize(source)
        .into_iter()
        .map(|tok| TokenSnapshot {
            kind: format!("{:?}", tok.kind),
            text: source[tok.span.start as usize..tok.span.end as usize].to_string(),
        })
        .collect()
}

/// One token per line, trivia and `Eof` omitted.
fn significant(source: &str) -> String {
    tokenize_snapshot(source)
        .into_iter()
        .filter(|t| !matches!(t.kind.as_str(), "Whitespace" | "LineComment" | "BlockComment" | "Eof"))
        .map(|t| format!("{} {:?}", t.kind, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia() && *k != TokenKind::Eof)
        .collect()
}

// ── Losslessness ─────────────────────────────────────────────────────────

#[test]
fn tokens_cover_source_exactly() {
    let source = "package main\n\n// Outer holds things.\ntype Outer struct {\n\tInner struct { X int } `json:\"inner\"`\n}\n\nvar o = Outer{Inner: {X: 0x1F}} /* done */\n";
    let tokens = Lexer::tokenize(source);
    let mut offset = 0;
    let mut rebuilt = String::new();
    for tok in &tokens {
        assert_eq!(tok.span.start, offset, "gap before {:?}", tok.kind);
        offset = tok.span.end;
        rebuilt.push_str(&source[tok.span.start as usize..tok.span.end as usize]);
    }
    assert_eq!(rebuilt, source);
    assert_eq!(tokens.last().map(|t| t.kind.clone()), Some(TokenKind::Eof));
}

// ── Operators ────────────────────────────────────────────────────────────

#[test]
fn compound_operators() {
    assert_eq!(
        kinds("&^= &^ && &= & <<= << <- <= >>= >> >= := ... ++ -- += -= |= || ~"),
        vec![
            TokenKind::AmpCaretEq,
            TokenKind::AmpCaret,
            TokenKind::AmpAmp,
            TokenKind::AmpEq,
            TokenKind::Amp,
            TokenKind::ShlEq,
            TokenKind::Shl,
            TokenKind::Arrow,
            TokenKind::LtEq,
            TokenKind::ShrEq,
            TokenKind::Shr,
            TokenKind::GtEq,
            TokenKind::ColonEq,
            TokenKind::Ellipsis,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::PipeEq,
            TokenKind::PipePipe,
            TokenKind::Tilde,
        ]
    );
}

#[test]
fn slash_variants() {
    assert_eq!(
        kinds("a / b /= c // d"),
        vec![
            TokenKind::Ident,
            TokenKind::Slash,
            TokenKind::Ident,
            TokenKind::SlashEq,
            TokenKind::Ident,
        ]
    );
}

// ── Numbers ──────────────────────────────────────────────────────────────

#[test]
fn number_literals() {
    assert_snapshot!(significant("42 0x1F 0b1010 0o17 1_000 3.14 .5 1e9 0x1p-2 2i 1.5i"), @r#"
    IntLiteral "42"
    IntLiteral "0x1F"
    IntLiteral "0b1010"
    IntLiteral "0o17"
    IntLiteral "1_000"
    FloatLiteral "3.14"
    FloatLiteral ".5"
    FloatLiteral "1e9"
    FloatLiteral "0x1p-2"
    ImaginaryLiteral "2i"
    ImaginaryLiteral "1.5i"
    "#);
}

#[test]
fn selector_after_number_is_not_float() {
    assert_eq!(
        kinds("x[1:]"),
        vec![
            TokenKind::Ident,
            TokenKind::LBracket,
            TokenKind::IntLiteral,
            TokenKind::Colon,
            TokenKind::RBracket,
        ]
    );
}

// ── Strings and runes ────────────────────────────────────────────────────

#[test]
fn string_and_rune_literals() {
    assert_snapshot!(significant(r#"'a' '\'' "a\"b" `raw
line`"#), @r#"
    RuneLiteral "'a'"
    RuneLiteral "'\\''"
    StringLiteral "\"a\\\"b\""
    RawStringLiteral "`raw\nline`"
    "#);
}

// ── Semicolon insertion ──────────────────────────────────────────────────

#[test]
fn statement_terminators() {
    let source = "x := f(\n\ta,\n)\nreturn\n}\ny++\nif x {\n";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Ident,
            TokenKind::ColonEq,
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::RParen,
            TokenKind::Newline,
            TokenKind::Return,
            TokenKind::Newline,
            TokenKind::RBrace,
            TokenKind::Newline,
            TokenKind::Ident,
            TokenKind::PlusPlus,
            TokenKind::Newline,
            TokenKind::If,
            TokenKind::Ident,
            TokenKind::LBrace,
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_snapshot!(significant("package main; func structFix(π int) {}"), @r#"
    Package "package"
    Ident "main"
    Semicolon ";"
    Func "func"
    Ident "structFix"
    LParen "("
    Ident "π"
    Ident "int"
    RParen ")"
    LBrace "{"
    RBrace "}"
    "#);
}

#[test]
fn unknown_character_is_error() {
    assert_eq!(
        kinds("a @ b"),
        vec![TokenKind::Ident, TokenKind::Error, TokenKind::Ident]
    );
}
