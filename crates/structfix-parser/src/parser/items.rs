//! Declarations: package clause, imports, const/var/type groups, functions.

use crate::syntax_kind::SyntaxKind;

use super::{expressions, statements, types, MarkClosed, Parser};

/// `package name`
pub(crate) fn package_clause(p: &mut Parser) {
    let m = p.open();
    if p.expect(SyntaxKind::PACKAGE_KW) {
        name(p);
    }
    p.close(m, SyntaxKind::PACKAGE_CLAUSE);
}

pub(crate) fn top_level_decl(p: &mut Parser) {
    match p.current() {
        SyntaxKind::IMPORT_KW => import_decl(p),
        SyntaxKind::FUNC_KW => func_decl(p),
        SyntaxKind::CONST_KW | SyntaxKind::VAR_KW | SyntaxKind::TYPE_KW => decl(p),
        _ => p.advance_with_error("expected declaration"),
    }
}

/// `const`, `var` or `type` declaration, at top level or inside a block.
pub(crate) fn decl(p: &mut Parser) {
    let (spec, kind): (fn(&mut Parser), SyntaxKind) = match p.current() {
        SyntaxKind::CONST_KW => (const_spec, SyntaxKind::CONST_DECL),
        SyntaxKind::VAR_KW => (var_spec, SyntaxKind::VAR_DECL),
        _ => (type_spec, SyntaxKind::TYPE_DECL),
    };
    let m = p.open();
    p.advance(); // keyword
    spec_group(p, spec);
    p.close(m, kind);
}

fn import_decl(p: &mut Parser) {
    let m = p.open();
    p.advance(); // import
    spec_group(p, import_spec);
    p.close(m, SyntaxKind::IMPORT_DECL);
}

/// A single spec, or a parenthesized group of `;`-separated specs.
fn spec_group(p: &mut Parser, spec: fn(&mut Parser)) {
    if !p.at(SyntaxKind::L_PAREN) {
        spec(p);
        return;
    }

    let opened_at = p.current_span();
    p.advance(); // (
    loop {
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.has_error() || p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
            break;
        }
        spec(p);
        if p.has_error() {
            return;
        }
        p.expect_semi();
    }
    p.expect_closing(SyntaxKind::R_PAREN, opened_at, "declaration group");
}

/// `[name | . | _] "path"`
fn import_spec(p: &mut Parser) {
    let m = p.open();
    if p.at(SyntaxKind::IDENT) {
        name(p);
    } else {
        p.eat(SyntaxKind::DOT);
    }
    if !p.eat(SyntaxKind::STRING_LITERAL) && !p.eat(SyntaxKind::RAW_STRING_LITERAL) {
        p.error("expected import path");
    }
    p.close(m, SyntaxKind::IMPORT_SPEC);
}

/// `a, b [T] [= x, y]`; a bare name list repeats the previous spec.
fn const_spec(p: &mut Parser) {
    let m = p.open();
    name_list(p);
    if !p.at_any(&[
        SyntaxKind::SEMICOLON,
        SyntaxKind::R_PAREN,
        SyntaxKind::EQ,
        SyntaxKind::EOF,
    ]) {
        types::ty(p);
    }
    if p.eat(SyntaxKind::EQ) {
        expressions::expr_list(p);
    }
    p.close(m, SyntaxKind::CONST_SPEC);
}

/// `a, b T [= x, y]` or `a, b = x, y`
fn var_spec(p: &mut Parser) {
    let m = p.open();
    name_list(p);
    if !p.at(SyntaxKind::EQ) {
        types::ty(p);
    }
    if p.eat(SyntaxKind::EQ) {
        expressions::expr_list(p);
    }
    p.close(m, SyntaxKind::VAR_SPEC);
}

/// `Name [TypeParams] [=] Type`
fn type_spec(p: &mut Parser) {
    let m = p.open();
    name(p);
    if p.at(SyntaxKind::L_BRACKET) && starts_type_params(p) {
        type_param_list(p);
    }
    p.eat(SyntaxKind::EQ);
    types::ty(p);
    p.close(m, SyntaxKind::TYPE_SPEC);
}

/// After `type Name`, `[` opens type parameters (`[T any]`, `[K, V any]`,
/// `[P *C]`) unless it reads as an array length (`[N]T`, `[N+1]T`).
fn starts_type_params(p: &Parser) -> bool {
    p.nth(1) == SyntaxKind::IDENT
        && matches!(
            p.nth(2),
            SyntaxKind::IDENT
                | SyntaxKind::COMMA
                | SyntaxKind::STAR
                | SyntaxKind::L_BRACKET
                | SyntaxKind::L_PAREN
                | SyntaxKind::MAP_KW
                | SyntaxKind::CHAN_KW
                | SyntaxKind::FUNC_KW
                | SyntaxKind::STRUCT_KW
                | SyntaxKind::INTERFACE_KW
                | SyntaxKind::TILDE
                | SyntaxKind::ARROW
        )
}

/// `[T any, K comparable]`
pub(crate) fn type_param_list(p: &mut Parser) {
    let m = p.open();
    let opened_at = p.current_span();
    p.advance(); // [
    while !p.at_any(&[SyntaxKind::R_BRACKET, SyntaxKind::EOF]) && !p.has_error() {
        let param = p.open();
        name_list(p);
        types::constraint(p);
        p.close(param, SyntaxKind::TYPE_PARAM);
        if !p.at(SyntaxKind::R_BRACKET) && !p.expect(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect_closing(SyntaxKind::R_BRACKET, opened_at, "type parameter list");
    p.close(m, SyntaxKind::TYPE_PARAM_LIST);
}

/// `func [(recv)] Name [TypeParams] (params) [results] [{ body }]`
fn func_decl(p: &mut Parser) {
    let m = p.open();
    p.advance(); // func
    if p.at(SyntaxKind::L_PAREN) {
        types::param_list(p, SyntaxKind::RECEIVER);
    }
    name(p);
    if p.at(SyntaxKind::L_BRACKET) {
        type_param_list(p);
    }
    types::signature(p);
    if p.at(SyntaxKind::L_BRACE) {
        statements::block(p);
    }
    p.close(m, SyntaxKind::FUNC_DECL);
}

/// A defining occurrence of an identifier.
pub(crate) fn name(p: &mut Parser) -> Option<MarkClosed> {
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected identifier");
        return None;
    }
    let m = p.open();
    p.advance();
    Some(p.close(m, SyntaxKind::NAME))
}

/// `a, b, c`
pub(crate) fn name_list(p: &mut Parser) {
    name(p);
    while p.at(SyntaxKind::COMMA) && p.nth(1) == SyntaxKind::IDENT && !p.has_error() {
        p.advance(); // ,
        name(p);
    }
}
