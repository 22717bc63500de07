//! Type syntax: named and generic types, pointers, arrays, slices, maps,
//! channels, function signatures, structs and interfaces.

use crate::syntax_kind::SyntaxKind;

use super::{expressions, items, MarkClosed, Parser};

/// Tokens that can begin a type.
pub(crate) fn starts_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::STAR
            | SyntaxKind::L_BRACKET
            | SyntaxKind::L_PAREN
            | SyntaxKind::MAP_KW
            | SyntaxKind::CHAN_KW
            | SyntaxKind::ARROW
            | SyntaxKind::FUNC_KW
            | SyntaxKind::STRUCT_KW
            | SyntaxKind::INTERFACE_KW
    )
}

/// Parse a type. Returns `None` (with an error) if none starts here.
pub(crate) fn ty(p: &mut Parser) -> Option<MarkClosed> {
    match p.current() {
        SyntaxKind::IDENT => Some(type_name(p)),
        SyntaxKind::STAR => {
            let m = p.open();
            p.advance(); // *
            ty(p);
            Some(p.close(m, SyntaxKind::POINTER_TYPE))
        }
        SyntaxKind::L_BRACKET => Some(array_or_slice_type(p)),
        SyntaxKind::MAP_KW => Some(map_type(p)),
        SyntaxKind::CHAN_KW | SyntaxKind::ARROW => Some(chan_type(p)),
        SyntaxKind::FUNC_KW => {
            let m = p.open();
            p.advance(); // func
            signature(p);
            Some(p.close(m, SyntaxKind::FUNC_TYPE))
        }
        SyntaxKind::STRUCT_KW => Some(struct_type(p)),
        SyntaxKind::INTERFACE_KW => Some(interface_type(p)),
        SyntaxKind::L_PAREN => {
            let m = p.open();
            let opened_at = p.current_span();
            p.advance(); // (
            ty(p);
            p.expect_closing(SyntaxKind::R_PAREN, opened_at, "parenthesized type");
            Some(p.close(m, SyntaxKind::PAREN_TYPE))
        }
        _ => {
            p.error("expected type");
            None
        }
    }
}

/// `T`, `pkg.T`, `T[int]`, `pkg.T[K, V]`
fn type_name(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // IDENT
    let mut name = p.close(m, SyntaxKind::NAME_REF);

    if p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        let m = p.open_before(name);
        p.advance(); // .
        p.advance(); // IDENT
        name = p.close(m, SyntaxKind::SELECTOR_EXPR);
    }

    if p.at(SyntaxKind::L_BRACKET) {
        let m = p.open_before(name);
        let opened_at = p.current_span();
        p.advance(); // [
        while !p.at_any(&[SyntaxKind::R_BRACKET, SyntaxKind::EOF]) && !p.has_error() {
            ty(p);
            if !p.at(SyntaxKind::R_BRACKET) && !p.expect(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect_closing(SyntaxKind::R_BRACKET, opened_at, "type argument list");
        name = p.close(m, SyntaxKind::INDEX_EXPR);
    }

    name
}

/// `[]T`, `[N]T`, `[...]T`
fn array_or_slice_type(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    let opened_at = p.current_span();
    p.advance(); // [

    if p.eat(SyntaxKind::R_BRACKET) {
        ty(p);
        return p.close(m, SyntaxKind::SLICE_TYPE);
    }

    if !p.eat(SyntaxKind::ELLIPSIS) {
        p.with_composite(true, expressions::expr);
    }
    p.expect_closing(SyntaxKind::R_BRACKET, opened_at, "array length");
    ty(p);
    p.close(m, SyntaxKind::ARRAY_TYPE)
}

/// `map[K]V`
fn map_type(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // map
    let opened_at = p.current_span();
    if p.expect(SyntaxKind::L_BRACKET) {
        ty(p);
        p.expect_closing(SyntaxKind::R_BRACKET, opened_at, "map key");
        ty(p);
    }
    p.close(m, SyntaxKind::MAP_TYPE)
}

/// `chan T`, `chan<- T`, `<-chan T`
fn chan_type(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    if p.eat(SyntaxKind::ARROW) {
        p.expect(SyntaxKind::CHAN_KW);
    } else {
        p.advance(); // chan
        p.eat(SyntaxKind::ARROW);
    }
    ty(p);
    p.close(m, SyntaxKind::CHAN_TYPE)
}

/// `struct { fields }`
pub(crate) fn struct_type(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // struct
    let opened_at = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        return p.close(m, SyntaxKind::STRUCT_TYPE);
    }

    loop {
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.has_error() || p.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            break;
        }
        field_decl(p);
        if p.has_error() {
            break;
        }
        p.expect_semi();
    }

    p.expect_closing(SyntaxKind::R_BRACE, opened_at, "struct type");
    p.close(m, SyntaxKind::STRUCT_TYPE)
}

/// `a, b T "tag"` or an embedded `T`, `*T`, `pkg.T`, `T[int]`.
fn field_decl(p: &mut Parser) {
    let m = p.open();

    let embedded = match p.current() {
        SyntaxKind::STAR => true,
        SyntaxKind::IDENT => match p.nth(1) {
            SyntaxKind::DOT
            | SyntaxKind::SEMICOLON
            | SyntaxKind::R_BRACE
            | SyntaxKind::STRING_LITERAL
            | SyntaxKind::RAW_STRING_LITERAL => true,
            // `a []T` is a field; `T[int]` alone on its line is embedded.
            SyntaxKind::L_BRACKET => {
                p.nth(2) != SyntaxKind::R_BRACKET
                    && matches!(
                        p.nth_after_group(1),
                        SyntaxKind::SEMICOLON
                            | SyntaxKind::R_BRACE
                            | SyntaxKind::STRING_LITERAL
                            | SyntaxKind::RAW_STRING_LITERAL
                    )
            }
            _ => false,
        },
        _ => {
            p.error("expected field name or embedded type");
            p.close(m, SyntaxKind::FIELD_DECL);
            return;
        }
    };

    if embedded {
        ty(p);
    } else {
        items::name_list(p);
        ty(p);
    }

    if !p.eat(SyntaxKind::STRING_LITERAL) {
        p.eat(SyntaxKind::RAW_STRING_LITERAL);
    }

    p.close(m, SyntaxKind::FIELD_DECL);
}

/// `interface { methods and constraints }`
fn interface_type(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // interface
    let opened_at = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        return p.close(m, SyntaxKind::INTERFACE_TYPE);
    }

    loop {
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.has_error() || p.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            break;
        }
        if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
            let method = p.open();
            items::name(p);
            signature(p);
            p.close(method, SyntaxKind::METHOD_SPEC);
        } else {
            constraint(p);
        }
        if p.has_error() {
            break;
        }
        p.expect_semi();
    }

    p.expect_closing(SyntaxKind::R_BRACE, opened_at, "interface type");
    p.close(m, SyntaxKind::INTERFACE_TYPE)
}

/// `A | ~B | C`
pub(crate) fn constraint(p: &mut Parser) {
    let Some(first) = constraint_term(p) else {
        return;
    };
    if p.at(SyntaxKind::PIPE) {
        let m = p.open_before(first);
        while p.eat(SyntaxKind::PIPE) && !p.has_error() {
            constraint_term(p);
        }
        p.close(m, SyntaxKind::UNION_TYPE);
    }
}

fn constraint_term(p: &mut Parser) -> Option<MarkClosed> {
    if p.at(SyntaxKind::TILDE) {
        let m = p.open();
        p.advance(); // ~
        ty(p);
        return Some(p.close(m, SyntaxKind::TILDE_TYPE));
    }
    ty(p)
}

/// `(params) results`
pub(crate) fn signature(p: &mut Parser) {
    param_list(p, SyntaxKind::PARAM_LIST);
    if p.has_error() {
        return;
    }
    if p.at(SyntaxKind::L_PAREN) {
        let m = p.open();
        param_list(p, SyntaxKind::PARAM_LIST);
        p.close(m, SyntaxKind::RESULT);
    } else if starts_type(p.current()) {
        let m = p.open();
        ty(p);
        p.close(m, SyntaxKind::RESULT);
    }
}

/// A parenthesized parameter list, closed as `kind` (PARAM_LIST or RECEIVER).
///
/// Go allows either all-named or all-unnamed parameters, so `(a, b int)`
/// only reveals that `a` is a name once `b int` is seen. Bare identifiers
/// are parsed as type references first and retagged to NAME afterwards.
pub(crate) fn param_list(p: &mut Parser, kind: SyntaxKind) {
    let m = p.open();
    let opened_at = p.current_span();
    if !p.expect(SyntaxKind::L_PAREN) {
        p.close(m, kind);
        return;
    }

    let mut bare: Vec<MarkClosed> = Vec::new();
    let mut named = false;

    while !p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) && !p.has_error() {
        let param = p.open();
        if p.at(SyntaxKind::IDENT) && !ident_is_type(p) {
            items::name(p);
            named = true;
            p.eat(SyntaxKind::ELLIPSIS);
            ty(p);
        } else {
            p.eat(SyntaxKind::ELLIPSIS);
            if let Some(t) = ty(p) {
                if p.closed_kind(t) == SyntaxKind::NAME_REF {
                    bare.push(t);
                }
            }
        }
        p.close(param, SyntaxKind::PARAM);
        if !p.at(SyntaxKind::R_PAREN) && !p.expect(SyntaxKind::COMMA) {
            break;
        }
    }

    p.expect_closing(SyntaxKind::R_PAREN, opened_at, "parameter list");
    if named {
        for t in bare {
            p.retag(t, SyntaxKind::NAME);
        }
    }
    p.close(m, kind);
}

/// Whether the identifier at the cursor is a whole parameter type rather
/// than a parameter name.
fn ident_is_type(p: &Parser) -> bool {
    match p.nth(1) {
        SyntaxKind::COMMA | SyntaxKind::R_PAREN | SyntaxKind::DOT => true,
        SyntaxKind::L_BRACKET => {
            p.nth(2) != SyntaxKind::R_BRACKET
                && matches!(
                    p.nth_after_group(1),
                    SyntaxKind::COMMA | SyntaxKind::R_PAREN
                )
        }
        _ => false,
    }
}
