//! Pratt expression parser for Go.
//!
//! Binary operators use a binding power table with Go's five precedence
//! levels. Postfix forms (selectors, index/slice, calls, type assertions and
//! composite literals) bind tighter than any prefix or infix operator.
//!
//! Type literals (`[]T`, `map[K]V`, `struct{...}`, `chan T`, `func(...)`)
//! are accepted as operands so conversions, `make`/`new` arguments and
//! composite literals share one entry point.

use crate::syntax_kind::SyntaxKind;

use super::{statements, types, MarkClosed, Parser};

// ── Binding Power Tables ───────────────────────────────────────────────

/// Returns (left_bp, right_bp) for binary operators; all are
/// left-associative.
fn infix_binding_power(op: SyntaxKind) -> Option<(u8, u8)> {
    match op {
        SyntaxKind::PIPE_PIPE => Some((1, 2)),

        SyntaxKind::AMP_AMP => Some((3, 4)),

        SyntaxKind::EQ_EQ
        | SyntaxKind::NOT_EQ
        | SyntaxKind::LT
        | SyntaxKind::LT_EQ
        | SyntaxKind::GT
        | SyntaxKind::GT_EQ => Some((5, 6)),

        SyntaxKind::PLUS | SyntaxKind::MINUS | SyntaxKind::PIPE | SyntaxKind::CARET => Some((7, 8)),

        SyntaxKind::STAR
        | SyntaxKind::SLASH
        | SyntaxKind::PERCENT
        | SyntaxKind::SHL
        | SyntaxKind::SHR
        | SyntaxKind::AMP
        | SyntaxKind::AMP_CARET => Some((9, 10)),

        _ => None,
    }
}

fn prefix_binding_power(op: SyntaxKind) -> Option<((), u8)> {
    match op {
        SyntaxKind::PLUS
        | SyntaxKind::MINUS
        | SyntaxKind::BANG
        | SyntaxKind::CARET
        | SyntaxKind::STAR
        | SyntaxKind::AMP
        | SyntaxKind::ARROW => Some(((), 11)),
        _ => None,
    }
}

/// Postfix operations bind tighter than all prefix and infix operators.
const POSTFIX_BP: u8 = 12;

// ── Expression Entry Points ────────────────────────────────────────────

/// Parse an expression at the lowest binding power.
pub(crate) fn expr(p: &mut Parser) -> Option<MarkClosed> {
    expr_bp(p, 0)
}

/// `a, b, c`. A single expression is returned unwrapped; two or more are
/// wrapped in EXPR_LIST.
pub(crate) fn expr_list(p: &mut Parser) -> Option<MarkClosed> {
    let first = expr(p)?;
    if !p.at(SyntaxKind::COMMA) {
        return Some(first);
    }
    let m = p.open_before(first);
    while p.eat(SyntaxKind::COMMA) && !p.has_error() {
        expr(p);
    }
    Some(p.close(m, SyntaxKind::EXPR_LIST))
}

fn expr_bp(p: &mut Parser, min_bp: u8) -> Option<MarkClosed> {
    let mut lhs = lhs(p)?;

    loop {
        if p.has_error() {
            break;
        }

        let current = p.current();

        if POSTFIX_BP >= min_bp {
            match current {
                SyntaxKind::DOT => {
                    lhs = selector_or_assertion(p, lhs);
                    continue;
                }
                SyntaxKind::L_BRACKET => {
                    lhs = index_or_slice(p, lhs);
                    continue;
                }
                SyntaxKind::L_PAREN => {
                    let m = p.open_before(lhs);
                    arg_list(p);
                    lhs = p.close(m, SyntaxKind::CALL_EXPR);
                    continue;
                }
                // `T{...}` only after something that can name a type, and
                // not in statement headers where `{` opens the body.
                SyntaxKind::L_BRACE
                    if p.composite_allowed()
                        && matches!(
                            p.closed_kind(lhs),
                            SyntaxKind::NAME_REF | SyntaxKind::SELECTOR_EXPR | SyntaxKind::INDEX_EXPR
                        ) =>
                {
                    let m = p.open_before(lhs);
                    literal_value(p);
                    lhs = p.close(m, SyntaxKind::COMPOSITE_LIT);
                    continue;
                }
                _ => {}
            }
        }

        let Some((l_bp, r_bp)) = infix_binding_power(current) else {
            break;
        };
        if l_bp < min_bp {
            break;
        }

        let m = p.open_before(lhs);
        p.advance(); // operator
        expr_bp(p, r_bp);
        lhs = p.close(m, SyntaxKind::BINARY_EXPR);
    }

    Some(lhs)
}

/// Atoms and prefix operators.
fn lhs(p: &mut Parser) -> Option<MarkClosed> {
    let current = p.current();

    // `<-chan T` is a type, not a receive.
    if current == SyntaxKind::ARROW && p.nth(1) == SyntaxKind::CHAN_KW {
        return types::ty(p);
    }

    if let Some(((), r_bp)) = prefix_binding_power(current) {
        let m = p.open();
        p.advance(); // operator
        expr_bp(p, r_bp);
        return Some(p.close(m, SyntaxKind::UNARY_EXPR));
    }

    match current {
        SyntaxKind::INT_LITERAL
        | SyntaxKind::FLOAT_LITERAL
        | SyntaxKind::IMAGINARY_LITERAL
        | SyntaxKind::RUNE_LITERAL
        | SyntaxKind::STRING_LITERAL
        | SyntaxKind::RAW_STRING_LITERAL => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::LITERAL))
        }
        SyntaxKind::IDENT => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::NAME_REF))
        }
        SyntaxKind::L_PAREN => {
            let m = p.open();
            let opened_at = p.current_span();
            p.advance(); // (
            p.with_composite(true, expr);
            p.expect_closing(SyntaxKind::R_PAREN, opened_at, "parenthesized expression");
            Some(p.close(m, SyntaxKind::PAREN_EXPR))
        }
        SyntaxKind::FUNC_KW => {
            let m = p.open();
            p.advance(); // func
            types::signature(p);
            if p.at(SyntaxKind::L_BRACE) {
                statements::block(p);
                Some(p.close(m, SyntaxKind::FUNC_LIT))
            } else {
                Some(p.close(m, SyntaxKind::FUNC_TYPE))
            }
        }
        // Type literals; a following `{` is always a composite literal.
        SyntaxKind::L_BRACKET | SyntaxKind::STRUCT_KW | SyntaxKind::MAP_KW => {
            let ty = types::ty(p)?;
            if p.at(SyntaxKind::L_BRACE) {
                let m = p.open_before(ty);
                literal_value(p);
                return Some(p.close(m, SyntaxKind::COMPOSITE_LIT));
            }
            Some(ty)
        }
        SyntaxKind::CHAN_KW | SyntaxKind::INTERFACE_KW => types::ty(p),
        _ => {
            p.error("expected expression");
            None
        }
    }
}

// ── Postfix forms ──────────────────────────────────────────────────────

/// `x.f`, `x.(T)`, `x.(type)`
fn selector_or_assertion(p: &mut Parser, lhs: MarkClosed) -> MarkClosed {
    let m = p.open_before(lhs);
    p.advance(); // .
    match p.current() {
        SyntaxKind::IDENT => {
            p.advance();
            p.close(m, SyntaxKind::SELECTOR_EXPR)
        }
        SyntaxKind::L_PAREN => {
            let opened_at = p.current_span();
            p.advance(); // (
            if !p.eat(SyntaxKind::TYPE_KW) {
                types::ty(p);
            }
            p.expect_closing(SyntaxKind::R_PAREN, opened_at, "type assertion");
            p.close(m, SyntaxKind::TYPE_ASSERT_EXPR)
        }
        _ => {
            p.error("expected selector or type assertion");
            p.close(m, SyntaxKind::SELECTOR_EXPR)
        }
    }
}

/// `a[i]`, `a[lo:hi]`, `a[lo:hi:max]`, `F[int, string]`
fn index_or_slice(p: &mut Parser, lhs: MarkClosed) -> MarkClosed {
    let m = p.open_before(lhs);
    let opened_at = p.current_span();
    p.advance(); // [

    let kind = p.with_composite(true, |p| {
        if !p.at(SyntaxKind::COLON) {
            expr(p);
        }
        if p.at(SyntaxKind::COLON) {
            while p.eat(SyntaxKind::COLON) {
                if !p.at_any(&[SyntaxKind::COLON, SyntaxKind::R_BRACKET]) {
                    expr(p);
                }
            }
            return SyntaxKind::SLICE_EXPR;
        }
        while p.eat(SyntaxKind::COMMA) && !p.at(SyntaxKind::R_BRACKET) && !p.has_error() {
            expr(p);
        }
        SyntaxKind::INDEX_EXPR
    });

    p.expect_closing(SyntaxKind::R_BRACKET, opened_at, "index expression");
    p.close(m, kind)
}

/// `(a, b...)`
fn arg_list(p: &mut Parser) {
    let m = p.open();
    let opened_at = p.current_span();
    p.advance(); // (

    p.with_composite(true, |p| {
        while !p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) && !p.has_error() {
            expr(p);
            p.eat(SyntaxKind::ELLIPSIS);
            if !p.at(SyntaxKind::R_PAREN) && !p.expect(SyntaxKind::COMMA) {
                break;
            }
        }
    });

    p.expect_closing(SyntaxKind::R_PAREN, opened_at, "argument list");
    p.close(m, SyntaxKind::ARG_LIST);
}

// ── Composite literals ─────────────────────────────────────────────────

/// `{ elem, key: elem, ... }`
pub(crate) fn literal_value(p: &mut Parser) {
    let m = p.open();
    let opened_at = p.current_span();
    p.advance(); // {

    p.with_composite(true, |p| {
        while !p.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) && !p.has_error() {
            element(p);
            if !p.at(SyntaxKind::R_BRACE) && !p.expect(SyntaxKind::COMMA) {
                break;
            }
        }
    });

    p.expect_closing(SyntaxKind::R_BRACE, opened_at, "literal value");
    p.close(m, SyntaxKind::LITERAL_VALUE);
}

/// `value` or `key: value`
fn element(p: &mut Parser) {
    let Some(first) = element_value(p) else {
        return;
    };
    if p.at(SyntaxKind::COLON) {
        let m = p.open_before(first);
        p.advance(); // :
        element_value(p);
        p.close(m, SyntaxKind::KEYED_ELEMENT);
    }
}

/// An expression, or a bare `{...}` whose type is elided.
fn element_value(p: &mut Parser) -> Option<MarkClosed> {
    if p.at(SyntaxKind::L_BRACE) {
        let m = p.open();
        literal_value(p);
        return Some(p.close(m, SyntaxKind::COMPOSITE_LIT));
    }
    expr(p)
}
