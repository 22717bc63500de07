//! Statements and blocks.
//!
//! `if`, `for` and `switch` headers are parsed with composite literals after
//! bare names disabled, so `if x == T {` reads `{` as the start of the body.

use crate::syntax_kind::SyntaxKind;

use super::{expressions, items, MarkClosed, Parser};

/// `{ stmts }`
pub(crate) fn block(p: &mut Parser) {
    let m = p.open();
    let opened_at = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        p.close(m, SyntaxKind::BLOCK);
        return;
    }
    p.with_composite(true, stmt_list);
    p.expect_closing(SyntaxKind::R_BRACE, opened_at, "block");
    p.close(m, SyntaxKind::BLOCK);
}

/// Statements up to a closing `}` or the next `case`/`default`.
fn stmt_list(p: &mut Parser) {
    loop {
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.has_error()
            || p.at_any(&[
                SyntaxKind::R_BRACE,
                SyntaxKind::CASE_KW,
                SyntaxKind::DEFAULT_KW,
                SyntaxKind::EOF,
            ])
        {
            break;
        }
        stmt(p);
        if p.has_error() {
            break;
        }
        p.expect_semi();
    }
}

fn stmt(p: &mut Parser) {
    match p.current() {
        SyntaxKind::CONST_KW | SyntaxKind::VAR_KW | SyntaxKind::TYPE_KW => items::decl(p),
        SyntaxKind::L_BRACE => block(p),
        SyntaxKind::IF_KW => if_stmt(p),
        SyntaxKind::FOR_KW => for_stmt(p),
        SyntaxKind::SWITCH_KW => switch_stmt(p),
        SyntaxKind::SELECT_KW => select_stmt(p),
        SyntaxKind::RETURN_KW => {
            let m = p.open();
            p.advance(); // return
            if !p.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                expressions::expr_list(p);
            }
            p.close(m, SyntaxKind::RETURN_STMT);
        }
        SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW | SyntaxKind::GOTO_KW => {
            let m = p.open();
            p.advance(); // keyword
            p.eat(SyntaxKind::IDENT); // label
            p.close(m, SyntaxKind::BRANCH_STMT);
        }
        SyntaxKind::FALLTHROUGH_KW => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::BRANCH_STMT);
        }
        SyntaxKind::GO_KW | SyntaxKind::DEFER_KW => {
            let kind = if p.at(SyntaxKind::GO_KW) {
                SyntaxKind::GO_STMT
            } else {
                SyntaxKind::DEFER_STMT
            };
            let m = p.open();
            p.advance(); // go / defer
            expressions::expr(p);
            p.close(m, kind);
        }
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::COLON => {
            let m = p.open();
            items::name(p);
            p.advance(); // :
            if !p.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                stmt(p);
            }
            p.close(m, SyntaxKind::LABELED_STMT);
        }
        _ => {
            if let Some((s, bare)) = simple_stmt(p) {
                if bare {
                    wrap_expr_stmt(p, s);
                }
            }
        }
    }
}

// ── Simple statements ──────────────────────────────────────────────────

/// Expression, send, inc/dec or assignment. A bare expression comes back
/// unwrapped with `true`; callers decide whether it is a statement or a
/// header condition.
fn simple_stmt(p: &mut Parser) -> Option<(MarkClosed, bool)> {
    let lhs = expressions::expr_list(p)?;
    Some(simple_stmt_rest(p, lhs))
}

fn simple_stmt_rest(p: &mut Parser, lhs: MarkClosed) -> (MarkClosed, bool) {
    match p.current() {
        SyntaxKind::EQ
        | SyntaxKind::COLON_EQ
        | SyntaxKind::PLUS_EQ
        | SyntaxKind::MINUS_EQ
        | SyntaxKind::STAR_EQ
        | SyntaxKind::SLASH_EQ
        | SyntaxKind::PERCENT_EQ
        | SyntaxKind::AMP_EQ
        | SyntaxKind::PIPE_EQ
        | SyntaxKind::CARET_EQ
        | SyntaxKind::SHL_EQ
        | SyntaxKind::SHR_EQ
        | SyntaxKind::AMP_CARET_EQ => {
            let m = p.open_before(lhs);
            p.advance(); // operator
            expressions::expr_list(p);
            (p.close(m, SyntaxKind::ASSIGN_STMT), false)
        }
        SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
            let m = p.open_before(lhs);
            p.advance();
            (p.close(m, SyntaxKind::INC_DEC_STMT), false)
        }
        SyntaxKind::ARROW => {
            let m = p.open_before(lhs);
            p.advance(); // <-
            expressions::expr(p);
            (p.close(m, SyntaxKind::SEND_STMT), false)
        }
        _ => (lhs, true),
    }
}

fn wrap_expr_stmt(p: &mut Parser, expr: MarkClosed) -> MarkClosed {
    let m = p.open_before(expr);
    p.close(m, SyntaxKind::EXPR_STMT)
}

// ── Compound statements ────────────────────────────────────────────────

/// `if [init;] cond { } [else if ... | else { }]`
fn if_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // if

    p.with_composite(false, |p| {
        if p.eat(SyntaxKind::SEMICOLON) {
            expressions::expr(p);
            return;
        }
        let Some((s, bare)) = simple_stmt(p) else {
            return;
        };
        if p.at(SyntaxKind::SEMICOLON) {
            if bare {
                wrap_expr_stmt(p, s);
            }
            p.advance(); // ;
            expressions::expr(p);
        } else if !bare {
            p.error("expected condition after statement");
        }
    });

    block(p);
    if p.eat(SyntaxKind::ELSE_KW) {
        if p.at(SyntaxKind::IF_KW) {
            if_stmt(p);
        } else {
            block(p);
        }
    }
    p.close(m, SyntaxKind::IF_STMT);
}

/// `for { }`, `for cond { }`, `for init; cond; post { }`, `for k, v := range x { }`
fn for_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // for
    p.with_composite(false, for_header);
    block(p);
    p.close(m, SyntaxKind::FOR_STMT);
}

fn for_header(p: &mut Parser) {
    match p.current() {
        SyntaxKind::L_BRACE => {}
        SyntaxKind::RANGE_KW => {
            let m = p.open();
            p.advance(); // range
            expressions::expr(p);
            p.close(m, SyntaxKind::RANGE_CLAUSE);
        }
        SyntaxKind::SEMICOLON => three_clause_rest(p),
        _ => {
            let Some(lhs) = expressions::expr_list(p) else {
                return;
            };
            if p.at_any(&[SyntaxKind::EQ, SyntaxKind::COLON_EQ]) && p.nth(1) == SyntaxKind::RANGE_KW {
                let m = p.open_before(lhs);
                p.advance(); // = or :=
                p.advance(); // range
                expressions::expr(p);
                p.close(m, SyntaxKind::RANGE_CLAUSE);
                return;
            }
            let (s, bare) = simple_stmt_rest(p, lhs);
            if p.at(SyntaxKind::SEMICOLON) {
                if bare {
                    wrap_expr_stmt(p, s);
                }
                three_clause_rest(p);
            } else if !bare {
                p.error("expected for loop condition");
            }
        }
    }
}

/// `; [cond] ; [post]`, starting at the first `;`.
fn three_clause_rest(p: &mut Parser) {
    p.advance(); // ;
    if !p.at(SyntaxKind::SEMICOLON) {
        expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::L_BRACE) {
        if let Some((s, bare)) = simple_stmt(p) {
            if bare {
                wrap_expr_stmt(p, s);
            }
        }
    }
}

/// Expression and type switches.
fn switch_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // switch
    p.with_composite(false, switch_header);

    let opened_at = p.current_span();
    if p.expect(SyntaxKind::L_BRACE) {
        clauses(p, SyntaxKind::CASE_CLAUSE);
        p.expect_closing(SyntaxKind::R_BRACE, opened_at, "switch body");
    }
    p.close(m, SyntaxKind::SWITCH_STMT);
}

fn switch_header(p: &mut Parser) {
    if p.at(SyntaxKind::L_BRACE) {
        return;
    }
    if !p.at(SyntaxKind::SEMICOLON) {
        let Some((s, bare)) = simple_stmt(p) else {
            return;
        };
        if !p.at(SyntaxKind::SEMICOLON) {
            // That was the tag.
            return;
        }
        if bare {
            wrap_expr_stmt(p, s);
        }
    }
    p.advance(); // ;
    if !p.at(SyntaxKind::L_BRACE) {
        simple_stmt(p);
    }
}

fn select_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // select
    let opened_at = p.current_span();
    if p.expect(SyntaxKind::L_BRACE) {
        clauses(p, SyntaxKind::COMM_CLAUSE);
        p.expect_closing(SyntaxKind::R_BRACE, opened_at, "select body");
    }
    p.close(m, SyntaxKind::SELECT_STMT);
}

/// `case ...:` / `default:` clauses of a switch (CASE_CLAUSE) or select
/// (COMM_CLAUSE).
fn clauses(p: &mut Parser, kind: SyntaxKind) {
    loop {
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.has_error() || !p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]) {
            break;
        }
        let m = p.open();
        if p.eat(SyntaxKind::CASE_KW) {
            if kind == SyntaxKind::COMM_CLAUSE {
                if let Some((s, bare)) = simple_stmt(p) {
                    if bare {
                        wrap_expr_stmt(p, s);
                    }
                }
            } else {
                expressions::expr_list(p);
            }
        } else {
            p.advance(); // default
        }
        p.expect(SyntaxKind::COLON);
        stmt_list(p);
        p.close(m, kind);
    }
}
