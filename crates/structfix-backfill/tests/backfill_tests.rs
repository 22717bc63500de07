//! Backfill behavior on whole Go files.

use structfix_backfill::{collect_rewrites, fix_file, BackfillError, FixedFile};
use structfix_parser::ast::AstNode;
use structfix_parser::{parse, SyntaxNode};
use structfix_resolve::{resolve_package, BindingTable, FileId};

const OUTER: &str = "type Outer struct {\n\tInner struct { X int }\n}\n";

struct Package {
    files: Vec<(FileId, SyntaxNode)>,
    bindings: BindingTable,
}

impl Package {
    fn new(sources: &[&str]) -> Self {
        let files: Vec<(FileId, SyntaxNode)> = sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let parse = parse(source);
                assert!(parse.ok(), "unexpected errors: {:?}", parse.errors());
                (FileId(i as u32), parse.syntax())
            })
            .collect();
        let bindings = resolve_package(&files);
        Package { files, bindings }
    }

    fn fix(&self, file: usize) -> Result<FixedFile, BackfillError> {
        let (id, root) = &self.files[file];
        fix_file(*id, root, &self.bindings)
    }
}

fn go(body: &str) -> String {
    format!("package p\n\n{body}")
}

/// Fix a one-file package and return its text.
fn fix_text(source: &str) -> String {
    Package::new(&[source]).fix(0).unwrap().text()
}

// ── Rewrites ───────────────────────────────────────────────────────────

#[test]
fn elided_value_of_inline_struct_field_gets_its_type() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{Inner: {{X: 1}}}}\n"));
    let expected = go(&format!("{OUTER}\nvar o = Outer{{Inner: struct {{ X int }}{{X: 1}}}}\n"));

    let fixed = Package::new(&[&source]).fix(0).unwrap();
    assert_eq!(fixed.text(), expected);
    assert_eq!(fixed.rewrite_count(), 1);
    assert!(fixed.is_changed());
}

#[test]
fn rewrite_targets_the_value_literal() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{Inner: {{X: 1}}}}\n"));
    let pkg = Package::new(&[&source]);
    let (id, root) = &pkg.files[0];

    let rewrites = collect_rewrites(*id, root, &pkg.bindings).unwrap();
    assert_eq!(rewrites.len(), 1);
    let range = rewrites[0].literal;
    assert_eq!(&source[usize::from(range.start())..usize::from(range.end())], "{X: 1}");
    assert_eq!(rewrites[0].record.syntax().to_string(), "struct { X int }");
}

#[test]
fn comments_and_layout_are_preserved() {
    let decl = "type Outer struct {\n\t// Inner is inline.\n\tInner struct { X int } // trailing\n}\n";
    let source = go(&format!(
        "{decl}\nvar o = Outer{{\n\t// leading\n\tInner: /* here */ {{X: 1}}, // after\n}}\n"
    ));
    let expected = go(&format!(
        "{decl}\nvar o = Outer{{\n\t// leading\n\tInner: /* here */ struct {{ X int }}{{X: 1}}, // after\n}}\n"
    ));
    assert_eq!(fix_text(&source), expected);
}

#[test]
fn nested_inline_structs_are_filled_in_one_pass() {
    let b_ty = "struct {\n\t\tC struct {\n\t\t\tD int\n\t\t}\n\t}";
    let c_ty = "struct {\n\t\t\tD int\n\t\t}";
    let decl = format!("type A struct {{\n\tB {b_ty}\n}}\n");
    let source = go(&format!("{decl}\nvar a = A{{B: {{C: {{D: 1}}}}}}\n"));
    let expected = go(&[&decl, "\nvar a = A{B: ", b_ty, "{C: ", c_ty, "{D: 1}}}\n"].concat());

    let fixed = Package::new(&[&source]).fix(0).unwrap();
    assert_eq!(fixed.text(), expected);
    assert_eq!(fixed.rewrite_count(), 2);
}

#[test]
fn output_is_a_fixed_point() {
    let decl = "type A struct {\n\tB struct {\n\t\tC struct {\n\t\t\tD int\n\t\t}\n\t}\n}\n";
    let source = go(&format!("{decl}\nvar a = A{{B: {{C: {{D: 1}}}}}}\n"));

    let once = fix_text(&source);
    assert_ne!(once, source);

    let again = Package::new(&[&once]).fix(0).unwrap();
    assert_eq!(again.text(), once);
    assert!(!again.is_changed());
}

#[test]
fn differently_spelled_inline_type_is_replaced() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{Inner: struct{{X int}}{{X: 1}}}}\n"));
    let expected = go(&format!("{OUTER}\nvar o = Outer{{Inner: struct {{ X int }}{{X: 1}}}}\n"));
    assert_eq!(fix_text(&source), expected);
}

#[test]
fn type_chains_and_parentheses_are_followed() {
    let source = go(&format!(
        "{OUTER}\ntype Alias Outer\n\ntype Wrapped (Outer)\n\nvar a = Alias{{Inner: {{X: 1}}}}\nvar b = Wrapped{{Inner: {{X: 2}}}}\n"
    ));
    let expected = go(&format!(
        "{OUTER}\ntype Alias Outer\n\ntype Wrapped (Outer)\n\nvar a = Alias{{Inner: struct {{ X int }}{{X: 1}}}}\nvar b = Wrapped{{Inner: struct {{ X int }}{{X: 2}}}}\n"
    ));
    assert_eq!(fix_text(&source), expected);
}

#[test]
fn literals_inside_function_bodies_and_calls() {
    let source = go(&format!("{OUTER}\nfunc f() {{\n\tuse(Outer{{Inner: {{X: 1}}}})\n}}\n"));
    let expected = go(&format!(
        "{OUTER}\nfunc f() {{\n\tuse(Outer{{Inner: struct {{ X int }}{{X: 1}}}})\n}}\n"
    ));
    assert_eq!(fix_text(&source), expected);
}

#[test]
fn local_type_declaration() {
    let source = go("func f() {\n\ttype local struct{ In struct{ Y int } }\n\t_ = local{In: {Y: 1}}\n}\n");
    let expected = go("func f() {\n\ttype local struct{ In struct{ Y int } }\n\t_ = local{In: struct{ Y int }{Y: 1}}\n}\n");
    assert_eq!(fix_text(&source), expected);
}

#[test]
fn non_literal_values_are_searched() {
    let decl = "type Outer struct {\n\tInner struct{ X int }\n\tNext  *Outer\n}\n";
    let source = go(&format!("{decl}\nvar o = Outer{{Next: &Outer{{Inner: {{X: 2}}}}}}\n"));
    let expected = go(&format!(
        "{decl}\nvar o = Outer{{Next: &Outer{{Inner: struct{{ X int }}{{X: 2}}}}}}\n"
    ));
    assert_eq!(fix_text(&source), expected);
}

// ── Cross-file resolution ──────────────────────────────────────────────

#[test]
fn declaration_in_sibling_file() {
    let decl_file = go(OUTER);
    let lit_file = go("var o = Outer{Inner: {X: 1}}\n");
    let pkg = Package::new(&[&decl_file, &lit_file]);

    let decls = pkg.fix(0).unwrap();
    assert!(!decls.is_changed());
    assert_eq!(decls.text(), decl_file);

    let literals = pkg.fix(1).unwrap();
    assert_eq!(literals.text(), go("var o = Outer{Inner: struct { X int }{X: 1}}\n"));
}

#[test]
fn same_rewrite_within_one_file() {
    let lit = "var o = Outer{Inner: {X: 1}}\n";
    let together = fix_text(&go(&format!("{OUTER}\n{lit}")));
    let split = Package::new(&[&go(OUTER), &go(lit)]).fix(1).unwrap().text();

    let fixed_line = "var o = Outer{Inner: struct { X int }{X: 1}}\n";
    assert!(together.ends_with(fixed_line));
    assert!(split.ends_with(fixed_line));
}

#[test]
fn explicit_value_type_is_overwritten() {
    let source = go(&format!(
        "{OUTER}\ntype Foo struct{{ X int }}\n\nvar a = Outer{{Inner: Foo{{X: 1}}}}\nvar b = Outer{{Inner: pkg.T{{X: 2}}}}\nvar c = Outer{{Inner: G[int]{{X: 3}}}}\n"
    ));
    let expected = go(&format!(
        "{OUTER}\ntype Foo struct{{ X int }}\n\nvar a = Outer{{Inner: struct {{ X int }}{{X: 1}}}}\nvar b = Outer{{Inner: struct {{ X int }}{{X: 2}}}}\nvar c = Outer{{Inner: struct {{ X int }}{{X: 3}}}}\n"
    ));

    let fixed = Package::new(&[&source]).fix(0).unwrap();
    assert_eq!(fixed.text(), expected);
    assert_eq!(fixed.rewrite_count(), 3);
    assert_eq!(fix_text(&expected), expected);
}

#[test]
fn value_type_declared_later_is_overwritten() {
    let source = "package p\ntype O struct { In struct{ X int } }\nvar o = O{In: P{X: 1}}\ntype P struct{ X int }\n";
    assert_eq!(
        fix_text(source),
        "package p\ntype O struct { In struct{ X int } }\nvar o = O{In: struct{ X int }{X: 1}}\ntype P struct{ X int }\n"
    );
}

#[test]
fn overwritten_value_keys_are_checked() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{Inner: pkg.T{{\"X\": 1}}}}\n"));
    let err = Package::new(&[&source]).fix(0).unwrap_err();
    let BackfillError::NonIdentifierKey { key, .. } = err;
    assert_eq!(key, "\"X\"");
}

// ── Left alone ─────────────────────────────────────────────────────────

#[test]
fn literals_under_named_field_types_are_untouched() {
    let source = go(
        "type Named struct {\n\tIn struct{ Y int }\n}\n\ntype Outer struct {\n\tNamed Named\n}\n\nvar o = Outer{Named: {In: {Y: 1}}}\n",
    );
    let fixed = Package::new(&[&source]).fix(0).unwrap();
    assert_eq!(fixed.text(), source);
    assert_eq!(fixed.rewrite_count(), 0);
}


#[test]
fn unknown_and_embedded_keys_are_untouched() {
    let source = go(
        "type Inner struct{ X int }\n\ntype Outer struct {\n\tInner\n\tOther struct{ Y int }\n}\n\nvar a = Outer{Inner: {X: 1}}\nvar b = Outer{Missing: {Y: 1}}\n",
    );
    assert_eq!(fix_text(&source), source);
}

#[test]
fn collection_literals_are_untouched() {
    let source = go(&format!(
        "{OUTER}\nvar s = []Outer{{{{Inner: {{X: 1}}}}}}\nvar m = map[string]Outer{{\"k\": {{Inner: {{X: 2}}}}}}\n"
    ));
    assert_eq!(fix_text(&source), source);
}

#[test]
fn qualified_and_unbound_types_are_opaque() {
    let source = go("var a = pkg.Outer{Inner: {X: 1}}\nvar b = Unknown{Inner: {X: 1}}\n");
    assert_eq!(fix_text(&source), source);
}

#[test]
fn cyclic_type_declarations_terminate() {
    let source = go("type A B\n\ntype B A\n\ntype C (C)\n\nvar a = A{X: {}}\nvar c = C{X: {}}\n");
    assert_eq!(fix_text(&source), source);
}

#[test]
fn input_tree_is_not_mutated() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{Inner: {{X: 1}}}}\n"));
    let pkg = Package::new(&[&source]);
    let fixed = pkg.fix(0).unwrap();
    assert!(fixed.is_changed());
    assert_eq!(pkg.files[0].1.to_string(), source);
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn non_identifier_key_is_rejected() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{\"Inner\": {{X: 1}}}}\n"));
    let err = Package::new(&[&source]).fix(0).unwrap_err();

    let start = source.find("\"Inner\"").unwrap() as u32;
    let BackfillError::NonIdentifierKey { key, span } = &err;
    assert_eq!(key, "\"Inner\"");
    assert_eq!((span.start, span.end), (start, start + 7));
    assert_eq!(err.to_string(), "key `\"Inner\"` of a struct literal is not a field name");
}

#[test]
fn non_identifier_key_in_nested_record_is_rejected() {
    let source = go(&format!("{OUTER}\nvar o = Outer{{Inner: {{X: 1, 2: 3}}}}\n"));
    let err = Package::new(&[&source]).fix(0).unwrap_err();
    assert!(matches!(err, BackfillError::NonIdentifierKey { ref key, .. } if key == "2"));
}

#[test]
fn non_identifier_keys_in_opaque_literals_are_fine() {
    let source = go("var m = map[string]int{\"a\": 1}\nvar s = []int{0: 1, 4: 2}\n");
    assert_eq!(fix_text(&source), source);
}
