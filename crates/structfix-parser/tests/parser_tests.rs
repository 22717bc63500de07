//! Parser integration tests.
//!
//! Each test parses a Go snippet, then checks the CST shape through
//! `debug_tree` snapshots or by collecting nodes of a given kind.

use insta::assert_snapshot;
use structfix_parser::ast::expr::{CompositeLit, Element, Expr};
use structfix_parser::ast::item::{Decl, SourceFile};
use structfix_parser::ast::ty::Type;
use structfix_parser::ast::AstNode;
use structfix_parser::{debug_tree, parse, SyntaxKind, SyntaxNode};

fn parse_ok(source: &str) -> SyntaxNode {
    let parse = parse(source);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors());
    let root = parse.syntax();
    assert_eq!(root.to_string(), source, "tree must reproduce the source");
    root
}

/// Text of every node of `kind`, in preorder.
fn texts(root: &SyntaxNode, kind: SyntaxKind) -> Vec<String> {
    root.descendants()
        .filter(|n| n.kind() == kind)
        .map(|n| n.text().to_string())
        .collect()
}

fn in_func(body: &str) -> String {
    format!("package p\n\nfunc f() {{\n{body}\n}}\n")
}

// ── Basic shape ────────────────────────────────────────────────────────

#[test]
fn package_clause_only() {
    let root = parse_ok("package p\n");
    assert_snapshot!(debug_tree(&root), @r#"
    SOURCE_FILE@0..10
      PACKAGE_CLAUSE@0..9
        PACKAGE_KW@0..7 "package"
        WHITESPACE@7..8 " "
        NAME@8..9
          IDENT@8..9 "p"
      NEWLINE@9..10 "\n"
      EOF@10..10 ""
    "#);
}

#[test]
fn whole_file_round_trips() {
    let source = r#"package sample

import (
	"fmt"
	str "strings"
)

// Config is configured.
type Config struct {
	Name   string `json:"name"`
	Server struct {
		Host string
		Port int
	}
	*Embedded
	fmt.Stringer
	List[int]
	a, b []int
}

type List[T any] struct{ items []T }

type Number interface {
	~int | ~float64
	String() string
}

const (
	A = iota
	B
)

var x, y = 1, 2

func (l *List[T]) Push(v T) { l.items = append(l.items, v) }

func Run(ctx context.Context, names ...string) (n int, err error) {
	cfg := Config{Name: "x", Server: {Host: "h", Port: 80}}
	for i, name := range names {
		if name == "" {
			continue
		} else if i > 3 {
			break
		}
		n += len(name)
	}
	for i := 0; i < 10; i++ {
		defer func() { _ = i }()
	}
	switch v := any(cfg).(type) {
	case Config, *Config:
		fmt.Println(v)
	default:
	}
	ch := make(chan int, 1)
	select {
	case ch <- 1:
	case v, ok := <-ch:
		_, _ = v, ok
	}
	go func(c <-chan int) {}(ch)
	m := map[string][]int{"a": {1, 2}}
	_ = m["a"][1:2]
	_ = str.ToUpper(cfg.Name) /* trailing */
	p := &Config{}
	if p != nil && !false {
		goto done
	}
done:
	return n, nil
}
"#;
    let root = parse_ok(source);

    let file = SourceFile::cast(root.clone()).unwrap();
    assert_eq!(file.package_name().as_deref(), Some("sample"));
    let imports: Vec<_> = file.imports().filter_map(|i| i.local_name()).collect();
    assert_eq!(imports, vec!["fmt", "str"]);
    assert_eq!(file.decls().filter(|d| matches!(d, Decl::Func(_))).count(), 2);

    assert_eq!(texts(&root, SyntaxKind::RANGE_CLAUSE), vec!["i, name := range names"]);
    assert_eq!(texts(&root, SyntaxKind::SEND_STMT), vec!["ch <- 1"]);
    assert_eq!(texts(&root, SyntaxKind::LABELED_STMT), vec!["done:\n\treturn n, nil"]);
    assert_eq!(texts(&root, SyntaxKind::TYPE_ASSERT_EXPR), vec!["any(cfg).(type)"]);
    assert_eq!(texts(&root, SyntaxKind::UNION_TYPE), vec!["~int | ~float64"]);
    assert_eq!(texts(&root, SyntaxKind::SLICE_EXPR), vec![r#"m["a"][1:2]"#]);
}

// ── Composite literals ─────────────────────────────────────────────────

#[test]
fn nested_literal_without_type_is_elided() {
    let root = parse_ok("package p\n\nvar o = Outer{Inner: {X: 1}, 2}\n");

    let lits: Vec<CompositeLit> = root.descendants().filter_map(CompositeLit::cast).collect();
    assert_eq!(lits.len(), 2);

    let outer = &lits[0];
    assert!(matches!(outer.ty(), Some(Type::Name(ref n)) if n.text() == "Outer"));
    let elements: Vec<Element> = outer.literal_value().unwrap().elements().collect();
    assert_eq!(elements.len(), 2);

    let Element::Keyed(keyed) = &elements[0] else {
        panic!("expected a keyed element, got {:?}", elements[0]);
    };
    assert!(matches!(keyed.key(), Some(Expr::NameRef(ref k)) if k.text() == "Inner"));
    let Some(Expr::CompositeLit(inner)) = keyed.value() else {
        panic!("expected a composite literal value");
    };
    assert!(inner.is_elided());
    assert_eq!(inner.syntax().text().to_string(), "{X: 1}");
    assert_eq!(inner, lits[1]);

    assert!(matches!(elements[1], Element::Positional(Expr::Literal(_))));
}

#[test]
fn elided_literal_starts_at_its_brace() {
    let root = parse_ok("package p\n\nvar o = T{\n\tA: /* c */ {\n\t\tB: 1,\n\t},\n}\n");
    let texts = texts(&root, SyntaxKind::COMPOSITE_LIT);
    assert_eq!(texts[1], "{\n\t\tB: 1,\n\t}");
}

#[test]
fn type_literal_composites() {
    let root = parse_ok(
        "package p\n\nvar a = []T{{X: 1}}\nvar b = map[string]struct{ X int }{\"k\": {X: 2}}\nvar c = [...]int{1, 2}\nvar d = pkg.T{}\nvar e = G[int]{V: 1}\n",
    );
    let types: Vec<SyntaxKind> = root
        .descendants()
        .filter_map(CompositeLit::cast)
        .map(|lit| lit.ty().map_or(SyntaxKind::TOMBSTONE, |t| t.syntax().kind()))
        .collect();
    assert_eq!(
        types,
        vec![
            SyntaxKind::SLICE_TYPE,
            SyntaxKind::TOMBSTONE,
            SyntaxKind::MAP_TYPE,
            SyntaxKind::TOMBSTONE,
            SyntaxKind::ARRAY_TYPE,
            SyntaxKind::SELECTOR_EXPR,
            SyntaxKind::INDEX_EXPR,
        ]
    );
}

#[test]
fn no_composite_after_name_in_if_header() {
    let root = parse_ok(&in_func("\tif x == T {\n\t}\n\tif x == (T{}) {\n\t}"));
    assert_eq!(texts(&root, SyntaxKind::COMPOSITE_LIT), vec!["T{}"]);
    assert_eq!(texts(&root, SyntaxKind::IF_STMT).len(), 2);
}

#[test]
fn composite_allowed_inside_header_brackets() {
    let root = parse_ok(&in_func("\tfor _, v := range f(T{1}) {\n\t\t_ = v\n\t}"));
    assert_eq!(texts(&root, SyntaxKind::COMPOSITE_LIT), vec!["T{1}"]);
}

// ── Declarations ───────────────────────────────────────────────────────

#[test]
fn struct_fields_named_embedded_and_tagged() {
    let root = parse_ok(
        "package p\n\ntype S struct {\n\tA, B int\n\tInner struct{ X int } `json:\"inner\"`\n\tio.Reader\n\t*Base\n}\n",
    );
    let file = SourceFile::cast(root).unwrap();
    let Some(Decl::Type(decl)) = file.decls().next() else {
        panic!("expected a type declaration");
    };
    let spec = decl.specs().next().unwrap();
    assert_eq!(spec.name().unwrap().text(), "S");
    let Some(Type::Struct(record)) = spec.ty() else {
        panic!("expected a struct type");
    };

    let fields: Vec<_> = record.fields().collect();
    assert_eq!(fields.len(), 4);

    let names: Vec<String> = fields[0].names().map(|n| n.text()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert!(matches!(fields[1].ty(), Some(Type::Struct(_))));
    assert_eq!(fields[1].tag().unwrap().text(), "`json:\"inner\"`");
    assert!(fields[2].is_embedded());
    assert!(matches!(fields[2].ty(), Some(Type::Qualified(_))));
    assert!(fields[3].is_embedded());
    assert!(matches!(fields[3].ty(), Some(Type::Pointer(_))));

    assert_eq!(record.field_named("B").unwrap().syntax(), fields[0].syntax());
    assert!(record.field_named("Reader").is_none());
}

#[test]
fn parameter_names_are_recovered_from_grouped_lists() {
    let root = parse_ok("package p\n\nfunc f(a, b int, c string) {}\n\nfunc g(int, string) {}\n");
    assert_eq!(texts(&root, SyntaxKind::NAME), vec!["p", "f", "a", "b", "c", "g"]);
    assert_eq!(texts(&root, SyntaxKind::NAME_REF), vec!["int", "string", "int", "string"]);
}

#[test]
fn type_parameters_versus_array_length() {
    let root = parse_ok("package p\n\ntype A [N]int\n\ntype L[T any] struct{ v T }\n\ntype P[K comparable, V any] map[K]V\n");
    assert_eq!(texts(&root, SyntaxKind::ARRAY_TYPE), vec!["[N]int"]);
    assert_eq!(texts(&root, SyntaxKind::TYPE_PARAM_LIST), vec!["[T any]", "[K comparable, V any]"]);
}

#[test]
fn alias_and_defined_types() {
    let root = parse_ok("package p\n\ntype (\n\tA = B\n\tC B\n)\n");
    let file = SourceFile::cast(root).unwrap();
    let Some(Decl::Type(decl)) = file.decls().next() else {
        panic!("expected a type declaration");
    };
    let specs: Vec<(String, bool)> = decl
        .specs()
        .map(|spec| (spec.name().unwrap().text(), spec.is_alias()))
        .collect();
    assert_eq!(specs, vec![("A".to_string(), true), ("C".to_string(), false)]);
}

#[test]
fn local_type_declaration() {
    let root = parse_ok(&in_func("\ttype local struct{ X struct{ Y int } }\n\t_ = local{X: {Y: 1}}"));
    assert_eq!(texts(&root, SyntaxKind::TYPE_SPEC), vec!["local struct{ X struct{ Y int } }"]);
    assert_eq!(texts(&root, SyntaxKind::COMPOSITE_LIT), vec!["local{X: {Y: 1}}", "{Y: 1}"]);
}

// ── Expressions ────────────────────────────────────────────────────────

#[test]
fn binary_precedence() {
    let root = parse_ok("package p\n\nvar v = a || b && c == d + e*f\n");
    assert_eq!(
        texts(&root, SyntaxKind::BINARY_EXPR),
        vec!["a || b && c == d + e*f", "b && c == d + e*f", "c == d + e*f", "d + e*f", "e*f"]
    );
}

#[test]
fn unary_binds_tighter_than_binary() {
    let root = parse_ok("package p\n\nvar v = -a.b * *c\n");
    assert_eq!(texts(&root, SyntaxKind::UNARY_EXPR), vec!["-a.b", "*c"]);
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn missing_expression_is_reported() {
    let source = "package p\nvar x = {";
    let parse = parse(source);
    assert_eq!(parse.errors().len(), 1);
    let err = &parse.errors()[0];
    assert_eq!(err.message, "expected expression");
    assert_eq!((err.span.start, err.span.end), (18, 19));
    assert_eq!(parse.syntax().to_string(), source);
}

#[test]
fn unclosed_literal_points_at_its_brace() {
    let source = "package p\nvar o = T{1,";
    let parse = parse(source);
    let err = &parse.errors()[0];
    assert_eq!(err.message, "expected `}`");
    assert_eq!((err.span.start, err.span.end), (22, 22));
    let (label, opened) = err.related.clone().unwrap();
    assert_eq!(label, "literal value starts here");
    assert_eq!((opened.start, opened.end), (19, 20));
}

#[test]
fn missing_package_clause() {
    let parse = parse("func f() {}\n");
    assert!(!parse.ok());
    assert_eq!(parse.errors()[0].message, "expected `package`");
}
