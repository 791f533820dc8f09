//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Declarations, type aliases and external imports
//! - Function definitions and parameter lists
//! - Expressions and operator precedence
//! - Control flow statements
//! - Error and missing nodes

use crate::cst::node::{CstNode, SyntaxNode};

use super::parser::parse;

const IDENT: &str = "(expr (ident_expr (ident)))";

fn sexp(source: &str) -> String {
    parse(source).root_node().to_sexp()
}

fn first_stmt_inner(root: &CstNode) -> &CstNode {
    let stmt = root.named_children()[0];
    assert_eq!(stmt.kind(), "stmt");
    stmt.first_named_child().unwrap()
}

#[test]
fn test_parse_declaration() {
    assert_eq!(
        sexp("let x: i32 = 1"),
        "(source_file (stmt (declare typed_ident: (typed_ident ident: (ident) typing: (type_expr (ident_expr (ident)))) initial: (expr (number_literal)))))"
    );
}

#[test]
fn test_parse_declaration_without_initializer() {
    let tree = parse("let x: i32");
    let declare = first_stmt_inner(tree.root_node());

    assert_eq!(declare.kind(), "declare");
    assert!(declare.child_by_field_name("typed_ident").is_some());
    assert!(declare.child_by_field_name("initial").is_none());
}

#[test]
fn test_binary_is_left_associative() {
    let inner = format!("(binary_expr left: {IDENT} right: {IDENT})");
    let outer = format!("(binary_expr left: (expr {inner}) right: {IDENT})");

    assert_eq!(sexp("a - b - c"), format!("(source_file (stmt (expr {outer})))"));
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let product = format!("(binary_expr left: {IDENT} right: {IDENT})");
    let sum = format!("(binary_expr left: {IDENT} right: (expr {product}))");

    assert_eq!(sexp("a + b * c"), format!("(source_file (stmt (expr {sum})))"));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let unary = format!("(unary_expr argument: {IDENT})");
    let product = format!("(binary_expr left: (expr {unary}) right: {IDENT})");

    assert_eq!(sexp("-a * b"), format!("(source_file (stmt (expr {product})))"));
}

#[test]
fn test_assignment_is_right_associative() {
    let inner = format!("(assignment_expr left: {IDENT} right: {IDENT})");
    let outer = format!("(assignment_expr left: {IDENT} right: (expr {inner}))");

    assert_eq!(sexp("a = b = c"), format!("(source_file (stmt (expr {outer})))"));
}

#[test]
fn test_parse_conditional() {
    let cond = format!("(cond_expr condition: {IDENT} consequence: {IDENT} alternative: {IDENT})");

    assert_eq!(sexp("a ? b : c"), format!("(source_file (stmt (expr {cond})))"));
}

#[test]
fn test_parse_call_with_dotted_name() {
    let tree = parse("io.print(1, \"two\")");
    let expr = first_stmt_inner(tree.root_node());
    let call = expr.first_named_child().unwrap();

    assert_eq!(call.kind(), "call_expr");

    let name = call.child_by_field_name("func_name").unwrap();
    assert_eq!(name.kind(), "ident_expr");
    assert_eq!(name.named_children().len(), 2);

    let args = call.child_by_field_name("args").unwrap();
    assert_eq!(args.kind(), "argument_list");
    assert_eq!(args.named_children().len(), 2);
    assert_eq!(args.children().len(), 5);
}

#[test]
fn test_call_with_no_arguments() {
    let call = "(call_expr func_name: (ident_expr (ident)) args: (argument_list))";

    assert_eq!(sexp("f()"), format!("(source_file (stmt (expr {call})))"));
}

#[test]
fn test_parse_function() {
    let tree = parse("fn add(a: i32, b: i32) -> i32 do return a + b end");
    let func = first_stmt_inner(tree.root_node());

    assert_eq!(func.kind(), "func");
    assert_eq!(func.child_by_field_name("func_name").unwrap().kind(), "ident");

    let params = func.child_by_field_name("params").unwrap();
    assert_eq!(params.named_children().len(), 2);

    let body = func.child_by_field_name("body").unwrap();
    assert_eq!(body.kind(), "codeblock");
    assert_eq!(body.named_children()[0].first_named_child().unwrap().kind(), "return");
}

#[test]
fn test_parse_variadic_external_function() {
    let tree = parse("external fn printf(fmt: *u8, ...) -> i32");
    let external = first_stmt_inner(tree.root_node());

    assert_eq!(external.kind(), "external");
    let function = external.first_named_child().unwrap();
    assert_eq!(function.kind(), "external_function");

    let params: Vec<&str> = function
        .child_by_field_name("params")
        .unwrap()
        .named_children()
        .into_iter()
        .map(|param| param.get_kind())
        .collect();
    assert_eq!(params, vec!["typed_ident", "variadic"]);
}

#[test]
fn test_parse_external_variable() {
    assert_eq!(
        sexp("external errno: i32"),
        "(source_file (stmt (external (external_variable typed_ident: (typed_ident ident: (ident) typing: (type_expr (ident_expr (ident))))))))"
    );
}

#[test]
fn test_parse_type_forms() {
    let tree = parse("type cb = fn(i32, []u8) -> *[4]i32");
    let alias = first_stmt_inner(tree.root_node());
    assert_eq!(alias.kind(), "type_alias");

    let func_type = alias
        .child_by_field_name("typing")
        .unwrap()
        .first_named_child()
        .unwrap();
    assert_eq!(func_type.kind(), "func_type");

    let params: Vec<&str> = func_type
        .child_by_field_name("params")
        .unwrap()
        .named_children()
        .into_iter()
        .map(|param| param.first_named_child().unwrap().get_kind())
        .collect();
    assert_eq!(params, vec!["ident_expr", "slice_type"]);

    let pointer = func_type
        .child_by_field_name("returns")
        .unwrap()
        .first_named_child()
        .unwrap();
    assert_eq!(pointer.kind(), "pointer_type");

    let array = pointer
        .child_by_field_name("pointee")
        .unwrap()
        .first_named_child()
        .unwrap();
    assert_eq!(array.kind(), "array_type");
    assert_eq!(array.child_by_field_name("size").unwrap().kind(), "number_literal");
}

#[test]
fn test_parse_else_if_chain() {
    let tree = parse("if a do end else if b do end else do end");
    let outer = first_stmt_inner(tree.root_node());

    let alternative = outer.child_by_field_name("alternative").unwrap();
    assert_eq!(alternative.kind(), "if");
    assert_eq!(
        alternative.child_by_field_name("alternative").unwrap().kind(),
        "codeblock"
    );
}

#[test]
fn test_parse_while_and_empty_statement() {
    let tree = parse("while x < 10 do ; end");
    let while_node = first_stmt_inner(tree.root_node());

    assert_eq!(while_node.kind(), "while");
    let body = while_node.child_by_field_name("body").unwrap();
    assert_eq!(body.named_children()[0].first_named_child().unwrap().kind(), "empty");
}

#[test]
fn test_parse_fib_without_errors() {
    let source = "mod fib
type bytes = *u8
external fn printf(fmt: bytes, ...) -> i32
fn fib(n: i32) -> i32 do
  if n == 1 do return 0 end
  if n == 2 do return 1 end
  return fib(n-1) + fib(n-2)
end
";
    let tree = parse(source);
    let stmts = tree.root_node().named_children();

    assert_eq!(stmts.len(), 4);
    assert!(stmts.iter().all(|stmt| stmt.kind() == "stmt"));
    assert!(!tree.root_node().to_sexp().contains("ERROR"));
    assert!(!tree.root_node().to_sexp().contains("MISSING"));
}

#[test]
fn test_unexpected_token_becomes_error_node() {
    let tree = parse("let x: i32 = 1\nlet y: i32 = @ 2");
    let children = tree.root_node().named_children();

    assert_eq!(children.len(), 2);
    let error = children[1];
    assert!(error.has_error());
    assert_eq!(error.start_point().line, 1);
    assert_eq!(error.start_point().column, 13);
}

#[test]
fn test_missing_end_becomes_missing_node() {
    let tree = parse("fn f() -> i32 do");
    let children = tree.root_node().children();

    let missing = children.last().unwrap();
    assert!(missing.is_missing());
    assert_eq!(missing.kind(), "end");
    assert_eq!(missing.start_byte(), missing.end_byte());
    assert_eq!(missing.start_byte(), 16);
}

#[test]
fn test_call_on_parenthesized_expression_is_an_error() {
    let tree = parse("(a)(1)");
    let error = tree.root_node().children()[0];

    assert!(error.has_error());
    assert_eq!(error.start_point().column, 3);
}
