//! Integration tests for end-to-end compilation.
//!
//! These tests run the complete pipeline from source text through parsing,
//! validation, the semantic transform and C emission.

use palu::{
    compile,
    errors::errors::{ErrorCategory, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    transpiler::transpiler::TranspileOptions,
};
use pretty_assertions::assert_eq;

const FIB: &str = "mod fib
type bytes = *u8
external fn printf(fmt: bytes, ...) -> i32
fn fib(n: i32) -> i32 do
  if n == 1 do return 0 end
  if n == 2 do return 1 end
  return fib(n-1) + fib(n-2)
end
";

fn transpiled(source: &str) -> String {
    compile(source, &TranspileOptions::default()).unwrap()
}

#[test]
fn test_compile_fib() {
    assert_eq!(
        transpiled(FIB),
        "typedef u8* bytes;extern i32 printf(bytes fmt,...);i32 fib_fib(i32 n) {if((n) == (1)) {return 0;}if((n) == (2)) {return 1;}return (fib((n) - (1))) + (fib((n) - (2)));}"
    );
}

#[test]
fn test_compile_is_deterministic() {
    assert_eq!(transpiled(FIB), transpiled(FIB));
}

#[test]
fn test_compile_with_prelude() {
    let options = TranspileOptions { emit_prelude: true };
    let code = compile(FIB, &options).unwrap();

    assert!(code.starts_with("#include <stdbool.h>"));
    assert!(code.ends_with(&transpiled(FIB)));
}

#[test]
fn test_comments_and_whitespace_are_dropped() {
    let source = "// counter\nlet  a : i32 =  1 /* one */\n\n\ta += 2";
    assert_eq!(transpiled(source), "i32 a = 1;a += (2);");
}

#[test]
fn test_empty_source() {
    assert_eq!(transpiled(""), "");
    assert_eq!(transpiled("; ;"), "");
}

#[test]
fn test_loop_with_function_call() {
    let source = "external fn step(i: i32) -> i32
fn run(limit: i32) -> i32 do
  let i: i32 = 0
  while i < limit do
    i = step(i)
  end
  return i
end";

    assert_eq!(
        transpiled(source),
        "extern i32 step(i32 i);i32 run(i32 limit) {i32 i = 0;while((i) < (limit)) {i = (step(i));}return i;}"
    );
}

#[test]
fn test_syntax_error_is_reported_with_position() {
    let error = compile("let a: i32 = 1\nlet b: i32 = #", &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 13);
}

#[test]
fn test_missing_end_is_a_syntax_error() {
    let error = compile("while true do", &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert!(matches!(error.get_impl(), ErrorImpl::MissingSyntax { .. }));
}

#[test]
fn test_semantic_errors_stop_the_pipeline() {
    let unresolved = compile("fn f() -> i32 do return g() end", &TranspileOptions::default())
        .unwrap_err();
    assert_eq!(unresolved.category(), ErrorCategory::Semantic);
    assert_eq!(
        unresolved.get_impl(),
        &ErrorImpl::UnresolvedSymbol {
            name: String::from("g")
        }
    );

    let redefined = compile("type t = i32\ntype t = u8", &TranspileOptions::default()).unwrap_err();
    assert_eq!(redefined.get_error_name(), "Redefinition");
}

#[test]
fn test_recursion_through_a_module_path() {
    let source = "mod math
fn fact(n: u64) -> u64 do
  return n == 0 ? 1 : n * math.fact(n - 1)
end";

    assert_eq!(
        transpiled(source),
        "u64 math_fact(u64 n) {return ((n) == (0)) ? (1) : ((n) * (math_fact((n) - (1))));}"
    );
}

#[test]
fn test_tokens_and_tree_agree() {
    let tokens = tokenize(FIB);
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));

    let tree = parse(FIB);
    assert_eq!(tree.root_node().get_kind(), "source_file");
    assert_eq!(tree.source(), FIB);
}

#[test]
fn test_call_through_function_type_alias() {
    assert_eq!(
        transpiled("type callback = fn(i32) -> i32\nexternal cb: callback\nlet r: i32 = cb(1)"),
        "typedef i32 (*callback)(i32);extern callback cb;i32 r = cb(1);"
    );
    assert_eq!(
        transpiled("type op = fn(i32) -> i32\nfn apply(f: op, x: i32) -> i32 do return f(x) end"),
        "typedef i32 (*op)(i32);i32 apply(op f,i32 x) {return f(x);}"
    );
}
