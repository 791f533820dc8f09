use pretty_assertions::assert_eq;

use crate::{
    ast::ast::Stmt,
    cst::validate::validate,
    errors::errors::{ErrorCategory, ErrorImpl},
    parser::parser::parse,
    semantic::{
        symbol::{SymbolKind, SymbolTable},
        transformer::{transform, CompilationUnit},
        typing::{Qualifier, Typing},
    },
};

use super::{
    prelude::{c_type, prelude},
    transpiler::{transpile, TranspileOptions, Transpiler},
    types::declarator,
};

fn unit(source: &str) -> CompilationUnit {
    let tree = parse(source);
    validate(&tree).unwrap();
    transform(tree.root_node(), source.as_bytes()).unwrap()
}

fn emit(source: &str) -> String {
    transpile(&unit(source), &TranspileOptions::default()).unwrap()
}

fn builtin(name: &str, qualifiers: Vec<Qualifier>) -> Typing {
    Typing::Ref {
        symbol: SymbolTable::builtin(name).unwrap(),
        qualifiers,
    }
}

#[test]
fn test_fib_output() {
    let source = "mod fib
type bytes = *u8
external fn printf(fmt: bytes, ...) -> i32
fn fib(n: i32) -> i32 do
  if n == 1 do return 0 end
  if n == 2 do return 1 end
  return fib(n-1) + fib(n-2)
end
";

    assert_eq!(
        emit(source),
        "typedef u8* bytes;extern i32 printf(bytes fmt,...);i32 fib_fib(i32 n) {if((n) == (1)) {return 0;}if((n) == (2)) {return 1;}return (fib((n) - (1))) + (fib((n) - (2)));}"
    );
}

#[test]
fn test_declarators() {
    let table = SymbolTable::new();

    assert_eq!(declarator(&table, &builtin("i32", vec![]), "n"), "i32 n");
    assert_eq!(
        declarator(&table, &builtin("u8", vec![Qualifier::Pointer]), "bytes"),
        "u8* bytes"
    );
    assert_eq!(
        declarator(&table, &builtin("u8", vec![Qualifier::Pointer, Qualifier::Array(4)]), "p"),
        "u8 (*p)[4]"
    );
    assert_eq!(
        declarator(&table, &builtin("u8", vec![Qualifier::Array(4), Qualifier::Pointer]), "x"),
        "u8* x[4]"
    );
    assert_eq!(
        declarator(&table, &builtin("i32", vec![Qualifier::Array(2), Qualifier::Array(3)]), "m"),
        "i32 m[2][3]"
    );
    assert_eq!(
        declarator(&table, &builtin("u8", vec![Qualifier::Slice]), "s"),
        "u8* s"
    );
    assert_eq!(
        declarator(&table, &builtin("u8", vec![Qualifier::Pointer, Qualifier::Pointer]), ""),
        "u8**"
    );
}

#[test]
fn test_function_pointer_declarator() {
    let table = SymbolTable::new();
    let callback = Typing::Signature {
        params: vec![builtin("i32", vec![]), builtin("u8", vec![Qualifier::Pointer])],
        returns: Box::new(builtin("i32", vec![])),
        variadic: false,
    };

    assert_eq!(declarator(&table, &callback, "cb"), "i32 (*cb)(i32,u8*)");
    assert_eq!(declarator(&table, &callback, ""), "i32 (*)(i32,u8*)");
}

#[test]
fn test_declarations_from_source() {
    assert_eq!(
        emit("let xs: [4]i32\nlet p: *[4]u8\nexternal counter: i64\nexternal cb: fn(i32, *u8) -> i32"),
        "i32 xs[4];u8 (*p)[4];extern i64 counter;extern i32 (*cb)(i32,u8*);"
    );
}

#[test]
fn test_empty_blocks() {
    assert_eq!(
        emit("let c: bool = true\nwhile c do end\nif c do end"),
        "bool c = true;while(c) {}if(c) {}"
    );
}

#[test]
fn test_else_and_else_if() {
    assert_eq!(
        emit("let a: bool = false\nif a do a = true end else if a do ; end else do a = false end"),
        "bool a = false;if(a) {a = (true);} else {if(a) {} else {a = (false);}}"
    );
}

#[test]
fn test_every_operand_is_parenthesized() {
    assert_eq!(
        emit("let a: i32 = 1\nlet b: i32 = a + 2 * 3\nlet c: i32 = (a - b) - a"),
        "i32 a = 1;i32 b = (a) + ((2) * (3));i32 c = (((a) - (b))) - (a);"
    );
}

#[test]
fn test_unary_condition_and_literals() {
    assert_eq!(
        emit("let a: i32 = -1\nlet b: bool = !true\nlet c: i32 = b ? a : 0\nlet s: string = \"hi\\n\"\nlet p: *u8 = null"),
        "i32 a = -(1);bool b = !(true);i32 c = (b) ? (a) : (0);string s = \"hi\\n\";u8* p = NULL;"
    );
}

#[test]
fn test_number_literals_are_emitted_as_decimal() {
    assert_eq!(
        emit("let a: u32 = 0xff\nlet b: u32 = 0b101\nlet c: u32 = 1'000"),
        "u32 a = 255;u32 b = 5;u32 c = 1000;"
    );
}

#[test]
fn test_compound_assignment() {
    assert_eq!(
        emit("let a: i32 = 1\na <<= a + 1"),
        "i32 a = 1;a <<= ((a) + (1));"
    );
}

#[test]
fn test_dotted_call_uses_mangled_name() {
    assert_eq!(
        emit("mod m\nfn f() -> i32 do return 1 end\nlet x: i32 = m.f() + f()"),
        "i32 m_f() {return 1;}i32 x = (m_f()) + (f());"
    );
}

#[test]
fn test_dotted_variable_uses_bare_name() {
    assert_eq!(
        emit("mod m\nlet v: i32 = 1\nlet w: i32 = m.v"),
        "i32 v = 1;i32 w = v;"
    );
}

#[test]
fn test_external_functions_are_not_mangled() {
    assert_eq!(
        emit("mod io\nexternal fn puts(s: *u8) -> i32\nfn hello(s: *u8) -> i32 do return io.puts(s) end"),
        "extern i32 puts(u8* s);i32 io_hello(u8* s) {return puts(s);}"
    );
}

#[test]
fn test_pointer_return_stays_on_function() {
    assert_eq!(
        emit("fn name() -> *u8 do return null end"),
        "u8* name() {return NULL;}"
    );
}

#[test]
fn test_module_inside_block_closes_with_it() {
    assert_eq!(
        emit("while true do mod inner end\nfn g() -> i32 do return 0 end"),
        "while(true) {}i32 g() {return 0;}"
    );
}

#[test]
fn test_mangled_symbol_follows_nested_modules() {
    let unit = unit("mod outer\nmod inner\nfn f() -> i32 do return 0 end");
    let transpiler = Transpiler::new(&unit.symbols);

    let Some(Stmt::Func(func)) = unit.source_file.stmts.last() else {
        panic!("expected a function");
    };

    assert_eq!(transpiler.mangled_symbol(func.symbol), "outer_inner_f");
    assert_eq!(
        transpile(&unit, &TranspileOptions::default()).unwrap(),
        "i32 outer_inner_f() {return 0;}"
    );
}

#[test]
fn test_function_without_signature_is_incomplete() {
    let mut unit = unit("fn f() -> i32 do return 0 end");
    let Some(Stmt::Func(func)) = unit.source_file.stmts.first() else {
        panic!("expected a function");
    };
    let symbol = func.symbol;
    assert_eq!(unit.symbols.get(symbol).get_kind(), SymbolKind::Func);

    unit.symbols
        .set_typing(symbol, builtin("i32", vec![]))
        .unwrap();

    let error = transpile(&unit, &TranspileOptions::default()).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::IncompleteSymbol {
            name: String::from("f")
        }
    );
    assert_eq!(error.category(), ErrorCategory::Semantic);
}

#[test]
fn test_prelude() {
    let options = TranspileOptions { emit_prelude: true };
    let output = transpile(&unit("let a: u8 = 1"), &options).unwrap();

    assert!(output.starts_with("#include <stdbool.h>\n#include <stddef.h>\n#include <stdint.h>\n"));
    assert!(output.contains("typedef uint8_t u8;\n"));
    assert!(output.contains("typedef char* string;\n"));
    assert!(!output.contains(" bool;"));
    assert!(output.ends_with("\nu8 a = 1;"));
    assert_eq!(output, format!("{}u8 a = 1;", prelude()));
}

#[test]
fn test_every_builtin_is_covered_by_the_prelude() {
    for name in crate::semantic::symbol::BUILTIN_TYPES {
        assert!(name == "bool" || c_type(name).is_some(), "{} has no C type", name);
    }
}
