use crate::{
    errors::errors::{ErrorCategory, ErrorImpl},
    parser::parser::parse,
};

use super::{node::SyntaxNode, validate::validate};

#[test]
fn test_valid_tree_passes() {
    let tree = parse("mod m\nlet x: i32 = 1 + 2\n");
    assert!(validate(&tree).is_ok());
}

#[test]
fn test_empty_source_passes() {
    let tree = parse("");
    assert!(validate(&tree).is_ok());
    assert_eq!(tree.root_node().children().len(), 0);
}

#[test]
fn test_error_node_reports_offending_token() {
    let tree = parse("let x: i32 = 1\nlet y: i32 = # 2\n");
    let error = validate(&tree).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidSyntax {
            found: String::from("#")
        }
    );
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 13);
}

#[test]
fn test_missing_node_is_reported() {
    let tree = parse("while x do\n");
    let error = validate(&tree).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::MissingSyntax {
            expected: String::from("end")
        }
    );
    assert_eq!(error.get_position().line, 0);
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_stray_keyword_is_an_error() {
    let tree = parse("end");
    let error = validate(&tree).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidSyntax");
    assert_eq!(error.get_position().column, 0);
}

#[test]
fn test_node_byte_offsets_cover_source_text() {
    let source = "let name: u8 = 7";
    let tree = parse(source);

    let declare = tree.root_node().children()[0].children()[0];
    let typed_ident = declare.child_by_field_name("typed_ident").unwrap();
    let ident = typed_ident.child_by_field_name("ident").unwrap();

    assert_eq!(&source[ident.start_byte()..ident.end_byte()], "name");
    assert_eq!(&source[declare.start_byte()..declare.end_byte()], source);
}

#[test]
fn test_punctuation_is_unnamed() {
    let tree = parse("f(a, b)");
    let call = tree.root_node().children()[0].children()[0].children()[0];
    let args = call.child_by_field_name("args").unwrap();

    let named: Vec<bool> = args.children().iter().map(|child| child.is_named()).collect();
    assert_eq!(named, vec![false, true, false, true, false]);
}

#[test]
fn test_to_sexp_marks_missing_nodes() {
    let tree = parse("return");
    assert_eq!(tree.root_node().to_sexp(), "(source_file (MISSING expr))");
}
