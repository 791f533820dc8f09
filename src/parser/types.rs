//! Type parsing implementation.
//!
//! This module handles parsing of type annotations and type expressions.
//! It supports:
//!
//! - Named types, possibly dotted (`i32`, `net.addr`)
//! - Pointer types (`*T`)
//! - Array and slice types (`[4]T`, `[]T`)
//! - Function types (`fn(T, U) -> R`)
//!
//! Every form is prefix, so a type is parsed by a single handler chosen by
//! its first token, and nests by recursion through [`parse_type`].

use std::collections::HashMap;

use crate::{
    cst::node::{CstNode, NodeBuilder},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_ident_expr,
    parser::{Fault, Parser},
};

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<CstNode, Fault>;

/// Type alias for the type handler lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_ident_expr);
    parser.type_nud(TokenKind::Star, parse_pointer_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
    parser.type_nud(TokenKind::Fn, parse_func_type);
}

/// Parses a type and returns it wrapped in a `type_expr` node.
pub fn parse_type(parser: &mut Parser) -> Result<CstNode, Fault> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.fault("type_expr", true)),
    };

    let inner = nud(parser)?;
    Ok(NodeBuilder::new("type_expr", inner.start()).child(inner).build())
}

pub fn parse_pointer_type(parser: &mut Parser) -> Result<CstNode, Fault> {
    let star = parser.advance();
    let pointee = parse_type(parser)?;

    Ok(NodeBuilder::new("pointer_type", star.start())
        .child(star)
        .field("pointee", pointee)
        .build())
}

/// `[]T` is a slice, `[N]T` an array of `N` elements.
pub fn parse_array_type(parser: &mut Parser) -> Result<CstNode, Fault> {
    let open = parser.advance();

    if parser.current_token_kind() == TokenKind::CloseBracket {
        let close = parser.advance();
        let element = parse_type(parser)?;

        return Ok(NodeBuilder::new("slice_type", open.start())
            .child(open)
            .child(close)
            .field("element", element)
            .build());
    }

    let size = parser.expect(TokenKind::Number)?;
    let close = parser.expect(TokenKind::CloseBracket)?;
    let element = parse_type(parser)?;

    Ok(NodeBuilder::new("array_type", open.start())
        .child(open)
        .field("size", size)
        .child(close)
        .field("element", element)
        .build())
}

pub fn parse_func_type(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();

    let open = parser.expect(TokenKind::OpenParen)?;
    let mut params = NodeBuilder::new("type_list", open.start()).child(open);

    if parser.current_token_kind() != TokenKind::CloseParen {
        params = params.child(parse_type(parser)?);

        while parser.current_token_kind() == TokenKind::Comma {
            params = params.child(parser.advance()).child(parse_type(parser)?);
        }
    }
    params = params.child(parser.expect(TokenKind::CloseParen)?);

    let arrow = parser.expect(TokenKind::Arrow)?;
    let returns = parse_type(parser)?;

    Ok(NodeBuilder::new("func_type", keyword.start())
        .child(keyword)
        .field("params", params.build())
        .child(arrow)
        .field("returns", returns)
        .build())
}
