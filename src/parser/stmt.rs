use crate::{
    cst::node::{CstNode, NodeBuilder},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{
    parser::{Fault, Parser},
    types::parse_type,
};

/// Parses one statement and returns it wrapped in a `stmt` node.
///
/// Statements need no terminator; a lone `;` is the empty statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let start = parser.get_position();

    let inner = if parser.current_token_kind() == TokenKind::Semicolon {
        NodeBuilder::new("empty", start).child(parser.advance()).build()
    } else if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let handler = *handler;
        handler(parser)?
    } else {
        parse_expr(parser, BindingPower::Default)?
    };

    Ok(NodeBuilder::new("stmt", start).child(inner).build())
}

pub fn parse_mod_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let name = parser.expect(TokenKind::Identifier)?;

    Ok(NodeBuilder::new("mod", keyword.start())
        .child(keyword)
        .field("name", name)
        .build())
}

/// `name: type`
pub fn parse_typed_ident(parser: &mut Parser) -> Result<CstNode, Fault> {
    let ident = parser.expect(TokenKind::Identifier)?;
    let colon = parser.expect(TokenKind::Colon)?;
    let typing = parse_type(parser)?;

    Ok(NodeBuilder::new("typed_ident", ident.start())
        .field("ident", ident)
        .child(colon)
        .field("typing", typing)
        .build())
}

pub fn parse_declare_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let typed_ident = parse_typed_ident(parser)?;

    let mut node = NodeBuilder::new("declare", keyword.start())
        .child(keyword)
        .field("typed_ident", typed_ident);

    if parser.current_token_kind() == TokenKind::Assignment {
        node = node
            .child(parser.advance())
            .field("initial", parse_expr(parser, BindingPower::Default)?);
    }

    Ok(node.build())
}

/// `( [name: type {, name: type}] [, ...] )`
pub fn parse_params(parser: &mut Parser) -> Result<CstNode, Fault> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let mut node = NodeBuilder::new("params", open.start()).child(open);

    let mut first = true;
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !first {
            node = node.child(parser.expect(TokenKind::Comma)?);
        }
        first = false;

        if parser.current_token_kind() == TokenKind::Ellipsis {
            let ellipsis = parser.advance();
            node = node.child(
                NodeBuilder::new("variadic", ellipsis.start())
                    .child(ellipsis)
                    .build(),
            );
            break;
        }

        node = node.child(parse_typed_ident(parser)?);
    }

    Ok(node.child(parser.expect(TokenKind::CloseParen)?).build())
}

/// `do stmt* end`
pub fn parse_codeblock(parser: &mut Parser) -> Result<CstNode, Fault> {
    let open = parser.expect(TokenKind::Do)?;
    let mut node = NodeBuilder::new("codeblock", open.start()).child(open);

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::End {
        node = node.child(parse_stmt(parser)?);
    }

    Ok(node.child(parser.expect(TokenKind::End)?).build())
}

pub fn parse_external_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();

    let inner = if parser.current_token_kind() == TokenKind::Fn {
        let fn_keyword = parser.advance();
        let func_name = parser.expect(TokenKind::Identifier)?;
        let params = parse_params(parser)?;
        let arrow = parser.expect(TokenKind::Arrow)?;
        let returns = parse_type(parser)?;

        NodeBuilder::new("external_function", fn_keyword.start())
            .child(fn_keyword)
            .field("func_name", func_name)
            .field("params", params)
            .child(arrow)
            .field("returns", returns)
            .build()
    } else {
        let typed_ident = parse_typed_ident(parser)?;

        NodeBuilder::new("external_variable", typed_ident.start())
            .field("typed_ident", typed_ident)
            .build()
    };

    Ok(NodeBuilder::new("external", keyword.start())
        .child(keyword)
        .child(inner)
        .build())
}

pub fn parse_func_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let func_name = parser.expect(TokenKind::Identifier)?;
    let params = parse_params(parser)?;
    let arrow = parser.expect(TokenKind::Arrow)?;
    let returns = parse_type(parser)?;
    let body = parse_codeblock(parser)?;

    Ok(NodeBuilder::new("func", keyword.start())
        .child(keyword)
        .field("func_name", func_name)
        .field("params", params)
        .child(arrow)
        .field("returns", returns)
        .field("body", body)
        .build())
}

/// `type name = T`
pub fn parse_type_alias_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let ident = parser.expect(TokenKind::Identifier)?;
    let assign = parser.expect(TokenKind::Assignment)?;
    let typing = parse_type(parser)?;

    Ok(NodeBuilder::new("type_alias", keyword.start())
        .child(keyword)
        .field("ident", ident)
        .child(assign)
        .field("typing", typing)
        .build())
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_codeblock(parser)?;

    Ok(NodeBuilder::new("while", keyword.start())
        .child(keyword)
        .field("condition", condition)
        .field("body", body)
        .build())
}

/// The alternative of an `else` is either a block or, for `else if`, a
/// nested `if` node.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let consequence = parse_codeblock(parser)?;

    let mut node = NodeBuilder::new("if", keyword.start())
        .child(keyword)
        .field("condition", condition)
        .field("consequence", consequence);

    if parser.current_token_kind() == TokenKind::Else {
        node = node.child(parser.advance());

        let alternative = if parser.current_token_kind() == TokenKind::If {
            parse_if_stmt(parser)?
        } else {
            parse_codeblock(parser)?
        };
        node = node.field("alternative", alternative);
    }

    Ok(node.build())
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<CstNode, Fault> {
    let keyword = parser.advance();
    let returns = parse_expr(parser, BindingPower::Default)?;

    Ok(NodeBuilder::new("return", keyword.start())
        .child(keyword)
        .field("returns", returns)
        .build())
}
