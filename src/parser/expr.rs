use crate::{
    cst::node::{CstNode, NodeBuilder},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::{Fault, Parser},
};

fn wrap_expr(inner: CstNode) -> CstNode {
    NodeBuilder::new("expr", inner.start()).child(inner).build()
}

/// Parses an expression and returns it wrapped in an `expr` node.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<CstNode, Fault> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.fault("expr", true)),
    };

    let mut left = wrap_expr(nud(parser)?);

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(Fault::Unexpected(parser.cursor())),
        };

        left = wrap_expr(led(parser, left, next_bp)?);
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<CstNode, Fault> {
    match parser.current_token_kind() {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Null => Ok(parser.advance()),
        _ => Err(parser.fault("expr", true)),
    }
}

/// `a` or `a.b.c`; the dots stay in the node as unnamed children.
pub fn parse_ident_expr(parser: &mut Parser) -> Result<CstNode, Fault> {
    let start = parser.get_position();
    let mut node = NodeBuilder::new("ident_expr", start).child(parser.expect(TokenKind::Identifier)?);

    while parser.current_token_kind() == TokenKind::Dot {
        node = node
            .child(parser.advance())
            .child(parser.expect(TokenKind::Identifier)?);
    }

    Ok(node.build())
}

pub fn parse_binary_expr(parser: &mut Parser, left: CstNode, bp: BindingPower) -> Result<CstNode, Fault> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(NodeBuilder::new("binary_expr", left.start())
        .field("left", left)
        .field("operator", operator)
        .field("right", right)
        .build())
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<CstNode, Fault> {
    let operator = parser.advance();
    let argument = parse_expr(parser, BindingPower::Unary)?;

    Ok(NodeBuilder::new("unary_expr", operator.start())
        .field("operator", operator)
        .field("argument", argument)
        .build())
}

/// Right associative: `a = b = c` assigns `c` to both.
pub fn parse_assignment_expr(parser: &mut Parser, left: CstNode, _bp: BindingPower) -> Result<CstNode, Fault> {
    let operator = parser.advance();
    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(NodeBuilder::new("assignment_expr", left.start())
        .field("left", left)
        .field("operator", operator)
        .field("right", right)
        .build())
}

pub fn parse_cond_expr(parser: &mut Parser, condition: CstNode, _bp: BindingPower) -> Result<CstNode, Fault> {
    let question = parser.advance();
    let consequence = parse_expr(parser, BindingPower::Default)?;
    let colon = parser.expect(TokenKind::Colon)?;
    let alternative = parse_expr(parser, BindingPower::Assignment)?;

    Ok(NodeBuilder::new("cond_expr", condition.start())
        .field("condition", condition)
        .child(question)
        .field("consequence", consequence)
        .child(colon)
        .field("alternative", alternative)
        .build())
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<CstNode, Fault> {
    let open = parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(NodeBuilder::new("parenthesized_expr", open.start())
        .child(open)
        .child(expr)
        .child(close)
        .build())
}

/// Only a plain or dotted name can be called.
pub fn parse_call_expr(parser: &mut Parser, left: CstNode, _bp: BindingPower) -> Result<CstNode, Fault> {
    let open_index = parser.cursor();

    let func_name = match left.into_only_named_child() {
        Ok(inner) if inner.get_kind() == "ident_expr" => inner,
        _ => return Err(Fault::Unexpected(open_index)),
    };

    let open = parser.advance();
    let mut args = NodeBuilder::new("argument_list", open.start()).child(open);

    if parser.current_token_kind() != TokenKind::CloseParen {
        args = args.child(parse_expr(parser, BindingPower::Default)?);

        while parser.current_token_kind() == TokenKind::Comma {
            args = args
                .child(parser.advance())
                .child(parse_expr(parser, BindingPower::Default)?);
        }
    }

    args = args.child(parser.expect(TokenKind::CloseParen)?);

    Ok(NodeBuilder::new("call_expr", func_name.start())
        .field("func_name", func_name)
        .field("args", args.build())
        .build())
}
