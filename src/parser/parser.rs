//! Parser implementation for building the concrete syntax tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Parsing never fails. The first unexpected token turns the rest of the
//! input into an `ERROR` node, and a required token that is absent at the
//! end of the input becomes a zero-width `MISSING` node.

use std::collections::HashMap;

use log::debug;

use crate::{
    cst::node::{CstNode, NodeBuilder, Tree},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// Why a production could not be completed.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// Index of the first token that does not fit.
    Unexpected(usize),
    /// The input ended where a node of this kind was required.
    Missing {
        kind: &'static str,
        named: bool,
        at: Position,
    },
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers, keyed by the token starting the type
    type_nud_lookup: TypeNUDLookup,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one as a leaf.
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> CstNode {
        let leaf = CstNode::leaf(self.current_token());
        if self.current_token_kind() != TokenKind::EOF {
            self.pos += 1;
        }
        leaf
    }

    /// Consumes a token of the expected kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<CstNode, Fault> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance())
        } else {
            Err(self.fault(expected_kind.tag(), expected_kind.is_named()))
        }
    }

    /// The fault for a required `kind` that is not at the cursor.
    pub fn fault(&self, kind: &'static str, named: bool) -> Fault {
        if self.current_token_kind() == TokenKind::EOF {
            Fault::Missing {
                kind,
                named,
                at: self.last_end(),
            }
        } else {
            Fault::Unexpected(self.pos)
        }
    }

    /// Index of the current token.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// End of the last consumed token.
    pub fn last_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos)) {
            Some(token) => token.span.end,
            None => self.get_position(),
        }
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers leave the binding power table alone, so a token such
    /// as `-` keeps the precedence of its infix form.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.binding_power_lookup
            .insert(kind, BindingPower::Default);
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a handler for types starting with `kind`.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Turns a fault into the node that records it in the tree.
    fn recover(&self, fault: Fault) -> CstNode {
        match fault {
            Fault::Unexpected(index) => {
                let rest: Vec<CstNode> = self.tokens[index..]
                    .iter()
                    .filter(|token| token.kind != TokenKind::EOF)
                    .map(CstNode::leaf)
                    .collect();
                debug!("unexpected token at {}, {} token(s) skipped", self.tokens[index].span.start, rest.len());

                CstNode::error(rest, self.tokens[index].span.start)
            }
            Fault::Missing { kind, named, at } => {
                debug!("missing {} at {}", kind, at);
                CstNode::missing(kind, named, at)
            }
        }
    }
}

/// Parses source text into a concrete syntax tree rooted at `source_file`.
pub fn parse(source: &str) -> Tree {
    let mut parser = Parser::new(tokenize(source));
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut root = NodeBuilder::new("source_file", Position::default());

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => root = root.child(stmt),
            Err(fault) => {
                root = root.child(parser.recover(fault));
                break;
            }
        }
    }

    Tree::new(root.build(), source.to_string())
}
