use crate::{
    semantic::{symbol::SymbolId, typing::Typing},
    Span,
};

use super::{
    ast::{Expr, Stmt},
    types::TypeExpr,
};

/// `mod name`
#[derive(Debug, Clone, PartialEq)]
pub struct ModDeclare {
    pub name: String,
    pub symbol: SymbolId,
    pub span: Span,
}

/// A `name: type` binding: a declared variable, parameter or external
/// variable, together with the symbol created for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedIdent {
    pub name: String,
    pub type_expr: TypeExpr,
    pub typing: Typing,
    pub symbol: SymbolId,
    pub span: Span,
}

/// A list of statements with the scope their declarations live in.
///
/// `if` and `while` blocks own an anonymous code block symbol; a function
/// body shares the function's own scope with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub scope: SymbolId,
    pub span: Span,
}

/// `let name: type [= initial]`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareStmt {
    pub typed_ident: TypedIdent,
    pub initial: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalStmt {
    pub declaration: ExternalDeclaration,
    pub span: Span,
}

/// What an `external` statement imports. Neither form has a body.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalDeclaration {
    Variable(TypedIdent),
    Function(ExternalFunction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalFunction {
    pub name: String,
    pub params: Vec<TypedIdent>,
    pub variadic: bool,
    pub returns: TypeExpr,
    pub symbol: SymbolId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

/// An `else if` is stored as an alternative block holding a single `if`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub consequence: Block,
    pub alternative: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

/// `type name = T`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasStmt {
    pub name: String,
    pub type_expr: TypeExpr,
    pub symbol: SymbolId,
    pub span: Span,
}

/// A user defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub name: String,
    pub params: Vec<TypedIdent>,
    pub returns: TypeExpr,
    pub body: Block,
    pub symbol: SymbolId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}
