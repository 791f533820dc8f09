use crate::Span;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, BooleanLiteral, CallExpr, ConditionExpr, IdentExpr,
        NullLiteral, NumberLiteral, ParenthesizedExpr, StringLiteral, UnaryExpr,
    },
    statements::{
        DeclareStmt, ExprStmt, ExternalStmt, Func, IfStmt, ModDeclare, ReturnStmt, TypeAliasStmt,
        WhileLoop,
    },
};

/// Root of a transformed file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Name given by the last `mod` statement, if any.
    pub module: Option<String>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl SourceFile {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        let module = stmts.iter().rev().find_map(|stmt| match stmt {
            Stmt::ModDeclare(declare) => Some(declare.name.clone()),
            _ => None,
        });

        SourceFile { module, stmts, span }
    }
}

/// Statement Types
///
/// One variant per statement kind; every consumer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Empty(Span),
    ModDeclare(ModDeclare),
    Declare(DeclareStmt),
    External(ExternalStmt),
    While(WhileLoop),
    If(IfStmt),
    Return(ReturnStmt),
    TypeAlias(TypeAliasStmt),
    Func(Func),
    Expr(ExprStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Empty(span) => span,
            Stmt::ModDeclare(stmt) => &stmt.span,
            Stmt::Declare(stmt) => &stmt.span,
            Stmt::External(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::TypeAlias(stmt) => &stmt.span,
            Stmt::Func(stmt) => &stmt.span,
            Stmt::Expr(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(IdentExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Condition(ConditionExpr),
    Call(CallExpr),
    Assignment(AssignmentExpr),
    Parenthesized(ParenthesizedExpr),
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Ident(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Condition(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Parenthesized(expr) => &expr.span,
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Null(expr) => &expr.span,
        }
    }
}
