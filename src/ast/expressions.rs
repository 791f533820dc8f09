use crate::{semantic::symbol::SymbolId, Span};

use super::ast::Expr;

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Gt,
    Ge,
    Le,
    Lt,
    Shl,
    Shr,
}

impl BinaryOp {
    const ALL: [BinaryOp; 18] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::LogicalOr,
        BinaryOp::LogicalAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::BitAnd,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Gt,
        BinaryOp::Ge,
        BinaryOp::Le,
        BinaryOp::Lt,
        BinaryOp::Shl,
        BinaryOp::Shr,
    ];

    /// Source text of the operator, which is also its C spelling.
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Lt => "<",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }

    pub fn from_token(token: &str) -> Option<BinaryOp> {
        BinaryOp::ALL.into_iter().find(|op| op.token() == token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    BitNot,
    Neg,
    Plus,
}

impl UnaryOp {
    pub fn token(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        }
    }

    pub fn from_token(token: &str) -> Option<UnaryOp> {
        [UnaryOp::Not, UnaryOp::BitNot, UnaryOp::Neg, UnaryOp::Plus]
            .into_iter()
            .find(|op| op.token() == token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOp {
    Assign,
    MulAssign,
    DivAssign,
    ModAssign,
    AddAssign,
    SubAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    OrAssign,
    XorAssign,
}

impl AssignmentOp {
    const ALL: [AssignmentOp; 11] = [
        AssignmentOp::Assign,
        AssignmentOp::MulAssign,
        AssignmentOp::DivAssign,
        AssignmentOp::ModAssign,
        AssignmentOp::AddAssign,
        AssignmentOp::SubAssign,
        AssignmentOp::ShlAssign,
        AssignmentOp::ShrAssign,
        AssignmentOp::AndAssign,
        AssignmentOp::OrAssign,
        AssignmentOp::XorAssign,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            AssignmentOp::Assign => "=",
            AssignmentOp::MulAssign => "*=",
            AssignmentOp::DivAssign => "/=",
            AssignmentOp::ModAssign => "%=",
            AssignmentOp::AddAssign => "+=",
            AssignmentOp::SubAssign => "-=",
            AssignmentOp::ShlAssign => "<<=",
            AssignmentOp::ShrAssign => ">>=",
            AssignmentOp::AndAssign => "&=",
            AssignmentOp::OrAssign => "|=",
            AssignmentOp::XorAssign => "^=",
        }
    }

    pub fn from_token(token: &str) -> Option<AssignmentOp> {
        AssignmentOp::ALL.into_iter().find(|op| op.token() == token)
    }
}

// LITERALS

/// Number Literal
/// The value is already parsed; hex, binary and separators are gone.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: u64,
    pub span: Span,
}

/// String Literal
/// Kept as written in the source, quotes and escapes included.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLiteral {
    pub span: Span,
}

// EXPRESSIONS

/// A possibly dotted name and the symbol it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentExpr {
    pub path: Vec<String>,
    pub symbol: SymbolId,
    pub span: Span,
}

impl IdentExpr {
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }

    pub fn is_dotted(&self) -> bool {
        self.path.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub argument: Box<Expr>,
    pub span: Span,
}

/// `condition ? consequence : alternative`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionExpr {
    pub condition: Box<Expr>,
    pub consequence: Box<Expr>,
    pub alternative: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub func_name: IdentExpr,
    /// The function symbol the callee resolved to.
    pub func: SymbolId,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub left: Box<Expr>,
    pub op: AssignmentOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpr {
    pub expr: Box<Expr>,
    pub span: Span,
}
