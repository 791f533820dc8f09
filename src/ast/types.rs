use std::fmt::Display;

use crate::Span;

/// A type as written in the source, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    /// A plain or dotted type name.
    Name(Vec<String>),
    Pointer(Box<TypeExpr>),
    Array(u64, Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Func {
        params: Vec<TypeExpr>,
        returns: Box<TypeExpr>,
    },
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeExprKind::Name(path) => write!(f, "{}", path.join(".")),
            TypeExprKind::Pointer(pointee) => write!(f, "*{}", pointee),
            TypeExprKind::Array(size, element) => write!(f, "[{}]{}", size, element),
            TypeExprKind::Slice(element) => write!(f, "[]{}", element),
            TypeExprKind::Func { params, returns } => {
                let params: Vec<String> = params.iter().map(|param| param.to_string()).collect();
                write!(f, "fn({}) -> {}", params.join(", "), returns)
            }
        }
    }
}
