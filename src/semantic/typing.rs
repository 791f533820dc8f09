use crate::{
    ast::types::{TypeExpr, TypeExprKind},
    errors::errors::ErrorImpl,
};

use super::symbol::{SymbolId, SymbolKind, SymbolTable};

/// A type constructor applied on top of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Pointer,
    Array(u64),
    /// Pointer to the first element; the length is not part of the type.
    Slice,
}

/// A resolved type.
///
/// A `Ref` names a type symbol with its qualifiers ordered outermost first,
/// so `*[4]u8` is `Ref { u8, [Pointer, Array(4)] }`.
#[derive(Debug, Clone, PartialEq)]
pub enum Typing {
    Ref {
        symbol: SymbolId,
        qualifiers: Vec<Qualifier>,
    },
    Signature {
        params: Vec<Typing>,
        returns: Box<Typing>,
        variadic: bool,
    },
}

impl Typing {
    pub fn named(symbol: SymbolId) -> Typing {
        Typing::Ref {
            symbol,
            qualifiers: vec![],
        }
    }

    /// Resolves a dotted type name against `scope`.
    pub fn from_type_ident(
        table: &SymbolTable,
        scope: SymbolId,
        name: &str,
    ) -> Result<Typing, ErrorImpl> {
        let symbol = table.resolve_full_name(scope, name)?;

        if table.get(symbol).get_kind() != SymbolKind::Type {
            return Err(ErrorImpl::NotAType {
                name: name.to_string(),
            });
        }

        Ok(Typing::named(symbol))
    }

    /// Builds a signature from type names, failing on the first one that
    /// does not resolve.
    pub fn from_func_signature(
        table: &SymbolTable,
        scope: SymbolId,
        param_type_names: &[&str],
        return_type_name: &str,
    ) -> Result<Typing, ErrorImpl> {
        let params = param_type_names
            .iter()
            .map(|name| Typing::from_type_ident(table, scope, name))
            .collect::<Result<Vec<_>, _>>()?;
        let returns = Typing::from_type_ident(table, scope, return_type_name)?;

        Ok(Typing::Signature {
            params,
            returns: Box::new(returns),
            variadic: false,
        })
    }

    pub fn from_type_expr(
        table: &SymbolTable,
        scope: SymbolId,
        type_expr: &TypeExpr,
    ) -> Result<Typing, ErrorImpl> {
        match &type_expr.kind {
            TypeExprKind::Name(path) => Typing::from_type_ident(table, scope, &path.join(".")),
            TypeExprKind::Pointer(pointee) => {
                Typing::from_type_expr(table, scope, pointee)?.qualified(Qualifier::Pointer)
            }
            TypeExprKind::Array(size, element) => {
                Typing::from_type_expr(table, scope, element)?.qualified(Qualifier::Array(*size))
            }
            TypeExprKind::Slice(element) => {
                Typing::from_type_expr(table, scope, element)?.qualified(Qualifier::Slice)
            }
            TypeExprKind::Func { params, returns } => {
                let params = params
                    .iter()
                    .map(|param| Typing::from_type_expr(table, scope, param))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Typing::Signature {
                    params,
                    returns: Box::new(Typing::from_type_expr(table, scope, returns)?),
                    variadic: false,
                })
            }
        }
    }

    /// Wraps the typing in one more qualifier. Function types take none.
    pub fn qualified(self, qualifier: Qualifier) -> Result<Typing, ErrorImpl> {
        match self {
            Typing::Ref {
                symbol,
                mut qualifiers,
            } => {
                qualifiers.insert(0, qualifier);
                Ok(Typing::Ref { symbol, qualifiers })
            }
            Typing::Signature { .. } => Err(ErrorImpl::TypingMisuse {
                message: String::from("a function type cannot be pointed to or stored in an array"),
            }),
        }
    }

    /// Follows unqualified references through type aliases, so a name
    /// aliasing `fn(i32) -> i32` yields that signature.
    pub fn resolved<'t>(&'t self, table: &'t SymbolTable) -> &'t Typing {
        let mut current = self;

        while let Typing::Ref { symbol, qualifiers } = current {
            if !qualifiers.is_empty() {
                break;
            }

            let target = table.get(*symbol);
            match (target.get_kind(), target.get_typing()) {
                (SymbolKind::Type, Some(aliased)) => current = aliased,
                _ => break,
            }
        }

        current
    }

    pub fn is_signature(&self) -> bool {
        matches!(self, Typing::Signature { .. })
    }
}
