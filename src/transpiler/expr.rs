use crate::{
    ast::{ast::Expr, expressions::IdentExpr},
    errors::errors::Error,
    semantic::symbol::SymbolKind,
};

use super::transpiler::Transpiler;

const TRUE: &str = "true";
const FALSE: &str = "false";
const NULL: &str = "NULL";

pub fn gen_expression(transpiler: &Transpiler, expression: &Expr) -> Result<String, Error> {
    let code = match expression {
        Expr::Ident(ident) => gen_ident(transpiler, ident),
        Expr::Binary(binary) => format!(
            "({}) {} ({})",
            gen_expression(transpiler, &binary.left)?,
            binary.op.token(),
            gen_expression(transpiler, &binary.right)?
        ),
        Expr::Unary(unary) => format!(
            "{}({})",
            unary.op.token(),
            gen_expression(transpiler, &unary.argument)?
        ),
        Expr::Condition(condition) => format!(
            "({}) ? ({}) : ({})",
            gen_expression(transpiler, &condition.condition)?,
            gen_expression(transpiler, &condition.consequence)?,
            gen_expression(transpiler, &condition.alternative)?
        ),
        Expr::Call(call) => {
            let args = call
                .args
                .iter()
                .map(|arg| gen_expression(transpiler, arg))
                .collect::<Result<Vec<_>, _>>()?;

            format!("{}({})", gen_ident(transpiler, &call.func_name), args.join(","))
        }
        // The target is an lvalue and stays bare.
        Expr::Assignment(assignment) => format!(
            "{} {} ({})",
            gen_expression(transpiler, &assignment.left)?,
            assignment.op.token(),
            gen_expression(transpiler, &assignment.right)?
        ),
        Expr::Parenthesized(parenthesized) => {
            format!("({})", gen_expression(transpiler, &parenthesized.expr)?)
        }
        Expr::Number(number) => number.value.to_string(),
        Expr::String(string) => string.value.clone(),
        Expr::Boolean(boolean) => String::from(if boolean.value { TRUE } else { FALSE }),
        Expr::Null(_) => String::from(NULL),
    };

    Ok(code)
}

/// A plain name is emitted as written. A dotted name is emitted through its
/// symbol: the mangled name for a module function, the bare name otherwise.
fn gen_ident(transpiler: &Transpiler, ident: &IdentExpr) -> String {
    if !ident.is_dotted() {
        return ident.dotted();
    }

    let symbol = transpiler.symbols.get(ident.symbol);
    if symbol.get_kind() == SymbolKind::Func && !symbol.is_external() {
        return transpiler.mangled_symbol(ident.symbol);
    }

    symbol.get_name().to_string()
}
