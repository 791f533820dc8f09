use crate::{
    ast::{
        ast::Stmt,
        statements::{Block, ExternalDeclaration, Func, TypedIdent},
    },
    errors::errors::{Error, ErrorImpl},
    semantic::{symbol::SymbolId, typing::Typing},
};

use super::{
    expr::gen_expression,
    transpiler::Transpiler,
    types::{declarator, function_head},
};

pub fn gen_statement(transpiler: &mut Transpiler, statement: &Stmt) -> Result<String, Error> {
    let code = match statement {
        Stmt::Empty(_) => String::new(),
        Stmt::ModDeclare(declare) => {
            transpiler.modules.push(declare.name.clone());
            String::new()
        }
        Stmt::Declare(declare) => {
            let declared = gen_typed_ident(transpiler, &declare.typed_ident);

            match &declare.initial {
                Some(initial) => {
                    format!("{} = {};", declared, gen_expression(transpiler, initial)?)
                }
                None => format!("{};", declared),
            }
        }
        Stmt::External(external) => match &external.declaration {
            ExternalDeclaration::Variable(typed_ident) => {
                format!("extern {};", gen_typed_ident(transpiler, typed_ident))
            }
            ExternalDeclaration::Function(function) => {
                let mut params: Vec<String> = function
                    .params
                    .iter()
                    .map(|param| gen_typed_ident(transpiler, param))
                    .collect();
                if function.variadic {
                    params.push(String::from("..."));
                }

                let returns = signature_returns(transpiler, function.symbol, &function.name, statement)?;
                format!(
                    "extern {};",
                    function_head(transpiler.symbols, returns, &function.name, &params)
                )
            }
        },
        Stmt::While(while_loop) => format!(
            "while({}) {{{}}}",
            gen_expression(transpiler, &while_loop.condition)?,
            gen_block(transpiler, &while_loop.body)?
        ),
        Stmt::If(if_stmt) => {
            let mut code = format!(
                "if({}) {{{}}}",
                gen_expression(transpiler, &if_stmt.condition)?,
                gen_block(transpiler, &if_stmt.consequence)?
            );
            if let Some(alternative) = &if_stmt.alternative {
                code.push_str(&format!(" else {{{}}}", gen_block(transpiler, alternative)?));
            }
            code
        }
        Stmt::Return(ret) => format!("return {};", gen_expression(transpiler, &ret.value)?),
        Stmt::TypeAlias(alias) => {
            let typing = transpiler
                .symbols
                .get(alias.symbol)
                .get_typing()
                .ok_or_else(|| incomplete(&alias.name, statement))?;

            format!("typedef {};", declarator(transpiler.symbols, typing, &alias.name))
        }
        Stmt::Func(func) => gen_func(transpiler, func, statement)?,
        Stmt::Expr(expression) => format!("{};", gen_expression(transpiler, &expression.expr)?),
    };

    Ok(code)
}

fn gen_func(transpiler: &mut Transpiler, func: &Func, statement: &Stmt) -> Result<String, Error> {
    let returns = signature_returns(transpiler, func.symbol, &func.name, statement)?;
    let params: Vec<String> = func
        .params
        .iter()
        .map(|param| gen_typed_ident(transpiler, param))
        .collect();
    let head = function_head(transpiler.symbols, returns, &transpiler.mangled(&func.name), &params);

    Ok(format!("{} {{{}}}", head, gen_block(transpiler, &func.body)?))
}

/// Statements of a block, concatenated. Modules opened inside the block
/// close with it.
fn gen_block(transpiler: &mut Transpiler, block: &Block) -> Result<String, Error> {
    let depth = transpiler.modules.len();
    let mut code = String::new();

    for statement in &block.stmts {
        code.push_str(&gen_statement(transpiler, statement)?);
    }

    transpiler.modules.truncate(depth);
    Ok(code)
}

fn gen_typed_ident(transpiler: &Transpiler, typed_ident: &TypedIdent) -> String {
    declarator(transpiler.symbols, &typed_ident.typing, &typed_ident.name)
}

/// The return typing of a function symbol, which must carry its signature.
fn signature_returns<'a>(
    transpiler: &Transpiler<'a>,
    symbol: SymbolId,
    name: &str,
    statement: &Stmt,
) -> Result<&'a Typing, Error> {
    match transpiler.symbols.get(symbol).get_typing() {
        Some(Typing::Signature { returns, .. }) => Ok(returns.as_ref()),
        _ => Err(incomplete(name, statement)),
    }
}

fn incomplete(name: &str, statement: &Stmt) -> Error {
    Error::new(
        ErrorImpl::IncompleteSymbol {
            name: name.to_string(),
        },
        statement.get_span().start,
    )
}
