//! Concrete syntax tree to AST.
//!
//! A recursive descent keyed by node type tag. The scope stack is threaded
//! through every call inside an explicit [`Context`]; its top is the symbol
//! that new declarations are published into.

use log::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, SourceFile, Stmt},
        expressions::{
            AssignmentExpr, AssignmentOp, BinaryExpr, BinaryOp, BooleanLiteral, CallExpr,
            ConditionExpr, IdentExpr, NullLiteral, NumberLiteral, ParenthesizedExpr,
            StringLiteral, UnaryExpr, UnaryOp,
        },
        statements::{
            Block, DeclareStmt, ExprStmt, ExternalDeclaration, ExternalFunction, ExternalStmt,
            Func, IfStmt, ModDeclare, ReturnStmt, TypeAliasStmt, TypedIdent, WhileLoop,
        },
        types::{TypeExpr, TypeExprKind},
    },
    cst::node::SyntaxNode,
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::{
    symbol::{SymbolId, SymbolKind, SymbolTable},
    typing::Typing,
};

/// The result of transforming one source file: the AST and the symbols it
/// refers to. Dropped as a unit once transpilation is done.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub source_file: SourceFile,
    pub symbols: SymbolTable,
}

const BLOCK_NAME: &str = "<block>";

pub struct Context<'s> {
    source: &'s [u8],
    symbols: SymbolTable,
    scopes: Vec<SymbolId>,
}

impl<'s> Context<'s> {
    pub fn new(source: &'s [u8]) -> Self {
        let symbols = SymbolTable::new();
        let root = symbols.root();

        Context {
            source,
            symbols,
            scopes: vec![root],
        }
    }

    pub fn current_scope(&self) -> SymbolId {
        self.scopes
            .last()
            .copied()
            .unwrap_or_else(|| self.symbols.root())
    }

    fn push_scope(&mut self, scope: SymbolId) {
        trace!("enter scope {}", self.symbols.full_name(scope));
        self.scopes.push(scope);
    }

    /// Pops scopes up to and including `scope`, closing any module opened
    /// inside it along the way.
    fn pop_scope(&mut self, scope: SymbolId) {
        while let Some(top) = self.scopes.pop() {
            trace!("leave scope {}", self.symbols.full_name(top));
            if top == scope {
                break;
            }
        }
    }

    fn text<N: SyntaxNode>(&self, node: N) -> Result<String, Error> {
        let bytes = self
            .source
            .get(node.start_byte()..node.end_byte())
            .ok_or_else(|| malformed(node, "node lies outside the source buffer"))?;

        String::from_utf8(bytes.to_vec()).map_err(|_| malformed(node, "node text is not UTF-8"))
    }

    /// Creates a symbol in the current scope and publishes it there.
    fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        typing: Option<Typing>,
        position: Position,
    ) -> Result<SymbolId, Error> {
        let scope = self.current_scope();
        let symbol = self.symbols.create(name, kind, scope);

        if let Some(typing) = typing {
            self.symbols.set_typing(symbol, typing).map_err(at(position))?;
        }
        self.symbols.add_child(scope, symbol).map_err(at(position))?;

        debug!("declared {:?} {}", kind, self.symbols.full_name(symbol));
        Ok(symbol)
    }
}

/// A function symbol that exists and has its own scope on the stack, but is
/// not yet typed and not yet visible from the enclosing scope.
struct FuncStub {
    symbol: SymbolId,
    parent: SymbolId,
}

/// A typed function symbol, ready to be published.
struct SignedFunc {
    symbol: SymbolId,
    parent: SymbolId,
}

impl FuncStub {
    fn open(ctx: &mut Context, name: &str) -> FuncStub {
        let parent = ctx.current_scope();
        let symbol = ctx.symbols.create(name, SymbolKind::Func, parent);
        ctx.push_scope(symbol);

        FuncStub { symbol, parent }
    }

    fn sign(self, ctx: &mut Context, typing: Typing, position: Position) -> Result<SignedFunc, Error> {
        ctx.symbols.set_typing(self.symbol, typing).map_err(at(position))?;

        Ok(SignedFunc {
            symbol: self.symbol,
            parent: self.parent,
        })
    }
}

impl SignedFunc {
    fn publish(self, ctx: &mut Context, position: Position) -> Result<SymbolId, Error> {
        ctx.symbols
            .add_child(self.parent, self.symbol)
            .map_err(at(position))?;

        debug!("declared Func {}", ctx.symbols.full_name(self.symbol));
        Ok(self.symbol)
    }
}

fn at(position: Position) -> impl FnOnce(ErrorImpl) -> Error {
    move |error| Error::new(error, position)
}

fn malformed<N: SyntaxNode>(node: N, message: &str) -> Error {
    Error::new(
        ErrorImpl::MalformedTree {
            message: format!("{} (in `{}`)", message, node.kind()),
        },
        node.start_point(),
    )
}

fn span_of<N: SyntaxNode>(node: N) -> Span {
    let start = node.start_point();
    let end = node.end_point();

    Span {
        start: Position::new(start.line, start.column, node.start_byte()),
        end: Position::new(end.line, end.column, node.end_byte()),
    }
}

fn field<N: SyntaxNode>(node: N, name: &str) -> Result<N, Error> {
    node.child_by_field_name(name)
        .ok_or_else(|| malformed(node, &format!("missing field `{}`", name)))
}

/// Unwraps a `stmt`, `expr` or `type_expr` node into its only named child.
fn inner<N: SyntaxNode>(node: N, wrapper: &str) -> Result<N, Error> {
    if node.kind() != wrapper {
        return Err(malformed(node, &format!("expected `{}`", wrapper)));
    }

    node.first_named_child()
        .ok_or_else(|| malformed(node, "empty wrapper node"))
}

/// Parses a number token: decimal, `0x` hex or `0b` binary, with `'` separators.
pub fn parse_number(token: &str) -> Result<u64, ErrorImpl> {
    let digits: String = token.chars().filter(|c| *c != '\'').collect();

    let parsed = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(binary) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        u64::from_str_radix(binary, 2)
    } else {
        digits.parse()
    };

    parsed.map_err(|_| ErrorImpl::NumberParseError {
        token: token.to_string(),
    })
}

/// Transforms a whole tree rooted at `source_file`.
pub fn transform<N: SyntaxNode>(root: N, source: &[u8]) -> Result<CompilationUnit, Error> {
    if root.kind() != "source_file" {
        return Err(malformed(root, "expected `source_file`"));
    }

    let mut ctx = Context::new(source);
    let stmts = root
        .named_children()
        .into_iter()
        .map(|stmt| transform_stmt(&mut ctx, stmt))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompilationUnit {
        source_file: SourceFile::new(stmts, span_of(root)),
        symbols: ctx.symbols,
    })
}

pub fn transform_stmt<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<Stmt, Error> {
    let stmt = inner(node, "stmt")?;
    trace!("{} at {}", stmt.kind(), stmt.start_point());

    match stmt.kind() {
        "empty" => Ok(Stmt::Empty(span_of(stmt))),
        "mod" => transform_mod(ctx, stmt).map(Stmt::ModDeclare),
        "declare" => transform_declare(ctx, stmt).map(Stmt::Declare),
        "external" => transform_external(ctx, stmt).map(Stmt::External),
        "while" => Ok(Stmt::While(WhileLoop {
            condition: transform_expr(ctx, field(stmt, "condition")?)?,
            body: transform_block(ctx, field(stmt, "body")?)?,
            span: span_of(stmt),
        })),
        "if" => transform_if(ctx, stmt).map(Stmt::If),
        "return" => Ok(Stmt::Return(ReturnStmt {
            value: transform_expr(ctx, field(stmt, "returns")?)?,
            span: span_of(stmt),
        })),
        "type_alias" => transform_type_alias(ctx, stmt).map(Stmt::TypeAlias),
        "func" => transform_func(ctx, stmt).map(Stmt::Func),
        "expr" => Ok(Stmt::Expr(ExprStmt {
            expr: transform_expr(ctx, stmt)?,
            span: span_of(stmt),
        })),
        _ => Err(malformed(stmt, "unknown statement")),
    }
}

/// Opens a module scope that stays open until the enclosing block closes.
fn transform_mod<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<ModDeclare, Error> {
    let name_node = field(node, "name")?;
    let name = ctx.text(name_node)?;

    let symbol = ctx.declare(&name, SymbolKind::Module, None, name_node.start_point())?;
    ctx.push_scope(symbol);

    Ok(ModDeclare {
        name,
        symbol,
        span: span_of(node),
    })
}

fn transform_declare<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<DeclareStmt, Error> {
    // The initializer is resolved before the name is declared, so
    // `let x: i32 = x` refers to an outer `x`.
    let initial = match node.child_by_field_name("initial") {
        Some(initial) => Some(transform_expr(ctx, initial)?),
        None => None,
    };

    let typed_ident = transform_typed_ident(ctx, field(node, "typed_ident")?, SymbolKind::Var)?;

    Ok(DeclareStmt {
        typed_ident,
        initial,
        span: span_of(node),
    })
}

fn transform_typed_ident<N: SyntaxNode>(
    ctx: &mut Context,
    node: N,
    kind: SymbolKind,
) -> Result<TypedIdent, Error> {
    let ident = field(node, "ident")?;
    let name = ctx.text(ident)?;

    let typing_node = field(node, "typing")?;
    let type_expr = transform_type_expr(ctx, typing_node)?;
    let typing = Typing::from_type_expr(&ctx.symbols, ctx.current_scope(), &type_expr)
        .map_err(at(typing_node.start_point()))?;

    let symbol = ctx.declare(&name, kind, Some(typing.clone()), ident.start_point())?;

    Ok(TypedIdent {
        name,
        type_expr,
        typing,
        symbol,
        span: span_of(node),
    })
}

/// Parameters become children of the current scope, which is the function's own.
fn transform_params<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<(Vec<TypedIdent>, bool), Error> {
    let mut params = vec![];
    let mut variadic = false;

    for child in node.named_children() {
        match child.kind() {
            "typed_ident" => params.push(transform_typed_ident(ctx, child, SymbolKind::Param)?),
            "variadic" => variadic = true,
            _ => return Err(malformed(child, "unexpected parameter")),
        }
    }

    Ok((params, variadic))
}

fn signature(params: &[TypedIdent], returns: Typing, variadic: bool) -> Typing {
    Typing::Signature {
        params: params.iter().map(|param| param.typing.clone()).collect(),
        returns: Box::new(returns),
        variadic,
    }
}

fn transform_external<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<ExternalStmt, Error> {
    let declaration = node
        .first_named_child()
        .ok_or_else(|| malformed(node, "empty external"))?;

    let declaration = match declaration.kind() {
        "external_variable" => {
            let typed_ident =
                transform_typed_ident(ctx, field(declaration, "typed_ident")?, SymbolKind::Var)?;
            ctx.symbols
                .mark_external(typed_ident.symbol)
                .map_err(at(declaration.start_point()))?;

            ExternalDeclaration::Variable(typed_ident)
        }
        "external_function" => {
            let name_node = field(declaration, "func_name")?;
            let name = ctx.text(name_node)?;

            let stub = FuncStub::open(ctx, &name);
            let (params, variadic) = transform_params(ctx, field(declaration, "params")?)?;
            let returns_node = field(declaration, "returns")?;
            let returns = transform_type_expr(ctx, returns_node)?;
            let return_typing = Typing::from_type_expr(&ctx.symbols, ctx.current_scope(), &returns)
                .map_err(at(returns_node.start_point()))?;
            ctx.pop_scope(stub.symbol);

            let symbol = stub
                .sign(ctx, signature(&params, return_typing, variadic), name_node.start_point())?
                .publish(ctx, name_node.start_point())?;
            ctx.symbols
                .mark_external(symbol)
                .map_err(at(name_node.start_point()))?;

            ExternalDeclaration::Function(ExternalFunction {
                name,
                params,
                variadic,
                returns,
                symbol,
                span: span_of(declaration),
            })
        }
        _ => return Err(malformed(declaration, "unknown external declaration")),
    };

    Ok(ExternalStmt {
        declaration,
        span: span_of(node),
    })
}

/// The function is published into the enclosing scope before its body is
/// transformed, so the body may call it recursively.
fn transform_func<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<Func, Error> {
    let name_node = field(node, "func_name")?;
    let name = ctx.text(name_node)?;

    let stub = FuncStub::open(ctx, &name);

    let params_node = field(node, "params")?;
    let (params, variadic) = transform_params(ctx, params_node)?;
    if variadic {
        return Err(Error::new(
            ErrorImpl::VariadicDefinition { function: name },
            params_node.start_point(),
        ));
    }

    let returns_node = field(node, "returns")?;
    let returns = transform_type_expr(ctx, returns_node)?;
    let return_typing = Typing::from_type_expr(&ctx.symbols, ctx.current_scope(), &returns)
        .map_err(at(returns_node.start_point()))?;

    let symbol = stub
        .sign(ctx, signature(&params, return_typing, false), name_node.start_point())?
        .publish(ctx, name_node.start_point())?;

    let body_node = field(node, "body")?;
    let body = Block {
        stmts: transform_stmts(ctx, body_node)?,
        scope: symbol,
        span: span_of(body_node),
    };
    ctx.pop_scope(symbol);

    Ok(Func {
        name,
        params,
        returns,
        body,
        symbol,
        span: span_of(node),
    })
}

fn transform_type_alias<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<TypeAliasStmt, Error> {
    let ident = field(node, "ident")?;
    let name = ctx.text(ident)?;

    let typing_node = field(node, "typing")?;
    let type_expr = transform_type_expr(ctx, typing_node)?;
    let typing = Typing::from_type_expr(&ctx.symbols, ctx.current_scope(), &type_expr)
        .map_err(at(typing_node.start_point()))?;

    let symbol = ctx.declare(&name, SymbolKind::Type, Some(typing), ident.start_point())?;

    Ok(TypeAliasStmt {
        name,
        type_expr,
        symbol,
        span: span_of(node),
    })
}

fn transform_if<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<IfStmt, Error> {
    let condition = transform_expr(ctx, field(node, "condition")?)?;
    let consequence = transform_block(ctx, field(node, "consequence")?)?;

    let alternative = match node.child_by_field_name("alternative") {
        None => None,
        Some(alternative) if alternative.kind() == "if" => {
            let scope = open_block(ctx);
            let nested = transform_if(ctx, alternative)?;
            ctx.pop_scope(scope);

            Some(Block {
                stmts: vec![Stmt::If(nested)],
                scope,
                span: span_of(alternative),
            })
        }
        Some(alternative) => Some(transform_block(ctx, alternative)?),
    };

    Ok(IfStmt {
        condition,
        consequence,
        alternative,
        span: span_of(node),
    })
}

/// Pushes an anonymous block scope. It is linked to its parent but never
/// published, so nothing outside can see into it.
fn open_block(ctx: &mut Context) -> SymbolId {
    let parent = ctx.current_scope();
    let scope = ctx.symbols.create(BLOCK_NAME, SymbolKind::CodeBlock, parent);
    ctx.push_scope(scope);
    scope
}

fn transform_block<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<Block, Error> {
    let scope = open_block(ctx);
    let stmts = transform_stmts(ctx, node)?;
    ctx.pop_scope(scope);

    Ok(Block {
        stmts,
        scope,
        span: span_of(node),
    })
}

fn transform_stmts<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<Vec<Stmt>, Error> {
    if node.kind() != "codeblock" {
        return Err(malformed(node, "expected `codeblock`"));
    }

    node.named_children()
        .into_iter()
        .map(|stmt| transform_stmt(ctx, stmt))
        .collect()
}

pub fn transform_type_expr<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<TypeExpr, Error> {
    let ty = inner(node, "type_expr")?;

    let kind = match ty.kind() {
        "ident_expr" => TypeExprKind::Name(ident_path(ctx, ty)?),
        "pointer_type" => {
            TypeExprKind::Pointer(Box::new(transform_type_expr(ctx, field(ty, "pointee")?)?))
        }
        "array_type" => {
            let size_node = field(ty, "size")?;
            let size = parse_number(&ctx.text(size_node)?).map_err(at(size_node.start_point()))?;

            TypeExprKind::Array(size, Box::new(transform_type_expr(ctx, field(ty, "element")?)?))
        }
        "slice_type" => {
            TypeExprKind::Slice(Box::new(transform_type_expr(ctx, field(ty, "element")?)?))
        }
        "func_type" => TypeExprKind::Func {
            params: field(ty, "params")?
                .named_children()
                .into_iter()
                .map(|param| transform_type_expr(ctx, param))
                .collect::<Result<Vec<_>, _>>()?,
            returns: Box::new(transform_type_expr(ctx, field(ty, "returns")?)?),
        },
        _ => return Err(malformed(ty, "unknown type expression")),
    };

    Ok(TypeExpr {
        kind,
        span: span_of(ty),
    })
}

fn ident_path<N: SyntaxNode>(ctx: &Context, node: N) -> Result<Vec<String>, Error> {
    node.named_children()
        .into_iter()
        .map(|part| ctx.text(part))
        .collect()
}

fn transform_ident<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<IdentExpr, Error> {
    let path = ident_path(ctx, node)?;
    let symbol = ctx
        .symbols
        .resolve_full_name(ctx.current_scope(), &path.join("."))
        .map_err(at(node.start_point()))?;

    Ok(IdentExpr {
        path,
        symbol,
        span: span_of(node),
    })
}

fn operator_text<N: SyntaxNode>(ctx: &Context, node: N) -> Result<(String, N), Error> {
    let operator = field(node, "operator")?;
    Ok((ctx.text(operator)?, operator))
}

pub fn transform_expr<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<Expr, Error> {
    let expr = inner(node, "expr")?;
    let span = span_of(expr);

    match expr.kind() {
        "ident_expr" => transform_ident(ctx, expr).map(Expr::Ident),
        "binary_expr" => {
            let left = transform_expr(ctx, field(expr, "left")?)?;
            let (token, operator) = operator_text(ctx, expr)?;
            let op = BinaryOp::from_token(&token)
                .ok_or_else(|| malformed(operator, "unknown binary operator"))?;
            let right = transform_expr(ctx, field(expr, "right")?)?;

            Ok(Expr::Binary(BinaryExpr {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            }))
        }
        "unary_expr" => {
            let (token, operator) = operator_text(ctx, expr)?;
            let op = UnaryOp::from_token(&token)
                .ok_or_else(|| malformed(operator, "unknown unary operator"))?;

            Ok(Expr::Unary(UnaryExpr {
                op,
                argument: Box::new(transform_expr(ctx, field(expr, "argument")?)?),
                span,
            }))
        }
        "cond_expr" => Ok(Expr::Condition(ConditionExpr {
            condition: Box::new(transform_expr(ctx, field(expr, "condition")?)?),
            consequence: Box::new(transform_expr(ctx, field(expr, "consequence")?)?),
            alternative: Box::new(transform_expr(ctx, field(expr, "alternative")?)?),
            span,
        })),
        "call_expr" => transform_call(ctx, expr).map(Expr::Call),
        "assignment_expr" => {
            let left = transform_expr(ctx, field(expr, "left")?)?;
            let (token, operator) = operator_text(ctx, expr)?;
            let op = AssignmentOp::from_token(&token)
                .ok_or_else(|| malformed(operator, "unknown assignment operator"))?;
            let right = transform_expr(ctx, field(expr, "right")?)?;

            Ok(Expr::Assignment(AssignmentExpr {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            }))
        }
        "parenthesized_expr" => {
            let wrapped = expr
                .first_named_child()
                .ok_or_else(|| malformed(expr, "empty parentheses"))?;

            Ok(Expr::Parenthesized(ParenthesizedExpr {
                expr: Box::new(transform_expr(ctx, wrapped)?),
                span,
            }))
        }
        "number_literal" => {
            let value = parse_number(&ctx.text(expr)?).map_err(at(expr.start_point()))?;
            Ok(Expr::Number(NumberLiteral { value, span }))
        }
        "string_literal" => Ok(Expr::String(StringLiteral {
            value: ctx.text(expr)?,
            span,
        })),
        "true_lit" => Ok(Expr::Boolean(BooleanLiteral { value: true, span })),
        "false_lit" => Ok(Expr::Boolean(BooleanLiteral { value: false, span })),
        "null_lit" => Ok(Expr::Null(NullLiteral { span })),
        _ => Err(malformed(expr, "unknown expression")),
    }
}

fn transform_call<N: SyntaxNode>(ctx: &mut Context, node: N) -> Result<CallExpr, Error> {
    let func_name = transform_ident(ctx, field(node, "func_name")?)?;

    let callable = ctx
        .symbols
        .get(func_name.symbol)
        .get_typing()
        .is_some_and(|typing| typing.resolved(&ctx.symbols).is_signature());
    if !callable {
        return Err(Error::new(
            ErrorImpl::NotCallable {
                name: func_name.dotted(),
            },
            func_name.span.start,
        ));
    }

    let args = field(node, "args")?
        .named_children()
        .into_iter()
        .map(|arg| transform_expr(ctx, arg))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CallExpr {
        func: func_name.symbol,
        func_name,
        args,
        span: span_of(node),
    })
}
