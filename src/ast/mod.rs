/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The root node and the statement and expression enums
/// - expressions: Expression nodes, literals and operator enumerations
/// - statements: Statement nodes, typed bindings and blocks
/// - types: Type expressions as written in the source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
