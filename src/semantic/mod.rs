//! Semantic analysis.
//!
//! Turns a validated concrete syntax tree into the AST while building the
//! scope tree of symbols and resolving every type and identifier.
//!
//! - symbol: the symbol arena, scopes and name resolution
//! - typing: resolved types and the factories that build them
//! - transformer: the tree walk producing a [`transformer::CompilationUnit`]

pub mod symbol;
pub mod transformer;
pub mod typing;
