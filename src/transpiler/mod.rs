//! C emission.
//!
//! - transpiler: the entry point, options and emission state
//! - stmt / expr: one emission rule per AST node kind
//! - types: C declarators for resolved typings
//! - prelude: includes and builtin typedefs

pub mod expr;
pub mod prelude;
pub mod stmt;
pub mod transpiler;
pub mod types;

#[cfg(test)]
mod tests;
