//! Concrete syntax trees.
//!
//! The semantic core only sees parse trees through the [`node::SyntaxNode`]
//! contract: a type tag, source points and byte offsets, ordered children,
//! field lookup and the error/missing flags. [`validate`] is the walk that
//! rejects a tree before any AST is built.

pub mod node;
pub mod validate;

#[cfg(test)]
mod tests;
