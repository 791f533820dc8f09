//! Concrete syntax tree engine.
//!
//! A Pratt parser over the token stream that builds a [`crate::cst::node::Tree`]
//! and never fails. A fault inside a statement becomes an ERROR node
//! covering the rest of the input, or a zero-width MISSING node when the
//! expected token can be named; [`crate::cst::validate`] reports them later.
//!
//! Expressions are wrapped in `expr`, types in `type_expr` and statements in
//! `stmt`. `lookups` holds the NUD/LED tables and the binding power ladder.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
