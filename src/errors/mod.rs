//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the pipeline:
//!
//! - Error structures with source position information
//! - Syntax errors found by the validation walk
//! - Semantic errors raised while building symbols or emitting C
//! - Error formatting and suggestions for the command line driver

pub mod errors;
