//! # quill
//!
//! quill is a small dynamically typed scripting language with a tree-walking
//! interpreter written in Rust. It lexes, parses and evaluates programs with
//! numbers, strings, lists, first-class functions and closures, and reports
//! errors with source excerpts and stack traces.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::rc::Rc;

use log::debug;

use crate::{
    error::Error,
    interpreter::{environment::Context, lexer::tokenize, parser::parse, value::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the [`ast::Node`] enum and related types that
/// represent the syntactic structure of a program as a tree. The tree is
/// built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source spans to every node for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every error carries the span it points at and renders itself as a report
/// with a one-based location (or, for runtime errors, a stack trace) and a
/// caret excerpt of the offending source.
///
/// # Responsibilities
/// - Defines error kinds for every failure mode.
/// - Combines the stage errors into one [`error::Error`] with `From`
///   conversions, so stages compose with `?`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the execution environment.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Lexes, parses and evaluates `source_text` in `root`.
///
/// Bindings made by the program stay in `root`, so a host can evaluate
/// several inputs against the same context, as the interactive loop does.
///
/// # Parameters
/// - `root`: The context to run in, usually from [`Context::global`].
/// - `source_name`: Name shown in error reports, such as a file name.
/// - `source_text`: The program.
///
/// # Returns
/// The value of the program's last statement, or null for an empty program.
///
/// # Examples
/// ```
/// use quill::{error::Error, evaluate, interpreter::environment::Context};
///
/// let root = Context::global();
/// let value = evaluate(&root, "<doc>", "var x = 1 + 2 * 3").unwrap();
/// assert_eq!(value.to_string(), "7");
///
/// // Bindings persist between calls.
/// let value = evaluate(&root, "<doc>", "x * 2").unwrap();
/// assert_eq!(value.to_string(), "14");
///
/// let err = evaluate(&root, "<doc>", "y").unwrap_err();
/// assert!(matches!(err, Error::Runtime(_)));
/// ```
pub fn evaluate(root: &Rc<Context>, source_name: &str, source_text: &str) -> Result<Value, Error> {
    let tokens = tokenize(source_name, source_text)?;
    let program = parse(&tokens)?;
    let value = root.eval(&program)?;
    debug!("{source_name} evaluated to {value}");
    Ok(value)
}
