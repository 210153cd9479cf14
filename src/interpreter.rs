/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a flat sequence of
/// tokens, each stamped with the span of text it came from. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with type and source location.
/// - Handles number and string literals, identifiers, keywords and operators.
/// - Reports lexical errors for unknown or unfinished input.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// # Responsibilities
/// - Converts tokens into [`Node`](crate::ast::Node)s with precedence and
///   associativity applied.
/// - Separates statements on newlines and `;`, tolerating blank lines.
/// - Reports the first syntax error with the tokens it expected.
pub mod parser;
/// Execution contexts and variable scopes.
///
/// A [`Context`](environment::Context) exists for the program and for each
/// function call; scopes chain lexically so closures see their defining
/// environment.
pub mod environment;
/// The evaluator module executes syntax trees and computes results.
///
/// # Responsibilities
/// - Evaluates every node kind, including loops, conditionals and calls.
/// - Creates closures and call contexts.
/// - Reports runtime errors with a stack trace.
pub mod evaluator;
/// The value module defines the runtime data types.
///
/// Numbers, strings, lists, functions, built-in functions and null, along
/// with the operators each of them supports.
pub mod value;
