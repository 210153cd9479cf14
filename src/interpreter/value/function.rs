use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{environment::Context, value::{Value, ValueKind}},
};

/// Label used for anonymous functions in stack traces and arity errors.
pub const ANONYMOUS_LABEL: &str = "<anonymous>";

/// A user-defined function closed over the context it was defined in.
pub struct FunctionValue {
    pub def:     Rc<FunctionDef>,
    /// Strong, so the defining context outlives its call. A named function
    /// stored in that context's own scope forms a cycle that is never freed.
    pub closure: Rc<Context>,
}

impl FunctionValue {
    #[must_use]
    pub const fn new(def: Rc<FunctionDef>, closure: Rc<Context>) -> Self {
        Self { def, closure }
    }

    /// The declared name, or `<anonymous>`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name.as_deref().unwrap_or(ANONYMOUS_LABEL)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}, {:?})", self.name(), self.closure)
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.def.name {
            Some(name) => write!(f, "<function {name}>"),
            None => f.write_str("<anonymous function>"),
        }
    }
}

/// Signature of a native function: evaluated arguments in, a value or an
/// error message out.
pub type NativeFn = fn(&[Value]) -> Result<ValueKind, String>;

/// A function implemented in Rust.
pub struct BuiltInFunction {
    pub name:   &'static str,
    /// Parameter names; their count is the exact arity.
    pub params: &'static [&'static str],
    pub func:   NativeFn,
}

impl fmt::Debug for BuiltInFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltIn({})", self.name)
    }
}
