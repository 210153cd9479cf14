use std::{
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    interpreter::{
        environment::Context,
        lexer::Span,
        value::{
            function::{BuiltInFunction, FunctionValue},
            list::List,
        },
    },
    util::num::is_integral,
};

/// The type and payload of a runtime value.
#[derive(Debug, Clone)]
pub enum ValueKind {
    /// Every number is a double.
    Number(f64),
    String(String),
    /// Copies of a list share its elements.
    List(List),
    Function(Rc<FunctionValue>),
    BuiltIn(&'static BuiltInFunction),
    Null,
}

impl ValueKind {
    /// The type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Function(_) => "Function",
            Self::BuiltIn(_) => "BuiltInFunction",
            Self::Null => "Null",
        }
    }

    /// `1` for true, `0` for false.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        Self::Number(if value { 1.0 } else { 0.0 })
    }
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::BuiltIn(a), Self::BuiltIn(b)) => a.name == b.name,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ValueKind {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(list) => write!(f, "{list}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::BuiltIn(builtin) => write!(f, "<built-in function {}>", builtin.name),
            Self::Null => f.write_str("null"),
        }
    }
}

/// A runtime value.
///
/// Besides its [`ValueKind`], a value remembers where it was last produced
/// or read and which context produced it. Both are diagnostics only:
/// equality compares kinds alone.
#[derive(Clone)]
pub struct Value {
    pub kind:    ValueKind,
    pub span:    Option<Span>,
    /// Weak, so that values stored in a scope do not keep their own context
    /// alive.
    pub context: Option<Weak<Context>>,
}

impl Value {
    /// A value with no position or context, such as a predefined constant.
    #[must_use]
    pub const fn new(kind: ValueKind) -> Self {
        Self { kind,
               span: None,
               context: None }
    }

    /// A value produced at `span` inside `context`.
    #[must_use]
    pub fn at(kind: ValueKind, span: &Span, context: &Rc<Context>) -> Self {
        Self { kind,
               span: Some(span.clone()),
               context: Some(Rc::downgrade(context)) }
    }

    /// A copy of this value stamped with a new use site.
    ///
    /// Lists and functions in the copy share their payload with the original.
    #[must_use]
    pub fn stamped(&self, span: &Span, context: &Rc<Context>) -> Self {
        Self::at(self.kind.clone(), span, context)
    }

    /// The context that produced this value, if it is still alive.
    #[must_use]
    pub fn owner(&self) -> Option<Rc<Context>> {
        self.context.as_ref()?.upgrade()
    }

    /// Whether the value counts as true in conditions.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.kind.operand().is_true()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::new(ValueKind::Number(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::new(ValueKind::String(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_without_needless_fractions() {
        assert_eq!(ValueKind::Number(7.0).to_string(), "7");
        assert_eq!(ValueKind::Number(-0.0).to_string(), "0");
        assert_eq!(ValueKind::Number(2.5).to_string(), "2.5");
        assert_eq!(ValueKind::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn lists_quote_their_strings() {
        let list = List::new(vec![1.0.into(), "a".into(), Value::new(ValueKind::Null)]);
        assert_eq!(ValueKind::List(list).to_string(), r#"[1, "a", null]"#);
    }

    #[test]
    fn equality_ignores_diagnostics() {
        let plain: Value = 3.0.into();
        let mut located = plain.clone();
        located.context = Some(Weak::new());
        assert_eq!(plain, located);
        assert_ne!(ValueKind::Number(1.0), ValueKind::String("1".into()));
    }

    #[test]
    fn owner_does_not_outlive_its_context() {
        use crate::interpreter::lexer::{Position, Source};

        let span = Span::single(Position::start_of(Source::new("<test>", "x")));
        let root = Context::global();
        let call = Context::for_call("f", &root, span.start.clone());
        let value = Value::at(ValueKind::Number(1.0), &span, &call);

        assert!(value.owner().is_some_and(|owner| Rc::ptr_eq(&owner, &call)));
        drop(call);
        assert!(value.owner().is_none());
    }
}
