use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use log::debug;

use crate::{
    error::{Frame, RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::function::builtin::BUILTINS,
        lexer::{Position, Span},
        value::{Value, ValueKind},
    },
};

/// Label of the root context.
pub const PROGRAM_LABEL: &str = "<program>";

/// Variable bindings of one scope, chained to the enclosing scope.
#[derive(Default)]
pub struct Scope {
    bindings: HashMap<String, Value>,
    parent:   Option<Rc<RefCell<Self>>>,
}

impl Scope {
    #[must_use]
    pub fn new(parent: Option<Rc<RefCell<Self>>>) -> Self {
        Self { bindings: HashMap::new(),
               parent }
    }

    /// Looks `name` up here, then in each enclosing scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().get(name)
    }

    /// Binds `name` in this scope, replacing any earlier binding here.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

/// An execution context: the program itself or one function call.
///
/// Contexts form a chain through `parent`. A call's parent is the context the
/// function was defined in, so the chain follows lexical nesting, and
/// `call_site` records where the call happened for stack traces.
pub struct Context {
    /// `<program>`, a function name, or `<anonymous>`.
    pub label:     String,
    pub parent:    Option<Rc<Self>>,
    /// Where this context was entered from. `None` for the root.
    pub call_site: Option<Position>,
    pub scope:     Rc<RefCell<Scope>>,
}

impl Context {
    /// Builds the root context with the predefined constants and every
    /// built-in function.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::{environment::Context, value::ValueKind};
    ///
    /// let root = Context::global();
    /// assert_eq!(root.lookup("TRUE").unwrap().kind, ValueKind::Number(1.0));
    /// assert!(root.lookup("println").is_some());
    /// assert!(root.lookup("missing").is_none());
    /// ```
    #[must_use]
    pub fn global() -> Rc<Self> {
        let context = Rc::new(Self { label:     PROGRAM_LABEL.to_string(),
                                     parent:    None,
                                     call_site: None,
                                     scope:     Rc::new(RefCell::new(Scope::default())), });

        context.define("NULL", Value::new(ValueKind::Null));
        context.define("TRUE", Value::new(ValueKind::Number(1.0)));
        context.define("FALSE", Value::new(ValueKind::Number(0.0)));
        for builtin in BUILTINS {
            context.define(builtin.name, Value::new(ValueKind::BuiltIn(builtin)));
        }
        debug!("installed {} built-in functions", BUILTINS.len());

        context
    }

    /// Creates the context for one call of a function defined in `parent`.
    #[must_use]
    pub fn for_call(label: impl Into<String>, parent: &Rc<Self>, call_site: Position) -> Rc<Self> {
        let scope = Scope::new(Some(Rc::clone(&parent.scope)));
        Rc::new(Self { label:     label.into(),
                       parent:    Some(Rc::clone(parent)),
                       call_site: Some(call_site),
                       scope:     Rc::new(RefCell::new(scope)), })
    }

    /// Resolves `name` through the scope chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scope.borrow().get(name)
    }

    /// Binds `name` in this context's own scope.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().set(name, value);
    }

    /// Captures the call stack as seen from `at` inside this context,
    /// outermost frame first.
    #[must_use]
    pub fn trace(&self, at: &Position) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut position = at.clone();
        let mut context = Some(self);

        while let Some(current) = context {
            frames.push(Frame { label: current.label.clone(),
                                position });
            position = current.call_site.clone().unwrap_or_else(|| at.clone());
            context = current.parent.as_deref();
        }

        frames.reverse();
        frames
    }

    /// Builds a runtime error raised in this context.
    #[must_use]
    pub fn error(&self, kind: RuntimeErrorKind, span: Span) -> RuntimeError {
        let trace = self.trace(&span.start);
        RuntimeError::new(kind, span, trace)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context({})", self.label)
    }
}
