use std::rc::Rc;

use log::trace;

use crate::{
    ast::Node,
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::Context,
        lexer::Span,
        value::{Value, ValueKind},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Context {
    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for evaluation; it dispatches on the
    /// node variant. Every expression yields a value: constructs with nothing
    /// to return, such as statement-form loops, yield null.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    ///
    /// # Returns
    /// The value of the node, stamped with its span and this context.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::{
    ///     environment::Context, lexer::tokenize, parser::parse, value::ValueKind,
    /// };
    ///
    /// let root = Context::global();
    /// let program = parse(&tokenize("<doc>", "var x = 2\nx * 21").unwrap()).unwrap();
    ///
    /// assert_eq!(root.eval(&program).unwrap().kind, ValueKind::Number(42.0));
    /// ```
    pub fn eval(self: &Rc<Self>, node: &Node) -> EvalResult<Value> {
        match node {
            Node::NumberLiteral { value, span } => Ok(self.value(ValueKind::Number(*value), span)),
            Node::StringLiteral { value, span } => {
                Ok(self.value(ValueKind::String(value.clone()), span))
            },
            Node::ListLiteral { elements, span } => self.eval_list_literal(elements, span),
            Node::BinaryOp { left,
                             op,
                             right,
                             span, } => self.eval_binary_op(left, *op, right, span),
            Node::UnaryOp { op, operand, span } => self.eval_unary_op(*op, operand, span),
            Node::VarAssign { name, value, span } => {
                self.eval_var_assign(name, value.as_deref(), span)
            },
            Node::VarReassign { name, value, span } => self.eval_var_reassign(name, value, span),
            Node::VarAccess { name, span } => self.eval_var_access(name, span),
            Node::ListIndexAccess { target, index, span } => {
                self.eval_list_index(target, index, span)
            },
            Node::If { cases,
                       else_case,
                       span, } => self.eval_if(cases, else_case.as_deref(), span),
            Node::For { var,
                        start,
                        end,
                        step,
                        body,
                        suppress_result,
                        span, } => self.eval_for(var,
                                                 start,
                                                 end,
                                                 step.as_deref(),
                                                 body,
                                                 *suppress_result,
                                                 span),
            Node::While { condition,
                          body,
                          suppress_result,
                          span, } => self.eval_while(condition, body, *suppress_result, span),
            Node::FunctionDef { def, span } => self.eval_function_def(def, span),
            Node::Call { callee, args, span } => self.eval_call(callee, args, span),
            Node::StatementList { statements, span } => self.eval_statements(statements, span),
        }
    }

    /// Wraps `kind` into a value produced at `span` in this context.
    pub(crate) fn value(self: &Rc<Self>, kind: ValueKind, span: &Span) -> Value {
        Value::at(kind, span, self)
    }

    /// Evaluates statements in order. The last statement's value is the
    /// list's value; an empty list is null.
    fn eval_statements(self: &Rc<Self>, statements: &[Node], span: &Span) -> EvalResult<Value> {
        let mut last = self.value(ValueKind::Null, span);
        for statement in statements {
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    /// Reads a variable. The result is a copy stamped with the use site.
    fn eval_var_access(self: &Rc<Self>, name: &str, span: &Span) -> EvalResult<Value> {
        trace!("reading '{name}' in {}", self.label);
        self.lookup(name)
            .map(|value| value.stamped(span, self))
            .ok_or_else(|| {
                self.error(RuntimeErrorKind::UndefinedVariable { name: name.to_string() },
                           span.clone())
            })
    }

    /// Binds a new variable in the current scope; no initializer binds null.
    fn eval_var_assign(self: &Rc<Self>,
                       name: &str,
                       value: Option<&Node>,
                       span: &Span)
                       -> EvalResult<Value> {
        let value = match value {
            Some(node) => self.eval(node)?,
            None => self.value(ValueKind::Null, span),
        };
        self.define(name, value.clone());
        Ok(value)
    }

    /// Rebinds a variable that already resolves somewhere in the scope chain.
    ///
    /// The new binding goes into the current scope, so reassigning an outer
    /// variable from inside a function shadows it for the rest of the call.
    fn eval_var_reassign(self: &Rc<Self>,
                         name: &str,
                         value: &Node,
                         span: &Span)
                         -> EvalResult<Value> {
        if self.lookup(name).is_none() {
            return Err(self.error(RuntimeErrorKind::UndefinedVariable { name: name.to_string() },
                                  span.clone()));
        }
        let value = self.eval(value)?;
        self.define(name, value.clone());
        Ok(value)
    }
}
