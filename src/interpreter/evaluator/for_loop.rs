use std::rc::Rc;

use log::trace;

use crate::{
    ast::Node,
    error::RuntimeErrorKind,
    interpreter::{
        environment::Context,
        evaluator::core::EvalResult,
        lexer::Span,
        value::{Value, ValueKind, list::List},
    },
};

impl Context {
    /// Evaluates a counted `for` loop.
    ///
    /// `start`, `end` and `step` (default `1`) are evaluated once and must be
    /// numbers. The loop variable is bound in the current scope before each
    /// iteration and runs while `i < end` for a non-negative step, or while
    /// `i > end` for a negative one.
    ///
    /// # Returns
    /// A list of the body values, or null for a statement-form body.
    ///
    /// # Example
    /// ```
    /// use quill::{evaluate, interpreter::environment::Context};
    ///
    /// let root = Context::global();
    /// let value = evaluate(&root, "<doc>", "for i = 3 to 0 step -1 { i }").unwrap();
    /// assert_eq!(value.to_string(), "[3, 2, 1]");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn eval_for(self: &Rc<Self>,
                           var: &str,
                           start: &Node,
                           end: &Node,
                           step: Option<&Node>,
                           body: &Node,
                           suppress_result: bool,
                           span: &Span)
                           -> EvalResult<Value> {
        let start = self.eval_bound("start", start)?;
        let end = self.eval_bound("end", end)?;
        let step = match step {
            Some(node) => self.eval_bound("step", node)?,
            None => 1.0,
        };
        trace!("for {var} = {start} to {end} step {step}");

        let mut collected = Vec::new();
        let mut i = start;
        while if step >= 0.0 { i < end } else { i > end } {
            self.define(var, self.value(ValueKind::Number(i), span));
            let value = self.eval(body)?;
            if !suppress_result {
                collected.push(value);
            }
            i += step;
        }

        Ok(self.collected(collected, suppress_result, span))
    }

    /// Evaluates a `while` loop, re-checking `condition` before every
    /// iteration.
    ///
    /// # Returns
    /// A list of the body values, or null for a statement-form body.
    pub(crate) fn eval_while(self: &Rc<Self>,
                             condition: &Node,
                             body: &Node,
                             suppress_result: bool,
                             span: &Span)
                             -> EvalResult<Value> {
        let mut collected = Vec::new();
        while self.eval(condition)?.is_true() {
            let value = self.eval(body)?;
            if !suppress_result {
                collected.push(value);
            }
        }

        Ok(self.collected(collected, suppress_result, span))
    }

    /// Evaluates a loop bound, which must be a number.
    fn eval_bound(self: &Rc<Self>, bound: &'static str, node: &Node) -> EvalResult<f64> {
        let value = self.eval(node)?;
        match value.kind {
            ValueKind::Number(n) => Ok(n),
            other => Err(self.error(RuntimeErrorKind::ExpectedNumber { bound,
                                                                       found: other.type_name() },
                                    node.span().clone())),
        }
    }

    fn collected(self: &Rc<Self>, values: Vec<Value>, suppress_result: bool, span: &Span) -> Value {
        let kind = if suppress_result {
            ValueKind::Null
        } else {
            ValueKind::List(List::new(values))
        };
        self.value(kind, span)
    }
}
