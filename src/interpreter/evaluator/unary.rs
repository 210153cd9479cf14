use std::rc::Rc;

use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        environment::Context,
        evaluator::core::EvalResult,
        lexer::Span,
        value::Value,
    },
};

impl Context {
    /// Evaluates a prefix operation.
    ///
    /// `-x` multiplies by minus one and `+x` by one; both need a number.
    /// `not x` is `1` when `x` is falsy and `0` otherwise, for any type.
    pub(crate) fn eval_unary_op(self: &Rc<Self>,
                                op: UnaryOperator,
                                operand: &Node,
                                span: &Span)
                                -> EvalResult<Value> {
        let value = self.eval(operand)?;
        let result = value.kind
                          .unary(op)
                          .map_err(|kind| self.error(kind, span.clone()))?;
        Ok(self.value(result, span))
    }
}
