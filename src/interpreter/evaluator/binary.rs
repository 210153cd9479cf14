use std::rc::Rc;

use log::trace;

use crate::{
    ast::{BinaryOperator, Node},
    error::RuntimeErrorKind,
    interpreter::{
        environment::Context,
        evaluator::core::EvalResult,
        lexer::Span,
        value::Value,
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated, left first, before the operator is
    /// applied; `and` and `or` do not short-circuit. The error for an
    /// unsupported operand pair spans the whole operation, except division by
    /// zero, which points at the divisor.
    ///
    /// # Parameters
    /// - `left`: Left operand node.
    /// - `op`: The operator.
    /// - `right`: Right operand node.
    /// - `span`: Span of the whole operation.
    pub(crate) fn eval_binary_op(self: &Rc<Self>,
                                 left: &Node,
                                 op: BinaryOperator,
                                 right: &Node,
                                 span: &Span)
                                 -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;
        trace!("{} {op} {}", lhs.kind.type_name(), rhs.kind.type_name());

        match lhs.kind.binary(op, &rhs) {
            Ok(kind) => Ok(self.value(kind, span)),
            Err(RuntimeErrorKind::DivisionByZero) => {
                Err(self.error(RuntimeErrorKind::DivisionByZero, right.span().clone()))
            },
            Err(kind) => Err(self.error(kind, span.clone())),
        }
    }
}
