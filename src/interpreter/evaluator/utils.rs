use std::rc::Rc;

use crate::{
    ast::{ElseCase, IfCase, Node},
    error::RuntimeErrorKind,
    interpreter::{
        environment::Context,
        evaluator::core::EvalResult,
        lexer::Span,
        value::{Value, ValueKind, list::List},
    },
};

impl Context {
    /// Evaluates an `if` chain.
    ///
    /// The first case whose condition is truthy wins. Its body value is the
    /// result, or null when the body is in statement form. With no matching
    /// case the `else` arm is used the same way, and without one the result
    /// is null.
    pub(crate) fn eval_if(self: &Rc<Self>,
                          cases: &[IfCase],
                          else_case: Option<&ElseCase>,
                          span: &Span)
                          -> EvalResult<Value> {
        for case in cases {
            if self.eval(&case.condition)?.is_true() {
                return self.eval_arm(&case.body, case.suppress_result, span);
            }
        }

        match else_case {
            Some(arm) => self.eval_arm(&arm.body, arm.suppress_result, span),
            None => Ok(self.value(ValueKind::Null, span)),
        }
    }

    fn eval_arm(self: &Rc<Self>, body: &Node, suppress_result: bool, span: &Span) -> EvalResult<Value> {
        let value = self.eval(body)?;
        if suppress_result {
            return Ok(self.value(ValueKind::Null, span));
        }
        Ok(value)
    }

    /// Evaluates the elements of a list literal in order into a new list.
    pub(crate) fn eval_list_literal(self: &Rc<Self>,
                                    elements: &[Node],
                                    span: &Span)
                                    -> EvalResult<Value> {
        let items = elements.iter()
                            .map(|element| self.eval(element))
                            .collect::<EvalResult<Vec<_>>>()?;
        Ok(self.value(ValueKind::List(List::new(items)), span))
    }

    /// Evaluates `target[index]`.
    ///
    /// The index is evaluated first and must be a number; the target must be
    /// a list. The element is returned as a copy stamped with the access
    /// span.
    pub(crate) fn eval_list_index(self: &Rc<Self>,
                                  target: &Node,
                                  index: &Node,
                                  span: &Span)
                                  -> EvalResult<Value> {
        let index_value = self.eval(index)?;
        let ValueKind::Number(position) = index_value.kind else {
            let found = index_value.kind.type_name();
            return Err(self.error(RuntimeErrorKind::InvalidIndex { found },
                                  index.span().clone()));
        };

        let list = self.eval(target)?.stamped(span, self);
        let ValueKind::List(items) = &list.kind else {
            let kind = RuntimeErrorKind::IllegalOperation { op:    "[]",
                                                            left:  list.kind.type_name(),
                                                            right: "Number", };
            return Err(self.error(kind, span.clone()));
        };

        items.get(position)
             .map(|element| element.stamped(span, self))
             .map_err(|kind| self.error(kind, span.clone()))
    }
}
