use std::rc::Rc;

use log::debug;

use crate::{
    ast::{FunctionDef, Node},
    error::RuntimeErrorKind,
    interpreter::{
        environment::Context,
        evaluator::core::EvalResult,
        lexer::Span,
        value::{
            Value, ValueKind,
            function::{BuiltInFunction, FunctionValue},
        },
    },
};

impl Context {
    /// Creates a function value closing over this context. A named function
    /// is also bound in the current scope.
    pub(crate) fn eval_function_def(self: &Rc<Self>,
                                    def: &Rc<FunctionDef>,
                                    span: &Span)
                                    -> EvalResult<Value> {
        let function = FunctionValue::new(Rc::clone(def), Rc::clone(self));
        let value = self.value(ValueKind::Function(Rc::new(function)), span);

        if let Some(name) = &def.name {
            debug!("defining function '{name}' in {}", self.label);
            self.define(name.as_str(), value.clone());
        }
        Ok(value)
    }

    /// Evaluates a call.
    ///
    /// The callee is evaluated first, then the arguments left to right. The
    /// result is a copy stamped with the call span.
    ///
    /// # Errors
    /// - The callee is not a function.
    /// - The argument count differs from the parameter count.
    /// - Any error raised while evaluating the arguments or the body.
    pub(crate) fn eval_call(self: &Rc<Self>,
                            callee: &Node,
                            args: &[Node],
                            span: &Span)
                            -> EvalResult<Value> {
        let target = self.eval(callee)?.stamped(span, self);
        let args = args.iter()
                       .map(|arg| self.eval(arg))
                       .collect::<EvalResult<Vec<_>>>()?;

        let result = match &target.kind {
            ValueKind::Function(function) => self.call_function(function, args, span)?,
            ValueKind::BuiltIn(builtin) => self.call_builtin(builtin, &args, span)?,
            other => {
                return Err(self.error(RuntimeErrorKind::NotCallable { found: other.type_name() },
                                      span.clone()));
            },
        };

        Ok(self.value(result, span))
    }

    /// Runs a user-defined function in a new context whose parent is the
    /// function's defining context.
    fn call_function(self: &Rc<Self>,
                     function: &FunctionValue,
                     args: Vec<Value>,
                     span: &Span)
                     -> EvalResult<ValueKind> {
        let name = function.name();
        let def = &function.def;
        self.check_arity(name, def.params.len(), args.len(), span)?;

        debug!("calling {name} with {} args", args.len());
        let context = Context::for_call(name, &function.closure, span.start.clone());
        for (param, arg) in def.params.iter().zip(args) {
            let bound = match &arg.span {
                Some(arg_span) => arg.stamped(arg_span, &context),
                None => arg,
            };
            context.define(param.as_str(), bound);
        }

        let value = context.eval(&def.body)?;
        if def.suppress_result {
            return Ok(ValueKind::Null);
        }
        Ok(value.kind)
    }

    fn call_builtin(self: &Rc<Self>,
                    builtin: &BuiltInFunction,
                    args: &[Value],
                    span: &Span)
                    -> EvalResult<ValueKind> {
        self.check_arity(builtin.name, builtin.params.len(), args.len(), span)?;

        debug!("calling built-in {} with {} args", builtin.name, args.len());
        (builtin.func)(args).map_err(|message| {
                                self.error(RuntimeErrorKind::Native(message), span.clone())
                            })
    }

    /// Fails unless exactly `expected` arguments were passed.
    fn check_arity(&self, name: &str, expected: usize, given: usize, span: &Span) -> EvalResult<()> {
        let kind = if given > expected {
            RuntimeErrorKind::TooManyArgs { count: given - expected,
                                            name:  name.to_string(), }
        } else if given < expected {
            RuntimeErrorKind::TooFewArgs { count: expected - given,
                                           name:  name.to_string(), }
        } else {
            return Ok(());
        };
        Err(self.error(kind, span.clone()))
    }
}
