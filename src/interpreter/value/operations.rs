use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeErrorKind,
    interpreter::value::{
        Value, ValueKind,
        function::{BuiltInFunction, FunctionValue},
        list::List,
    },
};

pub type OpResult = Result<ValueKind, RuntimeErrorKind>;

/// The operator capabilities of a value type.
///
/// Every operation defaults to an Illegal Operation error, so a type only
/// implements the operators it supports. Binary operators are dispatched to
/// the left operand.
pub trait Operand {
    fn type_name(&self) -> &'static str;

    /// Truthiness. Only nonzero numbers and nonempty strings are true.
    fn is_true(&self) -> bool {
        false
    }

    fn illegal(&self, op: BinaryOperator, other: &Value) -> RuntimeErrorKind {
        RuntimeErrorKind::IllegalOperation { op:    op.symbol(),
                                             left:  self.type_name(),
                                             right: other.kind.type_name(), }
    }

    fn added_to(&self, other: &Value) -> OpResult {
        Err(self.illegal(BinaryOperator::Add, other))
    }

    fn subbed_by(&self, other: &Value) -> OpResult {
        Err(self.illegal(BinaryOperator::Sub, other))
    }

    fn multed_by(&self, other: &Value) -> OpResult {
        Err(self.illegal(BinaryOperator::Mul, other))
    }

    fn dived_by(&self, other: &Value) -> OpResult {
        Err(self.illegal(BinaryOperator::Div, other))
    }

    fn powed_by(&self, other: &Value) -> OpResult {
        Err(self.illegal(BinaryOperator::Pow, other))
    }

    /// `== != < > <= >=`
    fn compared(&self, op: BinaryOperator, other: &Value) -> OpResult {
        Err(self.illegal(op, other))
    }

    /// `and`, `or`
    fn combined(&self, op: BinaryOperator, other: &Value) -> OpResult {
        Err(self.illegal(op, other))
    }

    /// Prefix `+` and `-`.
    fn signed(&self, op: UnaryOperator) -> OpResult {
        Err(RuntimeErrorKind::IllegalUnaryOperation { op:      op.symbol(),
                                                      operand: self.type_name(), })
    }

    /// `not` works on every type through truthiness.
    fn notted(&self) -> ValueKind {
        ValueKind::from_bool(!self.is_true())
    }
}

impl Operand for f64 {
    fn type_name(&self) -> &'static str {
        "Number"
    }

    fn is_true(&self) -> bool {
        *self != 0.0
    }

    fn added_to(&self, other: &Value) -> OpResult {
        match &other.kind {
            ValueKind::Number(n) => Ok(ValueKind::Number(self + n)),
            ValueKind::String(s) => Ok(ValueKind::String(format!("{}{s}", ValueKind::Number(*self)))),
            _ => Err(self.illegal(BinaryOperator::Add, other)),
        }
    }

    fn subbed_by(&self, other: &Value) -> OpResult {
        match other.kind {
            ValueKind::Number(n) => Ok(ValueKind::Number(self - n)),
            _ => Err(self.illegal(BinaryOperator::Sub, other)),
        }
    }

    fn multed_by(&self, other: &Value) -> OpResult {
        match other.kind {
            ValueKind::Number(n) => Ok(ValueKind::Number(self * n)),
            _ => Err(self.illegal(BinaryOperator::Mul, other)),
        }
    }

    fn dived_by(&self, other: &Value) -> OpResult {
        match other.kind {
            ValueKind::Number(n) if n == 0.0 => Err(RuntimeErrorKind::DivisionByZero),
            ValueKind::Number(n) => Ok(ValueKind::Number(self / n)),
            _ => Err(self.illegal(BinaryOperator::Div, other)),
        }
    }

    fn powed_by(&self, other: &Value) -> OpResult {
        match other.kind {
            ValueKind::Number(n) => Ok(ValueKind::Number(self.powf(n))),
            _ => Err(self.illegal(BinaryOperator::Pow, other)),
        }
    }

    #[allow(clippy::float_cmp)]
    fn compared(&self, op: BinaryOperator, other: &Value) -> OpResult {
        let ValueKind::Number(n) = other.kind else {
            return Err(self.illegal(op, other));
        };
        let result = match op {
            BinaryOperator::Equal => *self == n,
            BinaryOperator::NotEqual => *self != n,
            BinaryOperator::Less => *self < n,
            BinaryOperator::Greater => *self > n,
            BinaryOperator::LessEqual => *self <= n,
            BinaryOperator::GreaterEqual => *self >= n,
            _ => return Err(self.illegal(op, other)),
        };
        Ok(ValueKind::from_bool(result))
    }

    fn combined(&self, op: BinaryOperator, other: &Value) -> OpResult {
        let ValueKind::Number(n) = other.kind else {
            return Err(self.illegal(op, other));
        };
        match op {
            BinaryOperator::And => Ok(ValueKind::from_bool(self.is_true() && n.is_true())),
            BinaryOperator::Or => Ok(ValueKind::from_bool(self.is_true() || n.is_true())),
            _ => Err(self.illegal(op, other)),
        }
    }

    fn signed(&self, op: UnaryOperator) -> OpResult {
        match op {
            UnaryOperator::Plus => Ok(ValueKind::Number(self * 1.0)),
            UnaryOperator::Minus => Ok(ValueKind::Number(self * -1.0)),
            UnaryOperator::Not => Ok(self.notted()),
        }
    }
}

impl Operand for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn is_true(&self) -> bool {
        !self.is_empty()
    }

    fn added_to(&self, other: &Value) -> OpResult {
        match &other.kind {
            ValueKind::String(s) => Ok(ValueKind::String(format!("{self}{s}"))),
            number @ ValueKind::Number(_) => Ok(ValueKind::String(format!("{self}{number}"))),
            _ => Err(self.illegal(BinaryOperator::Add, other)),
        }
    }
}

impl Operand for List {
    fn type_name(&self) -> &'static str {
        "List"
    }

    /// Appends `other` in place and returns the same list.
    fn added_to(&self, other: &Value) -> OpResult {
        self.push(other.clone());
        Ok(ValueKind::List(self.clone()))
    }

    /// Removes the element at index `other` in place and returns the same
    /// list.
    fn subbed_by(&self, other: &Value) -> OpResult {
        match other.kind {
            ValueKind::Number(index) => {
                self.remove(index)?;
                Ok(ValueKind::List(self.clone()))
            },
            _ => Err(self.illegal(BinaryOperator::Sub, other)),
        }
    }
}

impl Operand for FunctionValue {
    fn type_name(&self) -> &'static str {
        "Function"
    }
}

impl Operand for BuiltInFunction {
    fn type_name(&self) -> &'static str {
        "BuiltInFunction"
    }
}

/// Operand for [`ValueKind::Null`].
pub struct Null;

impl Operand for Null {
    fn type_name(&self) -> &'static str {
        "Null"
    }
}

impl ValueKind {
    /// The operator capabilities of this value's type.
    #[must_use]
    pub fn operand(&self) -> &dyn Operand {
        match self {
            Self::Number(n) => n,
            Self::String(s) => s,
            Self::List(list) => list,
            Self::Function(function) => function.as_ref(),
            Self::BuiltIn(builtin) => *builtin,
            Self::Null => &Null,
        }
    }

    /// Applies a binary operator with `self` on the left.
    ///
    /// # Example
    /// ```
    /// use quill::{ast::BinaryOperator, interpreter::value::{Value, ValueKind}};
    ///
    /// let left = ValueKind::String("n = ".into());
    /// let sum = left.binary(BinaryOperator::Add, &Value::from(4.0)).unwrap();
    /// assert_eq!(sum, ValueKind::String("n = 4".into()));
    /// ```
    pub fn binary(&self, op: BinaryOperator, other: &Value) -> OpResult {
        let left = self.operand();
        match op {
            BinaryOperator::Add => left.added_to(other),
            BinaryOperator::Sub => left.subbed_by(other),
            BinaryOperator::Mul => left.multed_by(other),
            BinaryOperator::Div => left.dived_by(other),
            BinaryOperator::Pow => left.powed_by(other),
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::LessEqual
            | BinaryOperator::GreaterEqual => left.compared(op, other),
            BinaryOperator::And | BinaryOperator::Or => left.combined(op, other),
        }
    }

    /// Applies a prefix operator.
    pub fn unary(&self, op: UnaryOperator) -> OpResult {
        let operand = self.operand();
        match op {
            UnaryOperator::Not => Ok(operand.notted()),
            UnaryOperator::Plus | UnaryOperator::Minus => operand.signed(op),
        }
    }
}
