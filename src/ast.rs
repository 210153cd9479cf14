use std::{fmt, rc::Rc};

use crate::interpreter::lexer::Span;

/// Binary operators, from arithmetic to logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Equality (`==`)
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

impl BinaryOperator {
    /// The operator as it is written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+x`, multiplies by one.
    Plus,
    /// `-x`, multiplies by minus one.
    Minus,
    /// `not x`, logical negation by truthiness.
    Not,
}

impl UnaryOperator {
    /// The operator as it is written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "not",
        }
    }
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    pub condition:       Node,
    pub body:            Node,
    /// The body was written in statement form, so the arm evaluates to null.
    pub suppress_result: bool,
}

/// The trailing `else` arm of an `if` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseCase {
    pub body:            Node,
    pub suppress_result: bool,
}

/// A function definition, shared between the AST and every function value
/// created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// `None` for anonymous functions.
    pub name:            Option<String>,
    pub params:          Vec<String>,
    pub body:            Node,
    /// Statement-form functions (declared without `->`) return null.
    pub suppress_result: bool,
}

/// A node of the syntax tree.
///
/// Every variant carries the span from its first to its last token, computed
/// when the parser builds the node. Blocks and the program itself are
/// [`Node::StatementList`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A number literal such as `42` or `2.5`.
    NumberLiteral {
        value: f64,
        span:  Span,
    },
    /// A string literal, already unescaped.
    StringLiteral {
        value: String,
        span:  Span,
    },
    /// `[a, b, c]`
    ListLiteral {
        elements: Vec<Self>,
        span:     Span,
    },
    /// `left op right`
    BinaryOp {
        left:  Box<Self>,
        op:    BinaryOperator,
        right: Box<Self>,
        span:  Span,
    },
    /// `op operand`
    UnaryOp {
        op:      UnaryOperator,
        operand: Box<Self>,
        span:    Span,
    },
    /// `var name = value`; a missing initializer binds null.
    VarAssign {
        name:  String,
        value: Option<Box<Self>>,
        span:  Span,
    },
    /// `name = value` for a name that is already bound.
    VarReassign {
        name:  String,
        value: Box<Self>,
        span:  Span,
    },
    /// A bare identifier.
    VarAccess {
        name: String,
        span: Span,
    },
    /// `target[index]`
    ListIndexAccess {
        target: Box<Self>,
        index:  Box<Self>,
        span:   Span,
    },
    /// An `if`/`elif`/`else` chain.
    If {
        cases:     Vec<IfCase>,
        else_case: Option<Box<ElseCase>>,
        span:      Span,
    },
    /// `for var = start to end step step { body }`
    For {
        var:             String,
        start:           Box<Self>,
        end:             Box<Self>,
        step:            Option<Box<Self>>,
        body:            Box<Self>,
        suppress_result: bool,
        span:            Span,
    },
    /// `while condition { body }`
    While {
        condition:       Box<Self>,
        body:            Box<Self>,
        suppress_result: bool,
        span:            Span,
    },
    /// `fun name(params) -> { body }`
    FunctionDef {
        def:  Rc<FunctionDef>,
        span: Span,
    },
    /// `callee(args)`
    Call {
        callee: Box<Self>,
        args:   Vec<Self>,
        span:   Span,
    },
    /// Statements separated by newlines or `;`.
    StatementList {
        statements: Vec<Self>,
        span:       Span,
    },
}

impl Node {
    /// The source span this node was parsed from.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::NumberLiteral { span, .. }
            | Self::StringLiteral { span, .. }
            | Self::ListLiteral { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::VarAssign { span, .. }
            | Self::VarReassign { span, .. }
            | Self::VarAccess { span, .. }
            | Self::ListIndexAccess { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. }
            | Self::FunctionDef { span, .. }
            | Self::Call { span, .. }
            | Self::StatementList { span, .. } => span,
        }
    }
}
