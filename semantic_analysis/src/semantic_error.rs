use std::error::Error;
use std::fmt;

use shared_context::source_map::SourceMap;
use shared_context::symbol_table::Type;
use shared_context::Span;

/// Every diagnostic the analyser can raise. Each carries just enough
/// information to format a `SourceMap`-style message; the analyser stops
/// at the first one it raises.
#[derive(Debug)]
pub enum ErrorType<'a> {
    FunctionRedefined { name: &'a str, first: Span },
    VariableIsVoid { name: &'a str },
    VariableRedefined { name: &'a str, first: Span },
    VariableParamCollision { name: &'a str },
    Undeclared { name: &'a str },
    WhilePredicateNotBool { found: Type },
    IfPredicateNotBool { found: Type },
    AssignmentTypeMismatch { name: &'a str, found: Type, expected: Type },
    RelationOperandsNotInt,
    EqualOperandsMismatch,
    LogicalOperandsNotBool,
    ArithmeticOperandsNotInt,
    UnaryArithmeticOperandNotInt,
    UnaryLogicalOperandNotBool,
    FunctionNotDefined { name: &'a str },
    ArityMismatch { name: &'a str, expected: usize, found: usize },
    ArgumentTypeMismatch { index: usize, found: Type, expected: Type },
    ReturnArityMismatch { expected: usize, found: usize },
    ReturnTypeMismatch { function: &'a str, expected: Type, found: Type },
    BuiltinArityMismatch { builtin: &'a str, expected: usize, found: usize },
    BuiltinArgNotInt { builtin: &'a str, found: Type },
}

#[derive(Debug)]
pub struct SemanticErr {
    formatted: String,
}

impl SemanticErr {
    pub fn new(err: ErrorType<'_>, span: Span, source_map: &SourceMap) -> Self {
        let message = match err {
            ErrorType::FunctionRedefined { name, first } => format!(
                "function {name} redefined (previous definition at line {})",
                first.line
            ),
            ErrorType::VariableIsVoid { name } => format!("variable {name} is of type void"),
            ErrorType::VariableRedefined { name, first } => format!(
                "variable {name} redefined (previous definition at line {})",
                first.line
            ),
            ErrorType::VariableParamCollision { name } => {
                format!("variable {name} conflicts with function parameter")
            }
            ErrorType::Undeclared { name } => format!("identifier {name} undeclared"),
            ErrorType::WhilePredicateNotBool { found } => {
                format!("while predicate is of type {found}, bool expected")
            }
            ErrorType::IfPredicateNotBool { found } => {
                format!("if predicate is of type {found}, bool expected")
            }
            ErrorType::AssignmentTypeMismatch {
                name,
                found,
                expected,
            } => format!("assigning {found} to {name}, which is of type {expected}"),
            ErrorType::RelationOperandsNotInt => {
                "relation operator arguments must be int".to_string()
            }
            ErrorType::EqualOperandsMismatch => {
                "only values of the same type may be compared".to_string()
            }
            ErrorType::LogicalOperandsNotBool => {
                "logical operator arguments must be bool".to_string()
            }
            ErrorType::ArithmeticOperandsNotInt => {
                "arithmetic operator arguments must be int".to_string()
            }
            ErrorType::UnaryArithmeticOperandNotInt => {
                "arithmetic operator argument must be int".to_string()
            }
            ErrorType::UnaryLogicalOperandNotBool => {
                "logical operator argument must be bool".to_string()
            }
            ErrorType::FunctionNotDefined { name } => format!("function {name} not defined"),
            ErrorType::ArityMismatch {
                name,
                expected,
                found,
            } => format!("function {name} takes {expected} arguments, {found} given"),
            ErrorType::ArgumentTypeMismatch {
                index,
                found,
                expected,
            } => format!("argument {index} has type {found}, {expected} expected"),
            ErrorType::ReturnArityMismatch { expected, found } => format!(
                "return builtin takes exactly {expected} argument(s), {found} given"
            ),
            ErrorType::ReturnTypeMismatch {
                function,
                expected,
                found,
            } => format!(
                "return type of function {function} is {expected}, {found} given"
            ),
            ErrorType::BuiltinArityMismatch {
                builtin,
                expected,
                found,
            } => format!("{builtin} builtin takes exactly {expected} argument(s), {found} given"),
            ErrorType::BuiltinArgNotInt { builtin, found } => {
                format!("{builtin} builtin takes an int argument, {found} given")
            }
        };

        Self {
            formatted: source_map.format_message(message, span),
        }
    }
}

impl fmt::Display for SemanticErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted)
    }
}

impl Error for SemanticErr {}
