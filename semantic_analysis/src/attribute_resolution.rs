use parser::ast::{BinaryOp, Call, Expression, ExpressionKind, Function, Statement, StatementKind, UnaryOp};
use shared_context::symbol_table::Type;

use crate::semantic_error::{ErrorType, SemanticErr};
use crate::Analyser;

const BUILTINS: [&str; 3] = ["return", "read", "write"];

pub(crate) fn resolve_function(analyser: &mut Analyser, function: &Function) -> Result<(), SemanticErr> {
    analyser.current_params.clear();
    analyser.current_vars.clear();
    analyser.current_return_type = function.return_type;
    analyser.current_function_name = function.name;

    for param in &function.params {
        analyser.current_params.insert(param.name.get_symbol(), param.ty);
    }

    resolve_statement(analyser, &function.body)
}

fn resolve_statement(analyser: &mut Analyser, stmt: &Statement) -> Result<(), SemanticErr> {
    match &stmt.kind {
        StatementKind::Block(statements) => {
            for s in statements {
                resolve_statement(analyser, s)?;
            }
            Ok(())
        }
        StatementKind::Variable { ty, name } => {
            let symbol = name.get_symbol();
            let text = analyser.interner.lookup(symbol);

            if *ty == Type::Void {
                return Err(SemanticErr::new(
                    ErrorType::VariableIsVoid { name: text },
                    stmt.span,
                    analyser.source_map,
                ));
            }
            if let Some((_, first)) = analyser.current_vars.get(&symbol) {
                return Err(SemanticErr::new(
                    ErrorType::VariableRedefined { name: text, first: *first },
                    stmt.span,
                    analyser.source_map,
                ));
            }
            if analyser.current_params.contains_key(&symbol) {
                return Err(SemanticErr::new(
                    ErrorType::VariableParamCollision { name: text },
                    stmt.span,
                    analyser.source_map,
                ));
            }

            analyser.current_vars.insert(symbol, (*ty, stmt.span));
            Ok(())
        }
        StatementKind::Assignment { name, expr } => {
            resolve_expression(analyser, expr)?;

            let symbol = name.get_symbol();
            let declared = if let Some((ty, _)) = analyser.current_vars.get(&symbol) {
                *ty
            } else if let Some(ty) = analyser.current_params.get(&symbol) {
                *ty
            } else {
                let text = analyser.interner.lookup(symbol);
                return Err(SemanticErr::new(
                    ErrorType::Undeclared { name: text },
                    stmt.span,
                    analyser.source_map,
                ));
            };

            if declared != expr.get_type() {
                let text = analyser.interner.lookup(symbol);
                return Err(SemanticErr::new(
                    ErrorType::AssignmentTypeMismatch {
                        name: text,
                        found: expr.get_type(),
                        expected: declared,
                    },
                    stmt.span,
                    analyser.source_map,
                ));
            }
            Ok(())
        }
        StatementKind::While { pred, body } => {
            resolve_expression(analyser, pred)?;
            if pred.get_type() != Type::Bool {
                return Err(SemanticErr::new(
                    ErrorType::WhilePredicateNotBool { found: pred.get_type() },
                    stmt.span,
                    analyser.source_map,
                ));
            }
            resolve_statement(analyser, body)
        }
        StatementKind::If {
            pred,
            positive,
            negative,
        } => {
            resolve_expression(analyser, pred)?;
            if pred.get_type() != Type::Bool {
                return Err(SemanticErr::new(
                    ErrorType::IfPredicateNotBool { found: pred.get_type() },
                    stmt.span,
                    analyser.source_map,
                ));
            }
            resolve_statement(analyser, positive)?;
            if let Some(negative) = negative {
                resolve_statement(analyser, negative)?;
            }
            Ok(())
        }
        StatementKind::Call(call) => {
            resolve_call(analyser, call, stmt.span)?;
            Ok(())
        }
    }
}

fn resolve_expression(analyser: &mut Analyser, expr: &Expression) -> Result<(), SemanticErr> {
    match &expr.kind {
        ExpressionKind::Integer(_) => expr.set_type(Type::Int),
        ExpressionKind::Boolean(_) => expr.set_type(Type::Bool),
        ExpressionKind::Identifier(name) => {
            let symbol = name.get_symbol();
            if let Some((ty, _)) = analyser.current_vars.get(&symbol) {
                expr.set_type(*ty);
            } else if let Some(ty) = analyser.current_params.get(&symbol) {
                expr.set_type(*ty);
            } else {
                let text = analyser.interner.lookup(symbol);
                return Err(SemanticErr::new(
                    ErrorType::Undeclared { name: text },
                    expr.span,
                    analyser.source_map,
                ));
            }
        }
        ExpressionKind::BinOp { op, left, right } => {
            resolve_expression(analyser, left)?;
            resolve_expression(analyser, right)?;
            let (lt, rt) = (left.get_type(), right.get_type());

            match op {
                BinaryOp::Leq | BinaryOp::Geq | BinaryOp::Gt | BinaryOp::Lt => {
                    if lt != Type::Int || rt != Type::Int {
                        return Err(SemanticErr::new(
                            ErrorType::RelationOperandsNotInt,
                            expr.span,
                            analyser.source_map,
                        ));
                    }
                    expr.set_type(Type::Bool);
                }
                BinaryOp::Eq => {
                    if lt != rt {
                        return Err(SemanticErr::new(
                            ErrorType::EqualOperandsMismatch,
                            expr.span,
                            analyser.source_map,
                        ));
                    }
                    expr.set_type(Type::Bool);
                }
                BinaryOp::LogOr | BinaryOp::LogAnd | BinaryOp::LogXor => {
                    if lt != Type::Bool || rt != Type::Bool {
                        return Err(SemanticErr::new(
                            ErrorType::LogicalOperandsNotBool,
                            expr.span,
                            analyser.source_map,
                        ));
                    }
                    expr.set_type(Type::Bool);
                }
                BinaryOp::Or | BinaryOp::And | BinaryOp::Xor | BinaryOp::Add | BinaryOp::Mult | BinaryOp::Sub => {
                    if lt != Type::Int || rt != Type::Int {
                        return Err(SemanticErr::new(
                            ErrorType::ArithmeticOperandsNotInt,
                            expr.span,
                            analyser.source_map,
                        ));
                    }
                    expr.set_type(Type::Int);
                }
            }
        }
        ExpressionKind::UnOp { op, operand } => {
            resolve_expression(analyser, operand)?;
            let ty = operand.get_type();
            match op {
                UnaryOp::Neg | UnaryOp::Not => {
                    if ty != Type::Int {
                        return Err(SemanticErr::new(
                            ErrorType::UnaryArithmeticOperandNotInt,
                            expr.span,
                            analyser.source_map,
                        ));
                    }
                    expr.set_type(Type::Int);
                }
                UnaryOp::LogNot => {
                    if ty != Type::Bool {
                        return Err(SemanticErr::new(
                            ErrorType::UnaryLogicalOperandNotBool,
                            expr.span,
                            analyser.source_map,
                        ));
                    }
                    expr.set_type(Type::Bool);
                }
            }
        }
        ExpressionKind::CallExpr(call) => {
            let return_type = resolve_call(analyser, call, expr.span)?;
            expr.set_type(return_type);
        }
    }
    Ok(())
}

/// Resolves a call shared by statement and expression position: evaluates
/// arguments (post-order, so their types are ready), then dispatches to a
/// builtin or looks the callee up in the function table. Returns the
/// resolved return type.
fn resolve_call(analyser: &mut Analyser, call: &Call, span: shared_context::Span) -> Result<Type, SemanticErr> {
    for arg in &call.args {
        resolve_expression(analyser, arg)?;
    }

    let name = analyser.interner.lookup(call.name.get_symbol());

    if BUILTINS.contains(&name) {
        return resolve_builtin_call(analyser, name, call, span);
    }

    let sig = match analyser.functions.get(&call.name) {
        Some(sig) => sig.clone(),
        None => {
            return Err(SemanticErr::new(
                ErrorType::FunctionNotDefined { name },
                span,
                analyser.source_map,
            ))
        }
    };

    if call.args.len() != sig.param_types.len() {
        return Err(SemanticErr::new(
            ErrorType::ArityMismatch {
                name,
                expected: sig.param_types.len(),
                found: call.args.len(),
            },
            span,
            analyser.source_map,
        ));
    }

    for (index, (arg, expected)) in call.args.iter().zip(sig.param_types.iter()).enumerate() {
        if arg.get_type() != *expected {
            return Err(SemanticErr::new(
                ErrorType::ArgumentTypeMismatch {
                    index,
                    found: arg.get_type(),
                    expected: *expected,
                },
                arg.span,
                analyser.source_map,
            ));
        }
    }

    call.resolved.set(Some(sig.index));
    Ok(sig.return_type)
}

fn resolve_builtin_call(
    analyser: &Analyser,
    name: &str,
    call: &Call,
    span: shared_context::Span,
) -> Result<Type, SemanticErr> {
    match name {
        "return" => {
            if analyser.current_return_type != Type::Void {
                if call.args.len() != 1 {
                    return Err(SemanticErr::new(
                        ErrorType::ReturnArityMismatch {
                            expected: 1,
                            found: call.args.len(),
                        },
                        span,
                        analyser.source_map,
                    ));
                }
                if call.args[0].get_type() != analyser.current_return_type {
                    let function = analyser.interner.lookup(analyser.current_function_name.get_symbol());
                    return Err(SemanticErr::new(
                        ErrorType::ReturnTypeMismatch {
                            function,
                            expected: analyser.current_return_type,
                            found: call.args[0].get_type(),
                        },
                        span,
                        analyser.source_map,
                    ));
                }
            } else if !call.args.is_empty() {
                return Err(SemanticErr::new(
                    ErrorType::ReturnArityMismatch {
                        expected: 0,
                        found: call.args.len(),
                    },
                    span,
                    analyser.source_map,
                ));
            }
            Ok(Type::Void)
        }
        "read" => {
            if !call.args.is_empty() {
                return Err(SemanticErr::new(
                    ErrorType::BuiltinArityMismatch {
                        builtin: "read",
                        expected: 0,
                        found: call.args.len(),
                    },
                    span,
                    analyser.source_map,
                ));
            }
            Ok(Type::Int)
        }
        "write" => {
            if call.args.len() != 1 {
                return Err(SemanticErr::new(
                    ErrorType::BuiltinArityMismatch {
                        builtin: "write",
                        expected: 1,
                        found: call.args.len(),
                    },
                    span,
                    analyser.source_map,
                ));
            }
            if call.args[0].get_type() != Type::Int {
                return Err(SemanticErr::new(
                    ErrorType::BuiltinArgNotInt {
                        builtin: "write",
                        found: call.args[0].get_type(),
                    },
                    span,
                    analyser.source_map,
                ));
            }
            Ok(Type::Void)
        }
        _ => unreachable!("BUILTINS checked above"),
    }
}
