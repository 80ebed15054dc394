//! Name resolution and type checking for a parsed `Program`.
//!
//! Analysis runs in exactly two passes, per the language's attribute
//! grammar: [`scan_functions`] builds the flat function table, then
//! [`Analyser::analyse`] walks the whole tree once, threading inherited
//! attributes down (the enclosing function's parameter/local scope) and
//! synthesising attributes up (every expression's resolved `Type`). The
//! first error encountered aborts the walk.

mod attribute_resolution;
mod function_table;
pub mod semantic_error;

use parser::ast::Program;
use shared_context::source_map::SourceMap;
use shared_context::symbol_table::FunctionTable;

use crate::semantic_error::SemanticErr;

pub struct Analyser<'src, 'ctx> {
    pub(crate) source_map: &'ctx SourceMap<'src>,
    pub(crate) interner: &'ctx shared_context::interner::Interner<'src>,
    pub(crate) functions: FunctionTable,
    pub(crate) current_params: std::collections::HashMap<
        shared_context::interner::Symbol,
        shared_context::symbol_table::Type,
    >,
    pub(crate) current_vars: std::collections::HashMap<
        shared_context::interner::Symbol,
        (shared_context::symbol_table::Type, shared_context::Span),
    >,
    pub(crate) current_return_type: shared_context::symbol_table::Type,
    pub(crate) current_function_name: shared_context::Identifier,
}

/// Runs both passes over `program`, mutating its `Expression::ty` and
/// `Call::resolved` cells in place.
pub fn analyse<'src, 'ctx>(
    ctx: &'ctx shared_context::CompilerContext<'src>,
    program: &Program,
) -> Result<(), SemanticErr> {
    let mut analyser = Analyser {
        source_map: &ctx.source_map,
        interner: &ctx.interner,
        functions: FunctionTable::new(),
        current_params: std::collections::HashMap::new(),
        current_vars: std::collections::HashMap::new(),
        current_return_type: shared_context::symbol_table::Type::None,
        current_function_name: shared_context::Identifier::default(),
    };

    function_table::scan_functions(&mut analyser, program)?;
    log::debug!("function table built with {} entries", program.functions.len());

    for function in &program.functions {
        attribute_resolution::resolve_function(&mut analyser, function)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::ast::{ExpressionKind, StatementKind};
    use shared_context::symbol_table::Type;
    use shared_context::Bump;

    fn check(src: &str) -> Result<Program, String> {
        let arena = Bump::new();
        let mut ctx = shared_context::CompilerContext::new(&arena, "test.epica", src);
        let program = parser::parse(&mut ctx).map_err(|e| e.to_string())?;
        analyse(&ctx, &program).map_err(|e| e.to_string())?;
        Ok(program)
    }

    fn fails_with(src: &str, needle: &str) {
        let err = check(src).expect_err("expected analysis to fail");
        assert!(
            err.contains(needle),
            "expected error containing {needle:?}, got {err:?}"
        );
    }

    #[test]
    fn function_redefinition_reports_prior_location() {
        fails_with("int dup(int x) { } int dup(int y) { }", "dup redefined");
    }

    #[test]
    fn variable_redefinition_is_rejected() {
        fails_with("int main() { int x; bool x; }", "x redefined");
    }

    #[test]
    fn variable_colliding_with_a_parameter_is_rejected() {
        fails_with("int f(int x) { int x; }", "conflicts with function parameter");
    }

    #[test]
    fn void_typed_variable_is_rejected() {
        fails_with("int main() { void v; }", "is of type void");
    }

    #[test]
    fn undeclared_identifier_is_rejected() {
        fails_with("int main() { x = 1; }", "undeclared");
    }

    #[test]
    fn while_predicate_must_be_bool() {
        fails_with("int main() { while (1) { } }", "while predicate is of type int");
    }

    #[test]
    fn if_predicate_must_be_bool() {
        fails_with("int main() { if (1) { } }", "if predicate is of type int");
    }

    #[test]
    fn assignment_type_mismatch_is_a_hard_error() {
        fails_with("int main() { int x; x = (1 < 2); }", "assigning bool to x");
    }

    #[test]
    fn relational_operands_must_be_int() {
        fails_with("int main() { int x; x = (true < false); }", "relation operator arguments must be int");
    }

    #[test]
    fn equality_operands_must_match() {
        fails_with("int main() { bool b; b = (1 == true); }", "only values of the same type");
    }

    #[test]
    fn strict_boolean_operands_must_be_bool() {
        fails_with("int main() { bool b; b = (1 && true); }", "logical operator arguments must be bool");
    }

    #[test]
    fn arithmetic_operands_must_be_int() {
        fails_with("int main() { int x; x = (true + 1); }", "arithmetic operator arguments must be int");
    }

    #[test]
    fn unary_arithmetic_operand_must_be_int() {
        fails_with("int main() { bool b; b = -true; }", "arithmetic operator argument must be int");
    }

    #[test]
    fn unary_logical_operand_must_be_bool() {
        fails_with("int main() { int x; x = !1; }", "logical operator argument must be bool");
    }

    #[test]
    fn call_to_undefined_function_is_rejected() {
        fails_with("int main() { g(); }", "function g not defined");
    }

    #[test]
    fn call_arity_mismatch_is_rejected() {
        fails_with("int f(int x) { } int main() { f(); }", "takes 1 arguments, 0 given");
    }

    #[test]
    fn call_argument_type_mismatch_is_rejected() {
        fails_with("int f(int x) { } int main() { f(true); }", "argument 0 has type bool, int expected");
    }

    #[test]
    fn void_function_return_takes_no_arguments() {
        fails_with("void g() { return(1); }", "return builtin takes exactly 0 argument");
    }

    #[test]
    fn non_void_function_return_takes_exactly_one_argument() {
        fails_with("int f() { return(); }", "return builtin takes exactly 1 argument");
    }

    #[test]
    fn return_type_must_match_declared_return_type() {
        fails_with("int f() { return(true); }", "return type of function f is int, bool given");
    }

    #[test]
    fn read_builtin_takes_no_arguments() {
        fails_with("int main() { int x; x = read(1); }", "read builtin takes exactly 0");
    }

    #[test]
    fn write_builtin_requires_exactly_one_argument() {
        fails_with("int main() { write(); }", "write builtin takes exactly 1");
    }

    #[test]
    fn write_builtin_argument_must_be_int() {
        fails_with("int main() { write(true); }", "write builtin takes an int argument, bool given");
    }

    #[test]
    fn recursive_fibonacci_like_program_passes_analysis() {
        check(
            "int f(int n) { if (n < 2) { return(n); } return(f(n+(-1)) + f(n+(-2))); } \
             int main() { write(f(10)); return(0); }",
        )
        .expect("a well-typed recursive program should pass");
    }

    #[test]
    fn every_expression_is_typed_and_every_call_is_resolved_or_builtin() {
        const BUILTINS: [&str; 3] = ["return", "read", "write"];

        fn walk_stmt(interner: &shared_context::interner::Interner, stmt: &parser::ast::Statement) {
            match &stmt.kind {
                StatementKind::Block(statements) => {
                    statements.iter().for_each(|s| walk_stmt(interner, s))
                }
                StatementKind::Variable { .. } => {}
                StatementKind::Assignment { expr, .. } => walk_expr(interner, expr),
                StatementKind::While { pred, body } => {
                    walk_expr(interner, pred);
                    walk_stmt(interner, body);
                }
                StatementKind::If { pred, positive, negative } => {
                    walk_expr(interner, pred);
                    walk_stmt(interner, positive);
                    if let Some(negative) = negative {
                        walk_stmt(interner, negative);
                    }
                }
                StatementKind::Call(call) => {
                    call.args.iter().for_each(|a| walk_expr(interner, a))
                }
            }
        }

        fn walk_expr(interner: &shared_context::interner::Interner, expr: &parser::ast::Expression) {
            assert_ne!(expr.get_type(), Type::None, "every expression must be typed");
            if let ExpressionKind::CallExpr(call) = &expr.kind {
                if call.resolved.get().is_none() {
                    let name = interner.lookup(call.name.get_symbol());
                    assert!(
                        BUILTINS.contains(&name),
                        "a non-builtin call must resolve to a callee index"
                    );
                }
                call.args.iter().for_each(|a| walk_expr(interner, a));
            }
            if let ExpressionKind::BinOp { left, right, .. } = &expr.kind {
                walk_expr(interner, left);
                walk_expr(interner, right);
            }
            if let ExpressionKind::UnOp { operand, .. } = &expr.kind {
                walk_expr(interner, operand);
            }
        }

        let arena = Bump::new();
        let src = "int add(int a, int b) { return(a + b); } \
                   int main() { int x; x = add(1, 2); write(x); return(0); }";
        let mut ctx = shared_context::CompilerContext::new(&arena, "test.epica", src);
        let program = parser::parse(&mut ctx).expect("parse should succeed");
        analyse(&ctx, &program).expect("analysis should succeed");

        for function in &program.functions {
            walk_stmt(&ctx.interner, &function.body);
        }
    }
}
