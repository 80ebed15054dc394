pub mod ast;
mod parser;

pub use parser::parse_err::ParseErr;
pub use parser::Parser;

use ast::Program;
use shared_context::CompilerContext;

/// Parses a whole translation unit. Consumes a fresh lexer over the
/// source text held by `ctx.source_map`.
pub fn parse<'src, 'ctx>(
    ctx: &'ctx mut CompilerContext<'src>,
) -> Result<Program, ParseErr> {
    let source = ctx.source_map.get_source_code();
    let lexer = lexer::Lexer::new(source);
    let mut parser = Parser::new(lexer, ctx)?;
    parser.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{ExpressionKind, StatementKind};
    use shared_context::Bump;

    fn parse_src(src: &str) -> Result<Program, ParseErr> {
        let arena = Bump::new();
        let mut ctx = CompilerContext::new(&arena, "test.epica", src);
        parse(&mut ctx)
    }

    #[test]
    fn parses_a_function_with_parameters_and_an_empty_block() {
        let program = parse_src("int f(int n, bool b) { }").unwrap();
        assert_eq!(program.functions.len(), 1);
        let f = &program.functions[0];
        assert_eq!(f.params.len(), 2);
        match &f.body.kind {
            StatementKind::Block(statements) => assert!(statements.is_empty()),
            other => panic!("expected a block body, got {other:?}"),
        }
    }

    #[test]
    fn parses_void_parameter_list() {
        let program = parse_src("int f(void) { }").unwrap();
        assert!(program.functions[0].params.is_empty());
    }

    #[test]
    fn parses_variable_while_if_else_and_assignment_statements() {
        let program = parse_src(
            "int main() { \
                int x; \
                while (x < 10) { x = x + 1; } \
                if (x == 10) { write(x); } else { write(0); } \
            }",
        )
        .unwrap();

        let StatementKind::Block(statements) = &program.functions[0].body.kind else {
            panic!("expected block body");
        };
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[0].kind, StatementKind::Variable { .. }));
        assert!(matches!(statements[1].kind, StatementKind::While { .. }));
        match &statements[2].kind {
            StatementKind::If { negative, .. } => assert!(negative.is_some()),
            other => panic!("expected an if statement, got {other:?}"),
        }
    }

    #[test]
    fn precedence_climbing_binds_multiplication_tighter_than_addition() {
        let program = parse_src("int main() { int x; x = 1 + 2 * 3; }").unwrap();
        let StatementKind::Block(statements) = &program.functions[0].body.kind else {
            panic!("expected block body");
        };
        let StatementKind::Assignment { expr, .. } = &statements[1].kind else {
            panic!("expected an assignment");
        };
        match &expr.kind {
            ExpressionKind::BinOp { op, right, .. } => {
                assert_eq!(*op, ast::BinaryOp::Add);
                assert!(matches!(right.kind, ExpressionKind::BinOp { op: ast::BinaryOp::Mult, .. }));
            }
            other => panic!("expected a BinOp, got {other:?}"),
        }
    }

    #[test]
    fn parses_call_statement_and_call_expression_argument_order() {
        let program = parse_src("int main() { write(f(1, 2, 3)); }").unwrap();
        let StatementKind::Block(statements) = &program.functions[0].body.kind else {
            panic!("expected block body");
        };
        let StatementKind::Call(outer) = &statements[0].kind else {
            panic!("expected a call statement");
        };
        let ExpressionKind::CallExpr(inner) = &outer.args[0].kind else {
            panic!("expected a call expression argument");
        };
        let values: Vec<i64> = inner
            .args
            .iter()
            .map(|a| match a.kind {
                ExpressionKind::Integer(n) => n,
                _ => panic!("expected integer literal arguments"),
            })
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn rejects_a_missing_closing_brace() {
        let err = parse_src("int main() { ").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn rejects_a_malformed_parameter_list() {
        let err = parse_src("int f(int) { }").unwrap_err();
        assert!(err.to_string().contains("identifier"));
    }
}
