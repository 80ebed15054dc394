use inkwell::values::BasicValueEnum;

use parser::ast::{BinaryOp, Expression, ExpressionKind, UnaryOp};

use crate::gen_statements::signed_predicate;
use crate::FunctionEmitter;

impl<'ctx, 'm, 'src> FunctionEmitter<'ctx, 'm, 'src> {
    pub(crate) fn emit_expression(&mut self, expr: &Expression) -> BasicValueEnum<'ctx> {
        match &expr.kind {
            ExpressionKind::Integer(n) => self.context.i64_type().const_int(*n as u64, true).into(),
            ExpressionKind::Boolean(b) => self.context.bool_type().const_int(*b as u64, false).into(),
            ExpressionKind::Identifier(name) => {
                let (slot, ty) = *self
                    .locals
                    .get(&name.get_symbol())
                    .expect("identifier resolved by semantic analysis");
                self.builder.build_load(ty, slot, "load").unwrap()
            }
            ExpressionKind::CallExpr(call) => self
                .emit_call(call, expr.span)
                .expect("expression-form call must produce a value"),
            ExpressionKind::BinOp { op, left, right } => self.emit_binop(*op, left, right),
            ExpressionKind::UnOp { op, operand } => self.emit_unop(*op, operand),
        }
    }

    fn emit_binop(&mut self, op: BinaryOp, left: &Expression, right: &Expression) -> BasicValueEnum<'ctx> {
        let lhs = self.emit_expression(left).into_int_value();
        let rhs = self.emit_expression(right).into_int_value();

        match op {
            BinaryOp::Add => self.builder.build_int_add(lhs, rhs, "add").unwrap().into(),
            BinaryOp::Sub => self.builder.build_int_sub(lhs, rhs, "sub").unwrap().into(),
            BinaryOp::Mult => self.builder.build_int_mul(lhs, rhs, "mul").unwrap().into(),
            BinaryOp::Or | BinaryOp::LogOr => self.builder.build_or(lhs, rhs, "or").unwrap().into(),
            BinaryOp::And | BinaryOp::LogAnd => self.builder.build_and(lhs, rhs, "and").unwrap().into(),
            BinaryOp::Xor | BinaryOp::LogXor => self.builder.build_xor(lhs, rhs, "xor").unwrap().into(),
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Leq | BinaryOp::Geq | BinaryOp::Eq => self
                .builder
                .build_int_compare(signed_predicate(op), lhs, rhs, "cmp")
                .unwrap()
                .into(),
        }
    }

    fn emit_unop(&mut self, op: UnaryOp, operand: &Expression) -> BasicValueEnum<'ctx> {
        let value = self.emit_expression(operand).into_int_value();
        let ty = value.get_type();

        let subtrahend = match op {
            UnaryOp::Neg => ty.const_int(0, false),
            UnaryOp::Not | UnaryOp::LogNot => ty.const_all_ones(),
        };

        self.builder.build_int_sub(subtrahend, value, "neg").unwrap().into()
    }
}
