use inkwell::IntPredicate;

use parser::ast::{Call, Statement, StatementKind};

use crate::{llvm_basic_type, FunctionEmitter};

impl<'ctx, 'm, 'src> FunctionEmitter<'ctx, 'm, 'src> {
    pub(crate) fn emit_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Block(statements) => {
                for s in statements {
                    self.emit_statement(s);
                }
            }
            StatementKind::Variable { ty, name } => {
                let llvm_ty = llvm_basic_type(self.context, *ty);
                let slot_name = self.interner.lookup(name.get_symbol());
                let slot = self.builder.build_alloca(llvm_ty, slot_name).unwrap();
                self.locals.insert(name.get_symbol(), (slot, llvm_ty));
            }
            StatementKind::Assignment { name, expr } => {
                let value = self.emit_expression(expr);
                let (slot, _) = *self
                    .locals
                    .get(&name.get_symbol())
                    .expect("assignment target resolved by semantic analysis");
                self.builder.build_store(slot, value).unwrap();
            }
            StatementKind::While { pred, body } => self.emit_while(pred, body),
            StatementKind::If {
                pred,
                positive,
                negative,
            } => self.emit_if(pred, positive, negative.as_deref()),
            StatementKind::Call(call) => {
                self.emit_call(call, stmt.span);
            }
        }
    }

    fn emit_while(&mut self, pred: &parser::ast::Expression, body: &Statement) {
        let loop_bb = self.new_block("while.loop");
        self.builder.build_unconditional_branch(loop_bb).unwrap();

        self.builder.position_at_end(loop_bb);
        self.emit_statement(body);

        let pred_val = self.emit_expression(pred).into_int_value();
        let next_bb = self.new_block("while.next");
        self.builder
            .build_conditional_branch(pred_val, loop_bb, next_bb)
            .unwrap();

        self.builder.position_at_end(next_bb);
    }

    fn emit_if(
        &mut self,
        pred: &parser::ast::Expression,
        positive: &Statement,
        negative: Option<&Statement>,
    ) {
        let pred_val = self.emit_expression(pred).into_int_value();

        let true_bb = self.new_block("if.true");
        let join_bb = self.new_block("if.join");
        let false_bb = negative.map(|_| self.new_block("if.false"));

        self.builder
            .build_conditional_branch(pred_val, true_bb, false_bb.unwrap_or(join_bb))
            .unwrap();

        self.builder.position_at_end(true_bb);
        self.emit_statement(positive);
        self.builder.build_unconditional_branch(join_bb).unwrap();

        if let (Some(negative), Some(false_bb)) = (negative, false_bb) {
            self.builder.position_at_end(false_bb);
            self.emit_statement(negative);
            self.builder.build_unconditional_branch(join_bb).unwrap();
        }

        self.builder.position_at_end(join_bb);
    }

    /// Lowers a call in statement position, where any return value is
    /// discarded. Returns the callee's value for reuse by expression-form
    /// calls.
    pub(crate) fn emit_call(
        &mut self,
        call: &Call,
        span: shared_context::Span,
    ) -> Option<inkwell::values::BasicValueEnum<'ctx>> {
        let name = self.interner.lookup(call.name.get_symbol());

        match name {
            "return" => {
                match call.args.first() {
                    Some(arg) => {
                        let value = self.emit_expression(arg);
                        self.builder.build_return(Some(&value)).unwrap();
                    }
                    None => {
                        self.builder.build_return(None).unwrap();
                    }
                }
                let unreach = self.new_block("unreach");
                self.builder.position_at_end(unreach);
                None
            }
            "read" => {
                let read_fn = self.module.get_function("read").expect("read builtin declared");
                let call_site = self.builder.build_call(read_fn, &[], "read_call").unwrap();
                call_site.try_as_basic_value().left()
            }
            "write" => {
                let arg = call.args.first().expect("arity checked by semantic analysis");
                let value = self.emit_expression(arg);
                let write_fn = self.module.get_function("write").expect("write builtin declared");
                self.builder
                    .build_call(write_fn, &[value.into()], "")
                    .unwrap();
                None
            }
            _ => {
                let index = call
                    .resolved
                    .get()
                    .unwrap_or_else(|| panic!("unresolved call survived semantic analysis at {:?}", span));
                let callee = self.function_values[index];

                let args: Vec<inkwell::values::BasicMetadataValueEnum> = call
                    .args
                    .iter()
                    .map(|arg| self.emit_expression(arg).into())
                    .collect();

                let call_site = self.builder.build_call(callee, &args, "call").unwrap();
                call_site.try_as_basic_value().left()
            }
        }
    }
}

/// Maps a signed-comparison operator to its LLVM integer predicate.
pub(crate) fn signed_predicate(op: parser::ast::BinaryOp) -> IntPredicate {
    use parser::ast::BinaryOp::*;
    match op {
        Lt => IntPredicate::SLT,
        Gt => IntPredicate::SGT,
        Leq => IntPredicate::SLE,
        Geq => IntPredicate::SGE,
        Eq => IntPredicate::EQ,
        _ => unreachable!("not a comparison operator"),
    }
}
