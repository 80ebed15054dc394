//! Lowers a semantically-analysed [`parser::ast::Program`] directly to LLVM
//! IR via `inkwell`.
//!
//! There is no intermediate three-address-code form: each source function
//! becomes one LLVM function, built in a single pass over its body. Codegen
//! trusts the semantic analyser completely — every type mismatch or
//! undeclared name has already been rejected, so the only failure mode left
//! here is an internal invariant violation (`Type::Char`/`Type::None`
//! reaching this stage), which panics rather than returning a `Result`.

mod gen_expressions;
mod gen_statements;
pub mod print_ir;

use std::collections::HashMap;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::passes::PassManager;
use inkwell::types::{BasicMetadataTypeEnum, BasicTypeEnum};
use inkwell::values::{FunctionValue, PointerValue};

use parser::ast::{Function, Program};
use shared_context::interner::{Interner, Symbol};
use shared_context::symbol_table::Type;

/// Declares the external `read`/`write` builtins in `module`, returning
/// their `FunctionValue`s so call sites can be built against them.
fn declare_builtins<'ctx>(context: &'ctx Context, module: &Module<'ctx>) {
    let i64_type = context.i64_type();
    let void_type = context.void_type();

    module.add_function("read", i64_type.fn_type(&[], false), Some(Linkage::External));
    module.add_function(
        "write",
        void_type.fn_type(&[i64_type.into()], false),
        Some(Linkage::External),
    );
}

/// Is the source name entitled to external linkage? Per the language's
/// naming convention, `main` and any identifier beginning with `x` are
/// external; every other user function is internal to the module.
fn is_external_name(name: &str) -> bool {
    name == "main" || name.starts_with('x')
}

fn llvm_basic_type<'ctx>(context: &'ctx Context, ty: Type) -> BasicTypeEnum<'ctx> {
    match ty {
        Type::Int => context.i64_type().into(),
        Type::Bool => context.bool_type().into(),
        Type::Void | Type::Char | Type::None => {
            unreachable!("type {ty} must not reach code generation")
        }
    }
}

/// Generates a fresh LLVM module named `module_name` from `program`.
///
/// `interner` resolves the `Identifier`s stored on AST nodes back to their
/// source text, needed for function names, parameter/variable names, and
/// the linkage-rule name check.
pub fn generate<'ctx>(
    context: &'ctx Context,
    module_name: &str,
    interner: &Interner,
    program: &Program,
) -> Module<'ctx> {
    let module = context.create_module(module_name);
    let builder = context.create_builder();

    declare_builtins(context, &module);

    let function_values: Vec<FunctionValue<'ctx>> = program
        .functions
        .iter()
        .map(|function| declare_function(context, &module, interner, function))
        .collect();

    let fpm: PassManager<FunctionValue<'ctx>> = PassManager::create(&module);
    fpm.add_cfg_simplification_pass();
    fpm.initialize();

    for (function, llvm_function) in program.functions.iter().zip(function_values.iter().copied()) {
        let mut emitter = FunctionEmitter {
            context,
            module: &module,
            builder: &builder,
            interner,
            function_values: &function_values,
            locals: HashMap::new(),
            llvm_function,
            return_type: function.return_type,
        };
        emitter.emit_function(function);
        fpm.run_on(&llvm_function);
        log::debug!(
            "lowered function `{}` to LLVM IR",
            interner.lookup(function.name.get_symbol())
        );
    }

    module
}

fn declare_function<'ctx>(
    context: &'ctx Context,
    module: &Module<'ctx>,
    interner: &Interner,
    function: &Function,
) -> FunctionValue<'ctx> {
    let name = interner.lookup(function.name.get_symbol());

    let param_types: Vec<BasicMetadataTypeEnum> = function
        .params
        .iter()
        .map(|p| llvm_basic_type(context, p.ty).into())
        .collect();

    let fn_type = match function.return_type {
        Type::Void => context.void_type().fn_type(&param_types, false),
        Type::Int => context.i64_type().fn_type(&param_types, false),
        Type::Bool => context.bool_type().fn_type(&param_types, false),
        Type::Char | Type::None => unreachable!("type must not reach code generation"),
    };

    let linkage = if is_external_name(name) {
        Linkage::External
    } else {
        Linkage::Internal
    };

    module.add_function(name, fn_type, Some(linkage))
}

/// Per-function lowering state: the basic-block cursor lives implicitly in
/// `builder`'s insertion point, and `locals` maps a variable or parameter
/// name to the stack slot `alloca` backs it and that slot's type.
pub(crate) struct FunctionEmitter<'ctx, 'm, 'src> {
    context: &'ctx Context,
    module: &'m Module<'ctx>,
    builder: &'m Builder<'ctx>,
    interner: &'m Interner<'src>,
    function_values: &'m [FunctionValue<'ctx>],
    locals: HashMap<Symbol, (PointerValue<'ctx>, BasicTypeEnum<'ctx>)>,
    llvm_function: FunctionValue<'ctx>,
    return_type: Type,
}

impl<'ctx, 'm, 'src> FunctionEmitter<'ctx, 'm, 'src> {
    fn emit_function(&mut self, function: &Function) {
        let entry = self.context.append_basic_block(self.llvm_function, "entry");
        self.builder.position_at_end(entry);

        for (index, param) in function.params.iter().enumerate() {
            let ty = llvm_basic_type(self.context, param.ty);
            let name = self.interner.lookup(param.name.get_symbol());
            let slot = self.builder.build_alloca(ty, name).unwrap();
            let incoming = self.llvm_function.get_nth_param(index as u32).unwrap();
            self.builder.build_store(slot, incoming).unwrap();
            self.locals.insert(param.name.get_symbol(), (slot, ty));
        }

        self.emit_statement(&function.body);

        match self.return_type {
            Type::Void => {
                self.builder.build_return(None).unwrap();
            }
            Type::Int => {
                let zero = self.context.i64_type().const_int(0, true);
                self.builder.build_return(Some(&zero)).unwrap();
            }
            Type::Bool => {
                let zero = self.context.bool_type().const_int(0, false);
                self.builder.build_return(Some(&zero)).unwrap();
            }
            Type::Char | Type::None => unreachable!("type must not reach code generation"),
        }
    }

    fn new_block(&self, name: &str) -> BasicBlock<'ctx> {
        self.context.append_basic_block(self.llvm_function, name)
    }
}
