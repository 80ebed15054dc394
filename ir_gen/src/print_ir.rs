//! Renders a generated module back to textual LLVM IR.

use inkwell::module::Module;

/// Returns the module's IR exactly as `inkwell`'s own printer formats it.
/// Codegen's output contract stops here; the emitter crate is responsible
/// for getting this text onto standard output.
pub fn print_module(module: &Module) -> String {
    module.print_to_string().to_string()
}
