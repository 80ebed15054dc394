use parser::ast::Program;
use shared_context::symbol_table::FunctionSignature;

use crate::semantic_error::{ErrorType, SemanticErr};
use crate::Analyser;

/// First pass: record every top-level function's signature before any
/// body is inspected, so forward references and redefinitions are caught
/// up front.
pub(crate) fn scan_functions(analyser: &mut Analyser, program: &Program) -> Result<(), SemanticErr> {
    for (index, function) in program.functions.iter().enumerate() {
        let sig = FunctionSignature {
            name: function.name,
            return_type: function.return_type,
            param_types: function.params.iter().map(|p| p.ty).collect(),
            span: function.span,
            index,
        };

        if let Some(previous) = analyser.functions.insert(sig) {
            let name = analyser.interner.lookup(function.name.get_symbol());
            return Err(SemanticErr::new(
                ErrorType::FunctionRedefined {
                    name,
                    first: previous.span,
                },
                function.span,
                analyser.source_map,
            ));
        }
    }
    Ok(())
}
