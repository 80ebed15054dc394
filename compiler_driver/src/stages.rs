//! Orchestrates the pipeline: parse, analyse, lower to LLVM IR, print.
//!
//! Each stage fully completes before the next begins; any `Err` returned
//! here aborts the pipeline and is the driver's cue to exit with status 1.

use std::error::Error;
use std::path::Path;

use inkwell::context::Context;
use shared_context::{Bump, CompilerContext};

/// Runs the full pipeline over the source file at `source_path` and
/// returns the emitted module's textual IR.
pub fn compile(source_path: &Path) -> Result<String, Box<dyn Error>> {
    let source_code = std::fs::read_to_string(source_path)?;
    let file_name = source_path.to_string_lossy().into_owned();

    let arena = Bump::new();
    let mut ctx = CompilerContext::new(&arena, &file_name, &source_code);

    let program = parser::parse(&mut ctx)?;
    log::info!(
        "parsed {} function(s) from {file_name}",
        program.functions.len()
    );

    semantic_analysis::analyse(&ctx, &program)?;
    log::info!("semantic analysis succeeded");

    let llvm_context = Context::create();
    let module = ir_gen::generate(&llvm_context, &file_name, &ctx.interner, &program);
    log::info!("lowered {} function(s) to LLVM IR", program.functions.len());

    Ok(ir_gen::print_ir::print_module(&module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn compile_source(src: &str) -> Result<String, Box<dyn Error>> {
        let file = tempfile_with(src);
        compile(file.path_buf())
    }

    /// Minimal scratch-file helper: writes `src` to a uniquely-named file
    /// under the system temp directory and removes it on drop.
    struct ScratchFile {
        path: std::path::PathBuf,
    }

    impl ScratchFile {
        fn path_buf(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn tempfile_with(src: &str) -> ScratchFile {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);

        let path = std::env::temp_dir().join(format!(
            "epica-stages-test-{:?}-{id}.epica",
            std::thread::current().id(),
        ));
        let mut file = std::fs::File::create(&path).expect("create scratch file");
        file.write_all(src.as_bytes()).expect("write scratch file");
        ScratchFile { path }
    }

    #[test]
    fn compiles_recursive_fibonacci_like_program() {
        let ir = compile_source(
            "int f(int n) { if (n < 2) { return(n); } return(f(n+(-1)) + f(n+(-2))); } \
             int main() { write(f(10)); return(0); }",
        )
        .expect("pipeline should succeed");

        assert!(ir.contains("@f("));
        assert!(ir.contains("@main("));
        assert!(ir.contains("declare"));
    }

    #[test]
    fn aborts_on_semantic_error() {
        let err = compile_source("int dup(int x) { } int dup(int y) { }").unwrap_err();
        assert!(err.to_string().contains("redefined"));
    }

    #[test]
    fn aborts_on_parse_error() {
        let err = compile_source("int main( { }").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
