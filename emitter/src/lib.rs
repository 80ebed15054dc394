//! Forwards a generated module's own textual rendering to an output
//! stream. This crate applies no formatting policy of its own: whatever
//! `ir_gen::print_ir::print_module` produces is what gets written, with
//! exactly one trailing newline.

use std::io::{self, Write};

/// Writes `ir_text` to `out`, trimming any trailing whitespace the
/// module printer left and appending a single newline, matching the
/// "textual IR ... followed by a newline" output contract.
pub fn emit(ir_text: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", ir_text.trim_end())
}

/// Convenience wrapper over [`emit`] that writes to standard output.
pub fn emit_to_stdout(ir_text: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    emit(ir_text, &mut handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_exactly_one_trailing_newline() {
        let mut buf = Vec::new();
        emit("define void @f() {\n}\n\n\n", &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "define void @f() {\n}\n");
    }

    #[test]
    fn adds_newline_when_missing() {
        let mut buf = Vec::new();
        emit("; empty module", &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "; empty module\n");
    }
}
