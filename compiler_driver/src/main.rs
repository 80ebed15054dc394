//! `epica` — compiles a single source file and prints its LLVM IR.
//!
//! The pipeline (parse → analyse → lower → print) lives in [`stages`];
//! this binary is only responsible for argument handling, logger setup,
//! and mapping the pipeline's outcome onto an exit code.

mod stages;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

const USAGE: &str = "Usage: epica <source-file>";

#[derive(Parser)]
#[command(name = "epica", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    source_file: PathBuf,
}

/// Maps `EPICA_DEBUG`'s raw value onto a `log` verbosity level: `0` or
/// unset is `Warn`, `1` is `Info`, `2` is `Debug`, anything higher is
/// `Trace`. Unparsable values are silently treated as the quietest
/// setting.
fn trace_level_from(raw: Option<&str>) -> log::LevelFilter {
    match raw.and_then(|v| v.parse::<i64>().ok()) {
        None => log::LevelFilter::Warn,
        Some(n) if n <= 0 => log::LevelFilter::Warn,
        Some(1) => log::LevelFilter::Info,
        Some(2) => log::LevelFilter::Debug,
        Some(_) => log::LevelFilter::Trace,
    }
}

fn init_logger() {
    let raw = std::env::var("EPICA_DEBUG").ok();
    env_logger::Builder::new()
        .filter_level(trace_level_from(raw.as_deref()))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    init_logger();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match stages::compile(&cli.source_file) {
        Ok(ir_text) => match emitter::emit_to_stdout(&ir_text) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: failed to write output: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_unparsable_debug_level_is_quietest() {
        assert_eq!(trace_level_from(None), log::LevelFilter::Warn);
        assert_eq!(trace_level_from(Some("not-a-number")), log::LevelFilter::Warn);
        assert_eq!(trace_level_from(Some("-1")), log::LevelFilter::Warn);
    }

    #[test]
    fn debug_level_scales_with_the_configured_integer() {
        assert_eq!(trace_level_from(Some("1")), log::LevelFilter::Info);
        assert_eq!(trace_level_from(Some("2")), log::LevelFilter::Debug);
        assert_eq!(trace_level_from(Some("3")), log::LevelFilter::Trace);
        assert_eq!(trace_level_from(Some("99")), log::LevelFilter::Trace);
    }

    #[test]
    fn cli_rejects_missing_source_file_argument() {
        assert!(Cli::try_parse_from(["epica"]).is_err());
    }

    #[test]
    fn cli_accepts_a_single_source_file_argument() {
        let cli = Cli::try_parse_from(["epica", "program.epica"]).unwrap();
        assert_eq!(cli.source_file, PathBuf::from("program.epica"));
    }
}
