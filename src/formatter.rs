//! Probing and running external code formatters.
//!
//! A missing formatter is a normal condition: the probe answers `None` and
//! the session simply never offers the format step. A formatter that fails
//! after being offered is reported, but the already-written file stays as
//! it is.

use crate::languages::{FormatterSpec, Language};
use crate::process::ProcessRunner;
use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::{debug, info};

/// Checks whether the formatter for `language` is installed and responding.
///
/// The binary must exist on the PATH and exit successfully when invoked
/// with its version flag. Never returns an error; absence of a formatter
/// is an expected state, not a failure.
pub fn probe(language: Language, runner: &dyn ProcessRunner) -> Option<FormatterSpec> {
    let spec = language.formatter();

    if !runner.program_exists(spec.program) {
        debug!("Formatter '{}' not found on PATH", spec.program);
        return None;
    }

    match runner.run(spec.program, &[spec.version_flag]) {
        Ok(output) if output.status.success() => {
            debug!("Formatter '{}' probe succeeded", spec.program);
            Some(spec)
        }
        Ok(output) => {
            debug!("Formatter '{}' probe exited with {}", spec.program, output.status);
            None
        }
        Err(e) => {
            debug!("Formatter '{}' probe failed to execute: {}", spec.program, e);
            None
        }
    }
}

/// Runs the formatter in place against `path`.
///
/// A failure here does not roll back the written file.
pub fn run(spec: FormatterSpec, path: &Path, runner: &dyn ProcessRunner) -> Result<()> {
    let path_str = path.to_string_lossy();
    let mut args: Vec<&str> = spec.write_args.to_vec();
    args.push(&path_str);

    info!("Running formatter: {} {:?}", spec.program, args);
    let output = runner.run(spec.program, &args)?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(anyhow!(
            "{} exited with {}: {}",
            spec.program,
            output.status,
            stderr.trim()
        ))
    }
}
