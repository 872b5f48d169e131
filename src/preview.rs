//! Best-effort highlighted preview of generated code.
//!
//! Highlighting is delegated to `bat` when it is installed; anything that
//! goes wrong falls back to printing the raw text. A preview can never
//! abort the generation flow.

use crate::languages::Language;
use crate::process::ProcessRunner;
use anyhow::Result;
use std::io::Write;
use tracing::debug;

const HIGHLIGHTER: &str = "bat";

/// Renders `content` to `out`, highlighted for `language` when possible.
pub fn render<W: Write>(
    content: &str,
    language: Language,
    runner: &dyn ProcessRunner,
    out: &mut W,
) -> Result<()> {
    if runner.program_exists(HIGHLIGHTER) {
        let args = [
            "--language",
            language.highlight_token(),
            "--color=always",
            "--style=plain",
        ];
        match runner.run_with_stdin(HIGHLIGHTER, &args, content) {
            Ok(output) if output.status.success() => {
                out.write_all(&output.stdout)?;
                return Ok(());
            }
            Ok(output) => {
                debug!("Highlighter exited with {}, falling back to plain text", output.status);
            }
            Err(e) => {
                debug!("Highlighter failed to run: {}, falling back to plain text", e);
            }
        }
    }

    writeln!(out, "{}", content.trim_end())?;
    Ok(())
}
