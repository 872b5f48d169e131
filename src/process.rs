//! Process runner abstraction for invoking external binaries.
//!
//! The formatter probe/run and the highlighted preview both shell out; this
//! trait is the seam that lets tests run without spawning real processes.

use anyhow::Result;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Trait for running system processes.
pub trait ProcessRunner: Send + Sync {
    /// Executes a command and returns its output.
    fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Executes a command with `input` piped to its stdin.
    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<Output>;

    /// Checks if a program exists in PATH.
    fn program_exists(&self, program: &str) -> bool;
}

/// Default process runner using std::process::Command.
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd.output()?)
    }

    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<Output> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }

        Ok(child.wait_with_output()?)
    }

    fn program_exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
