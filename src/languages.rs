//! The fixed set of target languages and their formatter registry.
//!
//! Every language the assistant can generate maps to a file extension, a
//! highlight token understood by `bat`, and a [`FormatterSpec`] describing
//! the external binary that rewrites a source file in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An external formatter for one language.
///
/// `program` is probed with `version_flag` before the formatter is ever
/// offered; `write_args` are the flags that make it rewrite the target file
/// in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterSpec {
    pub program: &'static str,
    pub version_flag: &'static str,
    pub write_args: &'static [&'static str],
}

/// Languages the assistant can generate code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Rust,
    C,
    Cpp,
    Shell,
}

impl Language {
    /// All supported languages, in menu order.
    pub const ALL: [Language; 7] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Rust,
        Language::C,
        Language::Cpp,
        Language::Shell,
    ];

    /// Language used when the selection dialog is cancelled.
    pub const FALLBACK: Language = Language::Python;

    /// File extension for generated artifacts, including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => ".py",
            Language::JavaScript => ".js",
            Language::TypeScript => ".ts",
            Language::Rust => ".rs",
            Language::C => ".c",
            Language::Cpp => ".cpp",
            Language::Shell => ".sh",
        }
    }

    /// Token passed to `bat --language` when previewing.
    pub fn highlight_token(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Rust => "rust",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Shell => "bash",
        }
    }

    /// The in-place formatter for this language.
    pub fn formatter(&self) -> FormatterSpec {
        match self {
            Language::Python => FormatterSpec {
                program: "black",
                version_flag: "--version",
                write_args: &[],
            },
            Language::JavaScript | Language::TypeScript => FormatterSpec {
                program: "prettier",
                version_flag: "--version",
                write_args: &["--write"],
            },
            Language::Rust => FormatterSpec {
                program: "rustfmt",
                version_flag: "--version",
                write_args: &[],
            },
            Language::C | Language::Cpp => FormatterSpec {
                program: "clang-format",
                version_flag: "--version",
                write_args: &["-i"],
            },
            Language::Shell => FormatterSpec {
                program: "shfmt",
                version_flag: "--version",
                write_args: &["-w"],
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Rust => "Rust",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Shell => "Shell",
        };
        write!(f, "{}", name)
    }
}
