//! Writes generated artifacts into the output directory.
//!
//! Filenames are derived from the prompt deterministically; two prompts
//! that normalize to the same string write to the same path, and the later
//! write wins. That collision is by design and is asserted in the tests.

use crate::languages::Language;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Derives the artifact filename for a prompt and language.
///
/// The prompt is lowercased and every character outside `[a-z0-9]` becomes
/// an underscore, one for one; the language extension is appended.
pub fn derive_filename(prompt: &str, language: Language) -> String {
    let stem: String = prompt
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' })
        .collect();
    format!("{}{}", stem, language.extension())
}

/// Owns the output directory and the artifact writes into it.
pub struct Workspace {
    output_dir: PathBuf,
}

impl Workspace {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The path a given prompt/language pair would be written to.
    pub fn artifact_path(&self, prompt: &str, language: Language) -> PathBuf {
        self.output_dir.join(derive_filename(prompt, language))
    }

    /// Persists generated text, creating the output directory on first use.
    ///
    /// An existing file at the derived path is overwritten silently.
    pub fn write(&self, prompt: &str, language: Language, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let path = self.artifact_path(prompt, language);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote generated code to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_filename_replaces_punctuation_per_character() {
        assert_eq!(
            derive_filename("Fibonacci function!!", Language::Python),
            "fibonacci_function__.py"
        );
    }

    #[test]
    fn test_filename_is_deterministic() {
        let a = derive_filename("Parse CSV rows", Language::Rust);
        let b = derive_filename("Parse CSV rows", Language::Rust);
        assert_eq!(a, b);
        assert_eq!(a, "parse_csv_rows.rs");
    }

    #[test]
    fn test_distinct_prompts_can_collide() {
        // Case differences vanish under normalization; the collision is by
        // design and results in a silent overwrite.
        assert_eq!(
            derive_filename("Sort list", Language::Python),
            derive_filename("sort List", Language::Python)
        );
    }

    #[test]
    fn test_empty_prompt_yields_bare_extension() {
        assert_eq!(derive_filename("", Language::Shell), ".sh");
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path().join("out"));

        let path = workspace
            .write("hello world", Language::Python, "print('hi')\n")
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "hello_world.py");
        assert_eq!(fs::read_to_string(&path).unwrap(), "print('hi')\n");
    }

    #[test]
    fn test_colliding_prompts_overwrite() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path().join("out"));

        let first = workspace
            .write("Sort list", Language::Python, "sorted(one)\n")
            .unwrap();
        let second = workspace
            .write("sort List", Language::Python, "sorted(two)\n")
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "sorted(two)\n");
    }
}
