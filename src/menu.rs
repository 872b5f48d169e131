//! Interactive menu dialogs.
//!
//! Every dialog takes its I/O streams as parameters so tests can drive the
//! whole surface with in-memory buffers; thin convenience wrappers bind
//! stdin/stdout for production use.

use crate::history::HistoryEntry;
use crate::languages::Language;
use anyhow::Result;
use std::io::{BufRead, Write};
use time::format_description::well_known::Rfc3339;
use tracing::info;

/// Selection made at the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    NewCode,
    ViewHistory,
    CreateGist,
    Exit,
}

/// Renders menus and collects user input.
pub struct MenuUi;

impl MenuUi {
    pub fn new() -> Self {
        Self
    }

    /// Reads one line; `None` means end of input (menu cancellation).
    fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes = input.read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Shows the main menu and reads a choice, re-prompting on invalid
    /// input. End of input counts as choosing to exit.
    pub fn main_choice_with_io<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<MainChoice> {
        writeln!(output, "\n{}", "=".repeat(60))?;
        writeln!(output, "🧞 fiat — AI code generation studio")?;
        writeln!(output, "{}", "=".repeat(60))?;
        writeln!(output)?;
        writeln!(output, "  1. ✨ Generate new code")?;
        writeln!(output, "  2. 📜 View history")?;
        writeln!(output, "  3. 🌐 Create gist")?;
        writeln!(output, "  4. 👋 Exit")?;

        loop {
            write!(output, "\nChoose an option (1/2/3/4): ")?;
            output.flush()?;

            let Some(choice) = Self::read_line(input)? else {
                info!("Input closed at main menu, exiting");
                return Ok(MainChoice::Exit);
            };

            match choice.as_str() {
                "1" => return Ok(MainChoice::NewCode),
                "2" => return Ok(MainChoice::ViewHistory),
                "3" => return Ok(MainChoice::CreateGist),
                "4" | "q" => return Ok(MainChoice::Exit),
                _ => {
                    writeln!(output, "Invalid choice. Please enter 1, 2, 3 or 4.")?;
                }
            }
        }
    }

    /// Collects the free-text prompt. The text is trimmed but an empty
    /// prompt is allowed through; `None` means input was cancelled.
    pub fn read_prompt_with_io<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<String>> {
        write!(output, "\n💬 Describe the code you want: ")?;
        output.flush()?;
        Self::read_line(input)
    }

    /// Shows the language list and reads a selection. Anything that is not
    /// a valid index falls back to the default language.
    pub fn select_language_with_io<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Language> {
        writeln!(output, "\nTarget language:")?;
        for (i, lang) in Language::ALL.iter().enumerate() {
            writeln!(output, "  {}. {}", i + 1, lang)?;
        }
        write!(
            output,
            "Choose a language (1-{}) [default {}]: ",
            Language::ALL.len(),
            Language::FALLBACK
        )?;
        output.flush()?;

        let selection = Self::read_line(input)?
            .and_then(|s| s.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Language::ALL.get(i).copied());

        Ok(selection.unwrap_or_else(|| {
            info!("Language selection cancelled, falling back to {}", Language::FALLBACK);
            Language::FALLBACK
        }))
    }

    /// Asks a yes/no question; only an explicit yes answers true.
    pub fn confirm_with_io<R: BufRead, W: Write>(
        &self,
        question: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool> {
        write!(output, "{} (y/N): ", question)?;
        output.flush()?;

        let answer = Self::read_line(input)?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    /// Collects one required field; empty input or EOF cancels.
    pub fn read_field_with_io<R: BufRead, W: Write>(
        &self,
        label: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<String>> {
        write!(output, "{}: ", label)?;
        output.flush()?;

        match Self::read_line(input)? {
            Some(value) if !value.is_empty() => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// Renders history entries in chronological order.
    pub fn show_history_with_io<W: Write>(
        &self,
        entries: &[HistoryEntry],
        output: &mut W,
    ) -> Result<()> {
        writeln!(output, "\n{}", "-".repeat(60))?;
        if entries.is_empty() {
            writeln!(output, "📜 No generations recorded yet.")?;
            return Ok(());
        }

        writeln!(output, "📜 Recent generations:")?;
        for entry in entries {
            let stamp = entry
                .timestamp
                .format(&Rfc3339)
                .unwrap_or_else(|_| "<invalid timestamp>".to_string());
            writeln!(
                output,
                "  [{}] {} · {:?} → {}",
                stamp, entry.language, entry.prompt, entry.file_path
            )?;
        }
        Ok(())
    }
}

impl Default for MenuUi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use time::macros::datetime;

    #[test]
    fn test_main_choice_parses_each_option() {
        let ui = MenuUi::new();
        for (text, expected) in [
            ("1\n", MainChoice::NewCode),
            ("2\n", MainChoice::ViewHistory),
            ("3\n", MainChoice::CreateGist),
            ("4\n", MainChoice::Exit),
            ("q\n", MainChoice::Exit),
        ] {
            let mut input = Cursor::new(text.as_bytes());
            let mut output = Vec::new();
            let choice = ui.main_choice_with_io(&mut input, &mut output).unwrap();
            assert_eq!(choice, expected, "for input {:?}", text);
        }
    }

    #[test]
    fn test_main_choice_retries_on_invalid_input() {
        let ui = MenuUi::new();
        let mut input = Cursor::new(b"nope\n2\n");
        let mut output = Vec::new();

        let choice = ui.main_choice_with_io(&mut input, &mut output).unwrap();

        assert_eq!(choice, MainChoice::ViewHistory);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid choice"));
    }

    #[test]
    fn test_main_choice_eof_exits() {
        let ui = MenuUi::new();
        let mut input = Cursor::new(b"");
        let mut output = Vec::new();

        let choice = ui.main_choice_with_io(&mut input, &mut output).unwrap();
        assert_eq!(choice, MainChoice::Exit);
    }

    #[test]
    fn test_prompt_is_trimmed_but_empty_is_allowed() {
        let ui = MenuUi::new();
        let mut input = Cursor::new(b"  spaced out  \n");
        let mut output = Vec::new();
        let prompt = ui.read_prompt_with_io(&mut input, &mut output).unwrap();
        assert_eq!(prompt.as_deref(), Some("spaced out"));

        let mut input = Cursor::new(b"\n");
        let prompt = ui.read_prompt_with_io(&mut input, &mut output).unwrap();
        assert_eq!(prompt.as_deref(), Some(""));
    }

    #[test]
    fn test_language_selection_by_number() {
        let ui = MenuUi::new();
        let mut input = Cursor::new(b"4\n");
        let mut output = Vec::new();

        let lang = ui.select_language_with_io(&mut input, &mut output).unwrap();
        assert_eq!(lang, Language::Rust);
    }

    #[test]
    fn test_language_cancellation_falls_back() {
        let ui = MenuUi::new();
        for text in ["\n", "99\n", "rust\n", ""] {
            let mut input = Cursor::new(text.as_bytes());
            let mut output = Vec::new();
            let lang = ui.select_language_with_io(&mut input, &mut output).unwrap();
            assert_eq!(lang, Language::FALLBACK, "for input {:?}", text);
        }
    }

    #[test]
    fn test_confirm_only_explicit_yes() {
        let ui = MenuUi::new();
        for (text, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
            let mut input = Cursor::new(text.as_bytes());
            let mut output = Vec::new();
            let answer = ui.confirm_with_io("Proceed?", &mut input, &mut output).unwrap();
            assert_eq!(answer, expected, "for input {:?}", text);
        }
    }

    #[test]
    fn test_field_empty_input_cancels() {
        let ui = MenuUi::new();
        let mut input = Cursor::new(b"\n");
        let mut output = Vec::new();
        assert!(ui.read_field_with_io("Token", &mut input, &mut output).unwrap().is_none());
    }

    #[test]
    fn test_history_rendering() {
        let ui = MenuUi::new();
        let entries = vec![HistoryEntry {
            timestamp: datetime!(2025-03-01 09:15:00 UTC),
            prompt: "fizzbuzz".to_string(),
            language: Language::Rust,
            file_path: "generated/fizzbuzz.rs".to_string(),
        }];
        let mut output = Vec::new();

        ui.show_history_with_io(&entries, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("2025-03-01T09:15:00Z"));
        assert!(text.contains("fizzbuzz"));
        assert!(text.contains("generated/fizzbuzz.rs"));
    }

    #[test]
    fn test_empty_history_message() {
        let ui = MenuUi::new();
        let mut output = Vec::new();

        ui.show_history_with_io(&[], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("No generations recorded yet"));
    }
}
