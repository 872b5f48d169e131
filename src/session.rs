//! The interactive session loop.
//!
//! A small state machine sequences the menu branches: generate new code,
//! view history, publish a gist, exit. Each branch runs to completion and
//! control returns to the main menu; only an explicit exit (or closed
//! input at the menu) terminates the session.

use crate::clipboard;
use crate::config::Config;
use crate::formatter;
use crate::generator::{CodeGenerator, LlmGenerator, MockGenerator};
use crate::gist::GistPublisher;
use crate::history::{HistoryEntry, HistoryStore};
use crate::http_client::ReqwestHttpClient;
use crate::menu::{MainChoice, MenuUi};
use crate::preview;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::providers::{Clock, SystemClock};
use crate::workspace::Workspace;
use anyhow::Result;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// How many history entries the view shows.
const HISTORY_VIEW_LIMIT: usize = 10;

/// States of the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    MainMenu,
    NewCodeFlow,
    ViewHistory,
    CreateGist,
    Terminated,
}

/// Owns the components of one interactive session and drives the loop.
pub struct Session {
    generator: Box<dyn CodeGenerator>,
    workspace: Workspace,
    history: HistoryStore,
    publisher: GistPublisher,
    ui: MenuUi,
    clock: Box<dyn Clock>,
}

impl Session {
    pub fn new(
        generator: Box<dyn CodeGenerator>,
        workspace: Workspace,
        history: HistoryStore,
        publisher: GistPublisher,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            generator,
            workspace,
            history,
            publisher,
            ui: MenuUi::new(),
            clock,
        }
    }

    /// Wires up a session from configuration. Mock mode swaps the network
    /// generator for the deterministic one.
    pub fn from_config(config: &Config) -> Self {
        let generator: Box<dyn CodeGenerator> = if config.is_mock_mode() {
            info!("Using mock generator (FIAT_USE_MOCK=1)");
            Box::new(MockGenerator::new())
        } else {
            Box::new(LlmGenerator::new(config, Box::new(ReqwestHttpClient::new())))
        };

        Self::new(
            generator,
            Workspace::new(&config.output_dir),
            HistoryStore::new(&config.history_file),
            GistPublisher::new(Box::new(ReqwestHttpClient::new())),
            Box::new(SystemClock),
        )
    }

    /// Runs the loop on stdin/stdout until the user exits.
    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        self.run_with_io(&mut input, &mut output, &SystemProcessRunner).await
    }

    /// Runs the loop with injected I/O and process runner (for testing).
    pub async fn run_with_io<R, W, P>(
        &self,
        input: &mut R,
        output: &mut W,
        runner: &P,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        P: ProcessRunner,
    {
        let mut state = SessionState::MainMenu;
        while state != SessionState::Terminated {
            state = self.step(state, input, output, runner).await?;
        }
        writeln!(output, "\n👋 Goodbye!")?;
        Ok(())
    }

    async fn step<R, W, P>(
        &self,
        state: SessionState,
        input: &mut R,
        output: &mut W,
        runner: &P,
    ) -> Result<SessionState>
    where
        R: BufRead,
        W: Write,
        P: ProcessRunner,
    {
        match state {
            SessionState::MainMenu => {
                let next = match self.ui.main_choice_with_io(input, output)? {
                    MainChoice::NewCode => SessionState::NewCodeFlow,
                    MainChoice::ViewHistory => SessionState::ViewHistory,
                    MainChoice::CreateGist => SessionState::CreateGist,
                    MainChoice::Exit => SessionState::Terminated,
                };
                Ok(next)
            }
            SessionState::NewCodeFlow => {
                self.new_code_flow(input, output, runner).await?;
                Ok(SessionState::MainMenu)
            }
            SessionState::ViewHistory => {
                self.view_history(output)?;
                Ok(SessionState::MainMenu)
            }
            SessionState::CreateGist => {
                self.create_gist(input, output).await?;
                Ok(SessionState::MainMenu)
            }
            SessionState::Terminated => Ok(SessionState::Terminated),
        }
    }

    /// One full generation iteration: prompt, language, generate, preview,
    /// persist, format, clipboard, history. Generation failure aborts the
    /// iteration before anything touches disk.
    async fn new_code_flow<R, W, P>(
        &self,
        input: &mut R,
        output: &mut W,
        runner: &P,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        P: ProcessRunner,
    {
        let Some(prompt) = self.ui.read_prompt_with_io(input, output)? else {
            return Ok(());
        };
        let language = self.ui.select_language_with_io(input, output)?;

        writeln!(output, "\n⏳ Generating {} code...", language)?;
        let code = match self.generator.generate(&prompt, language).await {
            Ok(code) => code,
            Err(e) => {
                warn!("Generation failed: {}", e);
                writeln!(output, "❌ Generation failed: {}", e)?;
                return Ok(());
            }
        };

        if self.ui.confirm_with_io("Preview the code?", input, output)? {
            writeln!(output, "\n{}", "-".repeat(60))?;
            preview::render(&code, language, runner, output)?;
            writeln!(output, "{}", "-".repeat(60))?;
        }

        let path = match self.workspace.write(&prompt, language, &code) {
            Ok(path) => {
                writeln!(output, "💾 Saved to {}", path.display())?;
                path
            }
            Err(e) => {
                writeln!(output, "❌ {:#}", e)?;
                return Ok(());
            }
        };

        if let Some(spec) = formatter::probe(language, runner) {
            let question = format!("Format with {}?", spec.program);
            if self.ui.confirm_with_io(&question, input, output)? {
                match formatter::run(spec, &path, runner) {
                    Ok(()) => writeln!(output, "🧹 Formatted {}", path.display())?,
                    Err(e) => writeln!(output, "⚠️  Formatter failed (file kept as written): {}", e)?,
                }
            }
        }

        if self.ui.confirm_with_io("Copy to clipboard?", input, output)? {
            // Clipboard failures never block the flow; the result is
            // discarded on purpose.
            let _ = clipboard::copy(&code);
        }

        let entry = HistoryEntry {
            timestamp: self.clock.now(),
            prompt,
            language,
            file_path: path.to_string_lossy().into_owned(),
        };
        if let Err(e) = self.history.append(entry) {
            writeln!(output, "❌ Could not record history: {}", e)?;
        }

        Ok(())
    }

    fn view_history<W: Write>(&self, output: &mut W) -> Result<()> {
        match self.history.recent(HISTORY_VIEW_LIMIT) {
            Ok(entries) => self.ui.show_history_with_io(&entries, output)?,
            Err(e) => writeln!(output, "❌ Could not read history: {}", e)?,
        }
        Ok(())
    }

    /// Collects credential, description, visibility and filename, then
    /// publishes the file as a gist. Any failure is terminal for this
    /// action only.
    async fn create_gist<R, W>(&self, input: &mut R, output: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "\n🌐 Publish a file as a gist")?;

        let Some(token) = self.ui.read_field_with_io("GitHub token", input, output)? else {
            writeln!(output, "Cancelled.")?;
            return Ok(());
        };
        let description = self
            .ui
            .read_field_with_io("Description", input, output)?
            .unwrap_or_default();
        let public = self.ui.confirm_with_io("Make it public?", input, output)?;
        let Some(file) = self.ui.read_field_with_io("File to publish", input, output)? else {
            writeln!(output, "Cancelled.")?;
            return Ok(());
        };

        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                writeln!(output, "❌ Could not read {}: {}", file, e)?;
                return Ok(());
            }
        };

        let filename = Path::new(&file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(file.clone());

        match self
            .publisher
            .publish(&filename, &content, &token, &description, public)
            .await
        {
            Ok(url) => writeln!(output, "✅ Gist created: {}", url)?,
            Err(e) => writeln!(output, "❌ Publish failed: {}", e)?,
        }

        Ok(())
    }
}
