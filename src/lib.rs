//! fiat — an interactive AI code-generation studio.
//!
//! This library provides the building blocks for a menu-driven assistant
//! that asks a generative text model for source code and manages what
//! comes back. It supports:
//!
//! - **Code generation** via the Claude API
//! - **A persisted run history** with strict append-only ordering
//! - **Highlighted previews** through an optional external highlighter
//! - **In-place formatting** through per-language formatter binaries
//! - **Clipboard hand-off** and **gist publishing**
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management (API keys, paths)
//! - [`languages`] - The fixed language enumeration and formatter registry
//! - [`generator`] - AI-powered code generation
//! - [`workspace`] - Filename derivation and artifact writes
//! - [`history`] - The append-only run history store
//! - [`formatter`] - Formatter probing and execution
//! - [`preview`] - Best-effort syntax-highlighted previews
//! - [`clipboard`] - System clipboard hand-off
//! - [`gist`] - Publishing files as gists
//! - [`menu`] - Interactive dialogs
//! - [`session`] - The session-loop state machine
//! - [`process`] - Process runner abstraction
//! - [`http_client`] - HTTP client abstraction
//! - [`providers`] - Shared dependency injection traits
//!
//! # Example
//!
//! ```ignore
//! use fiat::config::Config;
//! use fiat::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     Session::from_config(&config).run().await
//! }
//! ```

pub mod clipboard;
pub mod config;
pub mod formatter;
pub mod generator;
pub mod gist;
pub mod history;
pub mod http_client;
pub mod languages;
pub mod menu;
pub mod preview;
pub mod process;
pub mod providers;
pub mod session;
pub mod workspace;
