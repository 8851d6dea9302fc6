//! `readme_i18n_core` is the core library behind the `readme-i18n` pre-commit hook. It translates a project's README into the configured languages with DeepL and keeps a language switcher header at the top of the README and of every translation.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Run controller (is the README part of this change?)
//!   → Header engine (refresh the switcher in the README itself)
//!   → Orchestrator, for each target language:
//!       → Segment protector (mask code fences, inline code, emoji)
//!       → Translator (DeepL)
//!       → Segment protector (restore the masked segments)
//!       → Header engine (stamp the translation with its own switcher)
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading from `readme-i18n.toml` or the `[tool.readme-i18n]` table of `pyproject.toml`.
//! - [`segments`] - Reversible masking of text that must not be translated.
//! - [`header`] - Building, stripping and re-inserting the marker-delimited header.
//! - [`orchestrator`] - Per-language translation and output files.
//! - [`run`] - The pre-commit flow: staged-file check, check mode and the missing credential policy.
//!
//! ## Key Types
//!
//! - [`Project`] - The repository root together with its configuration, flag table and header template.
//! - [`Translator`] - The translation capability; [`DeeplTranslator`] talks to DeepL.
//! - [`VersionControl`] - Staged files and staging; [`Git`] shells out to `git`.
//! - [`RunOutcome`] - What a run did and which exit code it maps to.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use readme_i18n_core::{DeeplTranslator, Git, Project, RunOptions, run};
//!
//! let git = Git::discover(Path::new("."));
//! let project = Project::load(git.root()).unwrap();
//! let translator = DeeplTranslator::new("my-key:fx").unwrap();
//!
//! let outcome = run(&project, &git, &RunOptions::default(), Some(&translator)).unwrap();
//! std::process::exit(outcome.exit_code());
//! ```

pub use config::Config;
pub use config::ConfigOverrides;
pub use config::Markers;
pub use error::*;
pub use flags::*;
pub use header::*;
pub use orchestrator::*;
pub use project::*;
pub use run::*;
pub use segments::*;
pub use translator::*;
pub use vcs::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod flags;
pub mod header;
pub mod orchestrator;
pub(crate) mod placeholders;
mod project;
pub mod run;
pub mod segments;
mod translator;
mod vcs;

#[cfg(test)]
mod __fixtures;
