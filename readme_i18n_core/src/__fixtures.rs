use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use crate::I18nError;
use crate::I18nResult;
use crate::Project;
use crate::Translator;
use crate::VersionControl;

/// Uppercases everything it is given and tags it with the target language.
/// Languages listed in `failing` return an error instead.
#[derive(Debug, Default)]
pub(crate) struct ShoutingTranslator {
	pub failing: Vec<String>,
	pub calls: RefCell<Vec<(String, String)>>,
}

impl ShoutingTranslator {
	pub fn failing_for(languages: &[&str]) -> Self {
		Self {
			failing: languages.iter().map(ToString::to_string).collect(),
			calls: RefCell::default(),
		}
	}

	pub fn call_count(&self) -> usize {
		self.calls.borrow().len()
	}

	pub fn languages_called(&self) -> Vec<String> {
		self.calls
			.borrow()
			.iter()
			.map(|(_, lang)| lang.clone())
			.collect()
	}
}

impl Translator for ShoutingTranslator {
	fn translate(&self, text: &str, target_lang: &str) -> I18nResult<String> {
		self.calls
			.borrow_mut()
			.push((text.to_string(), target_lang.to_string()));

		if self.failing.iter().any(|lang| lang == target_lang) {
			return Err(I18nError::Translation {
				language: target_lang.to_string(),
				reason: "quota exceeded".to_string(),
			});
		}

		Ok(format!("[{target_lang}] {}", text.to_uppercase()))
	}
}

/// Version control stand-in with a fixed staged set that records what it
/// was asked to stage.
#[derive(Debug, Default)]
pub(crate) struct FakeVcs {
	pub staged: Vec<String>,
	pub fail_listing: bool,
	pub staged_calls: RefCell<Vec<Vec<PathBuf>>>,
}

impl FakeVcs {
	pub fn with_staged(files: &[&str]) -> Self {
		Self {
			staged: files.iter().map(ToString::to_string).collect(),
			..Self::default()
		}
	}

	pub fn staged_paths(&self) -> Vec<PathBuf> {
		self.staged_calls.borrow().iter().flatten().cloned().collect()
	}
}

impl VersionControl for FakeVcs {
	fn staged_files(&self) -> I18nResult<Vec<String>> {
		if self.fail_listing {
			return Err(I18nError::Vcs("not a git repository".to_string()));
		}

		Ok(self.staged.clone())
	}

	fn stage(&self, paths: &[PathBuf]) -> I18nResult<()> {
		self.staged_calls.borrow_mut().push(paths.to_vec());
		Ok(())
	}
}

pub(crate) const SAMPLE_README: &str = "# Demo\n\nHello world 👋🏽!\n\nRun `cargo \
                                        test` first.\n\n```rust\nfn main() {}\n```\n";

/// Write `readme-i18n.toml` (when non-empty) and `README.md`, then load the
/// project.
pub(crate) fn create_project(root: &Path, config: &str, readme: &str) -> Project {
	if !config.is_empty() {
		std::fs::write(root.join("readme-i18n.toml"), config)
			.unwrap_or_else(|e| panic!("failed to write config: {e}"));
	}
	std::fs::write(root.join("README.md"), readme)
		.unwrap_or_else(|e| panic!("failed to write readme: {e}"));

	Project::load(root).unwrap_or_else(|e| panic!("failed to load project: {e}"))
}

pub(crate) fn read(path: impl AsRef<Path>) -> String {
	std::fs::read_to_string(path.as_ref())
		.unwrap_or_else(|e| panic!("failed to read {}: {e}", path.as_ref().display()))
}

pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> usize {
	haystack.matches(needle).count()
}
