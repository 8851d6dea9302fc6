use std::path::PathBuf;

use clap::Parser;
use readme_i18n_core::DEEPL_API_KEY_ENV;
use readme_i18n_core::DEEPL_API_URL_ENV;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Translate your README with DeepL and keep a language switcher in every copy.",
	long_about = "readme-i18n is a pre-commit hook that regenerates translations of your README \
	              whenever the README is part of a commit.\n\nCode blocks, inline code and emoji \
	              are kept out of the translation, and every document gets a header linking to \
	              all of the other languages.\n\nUsage as a pre-commit hook:\n  - repo: \
	              https://github.com/Sprtacus/readme-i18n\n    hooks:\n      - id: readme-i18n"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct I18nCli {
	/// Files in the commit. The README is only translated when it is one of
	/// them. Without any files the staged files are read from git.
	pub files: Vec<String>,

	/// Fail when the README is part of the commit instead of translating it.
	///
	/// Useful in CI to make sure translations were regenerated locally.
	#[arg(long, default_value_t = false)]
	pub check: bool,

	/// Path to the repository root. Defaults to the enclosing git repository.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// DeepL authentication key. Keys ending in `:fx` use the free API.
	#[arg(long, env = DEEPL_API_KEY_ENV, hide_env_values = true)]
	pub api_key: Option<String>,

	/// Override the DeepL API base url.
	#[arg(long, env = DEEPL_API_URL_ENV)]
	pub api_url: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
