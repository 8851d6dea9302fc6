use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum I18nError {
	#[error(transparent)]
	#[diagnostic(code(readme_i18n::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(readme_i18n::config_parse),
		help("check that the file is valid TOML; all settings fall back to their defaults")
	)]
	ConfigParse { path: String, reason: String },

	#[error("invalid value for `{key}`: {reason}")]
	#[diagnostic(code(readme_i18n::invalid_config))]
	InvalidConfig { key: String, reason: String },

	#[error("failed to load flag table `{path}`: {reason}")]
	#[diagnostic(
		code(readme_i18n::flag_table),
		help("the flag table must be a JSON object mapping language codes to strings")
	)]
	FlagTable { path: String, reason: String },

	#[error("translation to `{language}` failed: {reason}")]
	#[diagnostic(code(readme_i18n::translation))]
	Translation { language: String, reason: String },

	#[error("version control command failed: {0}")]
	#[diagnostic(
		code(readme_i18n::vcs),
		help("make sure `git` is installed and available on PATH")
	)]
	Vcs(String),
}

pub type I18nResult<T> = Result<T, I18nError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
