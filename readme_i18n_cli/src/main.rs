use std::path::Path;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use clap::Parser;
use owo_colors::OwoColorize;
use readme_i18n_cli::I18nCli;
use readme_i18n_core::DEEPL_API_KEY_ENV;
use readme_i18n_core::DEEPL_API_URL_ENV;
use readme_i18n_core::DeeplTranslator;
use readme_i18n_core::Git;
use readme_i18n_core::I18nResult;
use readme_i18n_core::Project;
use readme_i18n_core::RunOptions;
use readme_i18n_core::RunOutcome;
use readme_i18n_core::Translator;
use readme_i18n_core::run;
use tracing_subscriber::EnvFilter;

/// Full `tracing` filter directive, e.g. `readme_i18n_core=trace`.
const LOG_ENV: &str = "README_I18N_LOG";
/// Any value switches the default log level to `debug`.
const DEBUG_ENV: &str = "README_I18N_DEBUG";
/// Fallback source for the DeepL settings, relative to the repository root.
const DOTENV_FILE: &str = ".env";

static USE_COLOR: AtomicBool = AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = I18nCli::parse();

	// Respect NO_COLOR env var, --no-color flag and terminals without color.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(&args, use_color);

	match run_hook(&args) {
		Ok(outcome) => {
			print_summary(&outcome);
			process::exit(outcome.exit_code());
		}
		Err(e) => {
			let report: miette::Report = e.into();
			eprintln!("{report:?}");
			process::exit(2);
		}
	}
}

fn init_logging(args: &I18nCli, use_color: bool) {
	let level = if args.verbose || std::env::var_os(DEBUG_ENV).is_some() {
		"debug"
	} else {
		"info"
	};

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
		EnvFilter::new(format!("warn,readme_i18n_core={level},readme_i18n={level}"))
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn run_hook(args: &I18nCli) -> I18nResult<RunOutcome> {
	let git = match &args.path {
		Some(path) => Git::new(std::path::absolute(path)?),
		None => Git::discover(&std::env::current_dir()?),
	};
	let project = Project::load(git.root())?;

	let api_key = args
		.api_key
		.clone()
		.or_else(|| dotenv_value(git.root(), DEEPL_API_KEY_ENV));
	let api_url = args
		.api_url
		.clone()
		.or_else(|| dotenv_value(git.root(), DEEPL_API_URL_ENV));

	let translator = match api_key.as_deref().map(str::trim) {
		Some(key) if !key.is_empty() => {
			let translator = DeeplTranslator::new(key)?;
			Some(match api_url {
				Some(url) => translator.with_base_url(url),
				None => translator,
			})
		}
		_ => None,
	};
	if let Some(translator) = &translator {
		tracing::debug!("using DeepL at {}", translator.base_url());
	}

	let options = RunOptions {
		files: args.files.clone(),
		check: args.check,
	};

	run(
		&project,
		&git,
		&options,
		translator.as_ref().map(|t| t as &dyn Translator),
	)
}

fn print_summary(outcome: &RunOutcome) {
	match outcome {
		RunOutcome::Translated(paths) => {
			let noun = if paths.len() == 1 {
				"translation"
			} else {
				"translations"
			};
			println!(
				"{} {} {noun} generated",
				colored!("✓", green),
				colored!(paths.len(), bold)
			);
		}
		RunOutcome::CheckFailed => {
			eprintln!(
				"{} translations are out of date; run `readme-i18n` without `--check`",
				colored!("error:", red)
			);
		}
		RunOutcome::NothingTranslated => {
			eprintln!(
				"{} no translation could be generated",
				colored!("error:", red)
			);
		}
		_ => {}
	}
}

/// Read `key` from `<root>/.env`. Only consulted when neither the flag nor
/// the process environment provides a value.
fn dotenv_value(root: &Path, key: &str) -> Option<String> {
	let path = root.join(DOTENV_FILE);
	let entries = match dotenvy::from_path_iter(&path) {
		Ok(entries) => entries,
		Err(e) if e.not_found() => return None,
		Err(e) => {
			tracing::warn!("failed to read {}: {e}", path.display());
			return None;
		}
	};

	for entry in entries {
		match entry {
			Ok((name, value)) if name == key => return Some(value),
			Ok(_) => {}
			Err(e) => {
				tracing::warn!("failed to parse {}: {e}", path.display());
				return None;
			}
		}
	}

	None
}
