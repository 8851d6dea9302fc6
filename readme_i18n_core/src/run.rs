use std::path::PathBuf;

use crate::I18nResult;
use crate::Translator;
use crate::VersionControl;
use crate::header::ensure_header;
use crate::orchestrator::translate_document;
use crate::project::Project;

/// Inputs for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
	/// Files in the change. When empty, version control is asked for the
	/// staged files instead.
	pub files: Vec<String>,
	/// Fail when the source document is part of the change instead of
	/// translating it.
	pub check: bool,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunOutcome {
	/// The source document is not part of the change.
	NotStaged,
	/// Check mode found the source document in the change.
	CheckFailed,
	/// The source document changed but no translator credential is available.
	MissingCredential,
	/// Translation was attempted and no language succeeded.
	NothingTranslated,
	/// The translations that were written.
	Translated(Vec<PathBuf>),
}

impl RunOutcome {
	/// Returns true unless the run should block the change.
	pub fn is_success(&self) -> bool {
		!matches!(self, Self::CheckFailed | Self::NothingTranslated)
	}

	/// Process exit code for this outcome.
	pub fn exit_code(&self) -> i32 {
		i32::from(!self.is_success())
	}
}

/// Keep the source header current and regenerate translations when the
/// source document is part of the change.
///
/// `translator` is `None` when no credential is configured; that is reported
/// as [`RunOutcome::MissingCredential`], not as an error.
pub fn run(
	project: &Project,
	vcs: &dyn VersionControl,
	options: &RunOptions,
	translator: Option<&dyn Translator>,
) -> I18nResult<RunOutcome> {
	let config = &project.config;
	let source = project.source().to_path_buf();

	if ensure_header(project, &source, &config.source_lang, None)? {
		stage(vcs, std::slice::from_ref(&source));
	}

	let files = if options.files.is_empty() {
		vcs.staged_files().unwrap_or_else(|e| {
			tracing::warn!("could not list staged files: {e}");
			Vec::new()
		})
	} else {
		options.files.clone()
	};

	if !project.is_source_among(&files) {
		tracing::info!(
			"{} not staged; nothing to do.",
			project.relative(&source)
		);
		return Ok(RunOutcome::NotStaged);
	}

	if options.check {
		tracing::info!(
			"{} is staged; translations must be regenerated.",
			project.relative(&source)
		);
		return Ok(RunOutcome::CheckFailed);
	}

	let Some(translator) = translator else {
		tracing::warn!("No DEEPL_API_KEY found; skipping translation.");
		return Ok(RunOutcome::MissingCredential);
	};

	let created = translate_document(project, translator)?;
	if created.is_empty() {
		return Ok(RunOutcome::NothingTranslated);
	}

	stage(vcs, &created);
	Ok(RunOutcome::Translated(created))
}

fn stage(vcs: &dyn VersionControl, paths: &[PathBuf]) {
	if let Err(e) = vcs.stage(paths) {
		tracing::warn!("failed to stage files: {e}");
	}
}
