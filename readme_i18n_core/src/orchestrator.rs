use std::path::PathBuf;

use crate::I18nResult;
use crate::Translator;
use crate::header::compose_document;
use crate::header::header_for;
use crate::header::strip_header;
use crate::project::Project;
use crate::segments::protect;
use crate::segments::restore;

/// Translate `body` into `lang` without touching code or emoji.
///
/// When `lang` is the source language no request is made and the body is
/// returned unchanged.
pub fn translate_body(
	body: &str,
	translator: &dyn Translator,
	lang: &str,
	source_lang: &str,
) -> I18nResult<String> {
	let (masked, segments) = protect(body);
	let translated = if lang.eq_ignore_ascii_case(source_lang) {
		masked
	} else {
		translator.translate(&masked, lang)?
	};

	Ok(restore(&translated, &segments))
}

/// Generate a translation of the source document for every configured
/// language.
///
/// A language whose translation fails is logged and skipped. Returns the
/// paths that were written, in configured order.
pub fn translate_document(
	project: &Project,
	translator: &dyn Translator,
) -> I18nResult<Vec<PathBuf>> {
	let config = &project.config;
	let source = std::fs::read_to_string(project.source())?;
	let body = strip_header(&source, &config.markers);

	std::fs::create_dir_all(&config.output_dir)?;

	let mut created = Vec::with_capacity(config.languages.len());
	for lang in &config.languages {
		let text = match translate_body(&body, translator, lang, &config.source_lang) {
			Ok(text) => text,
			Err(e) => {
				tracing::error!("Error translating to {lang}: {e}");
				continue;
			}
		};

		let target = config.output_path(lang);
		if let Some(parent) = target.parent() {
			std::fs::create_dir_all(parent)?;
		}

		// The translated body is never run through `strip_header`.
		let header = header_for(project, &target, lang, Some(translator));
		std::fs::write(&target, compose_document(&header, &text))?;
		tracing::info!("Generated {}", project.relative(&target));

		created.push(target);
	}

	Ok(created)
}
