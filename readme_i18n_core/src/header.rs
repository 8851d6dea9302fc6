use std::path::Path;

use crate::FlagTable;
use crate::I18nResult;
use crate::Translator;
use crate::config::Config;
use crate::config::Markers;
use crate::placeholders::render_placeholders;
use crate::project::Project;

/// Used when no header template file exists.
pub const DEFAULT_HEADER_TEMPLATE: &str = "<p align=\"right\">\n  \
                                           <strong>{languages_label}</strong> {links}<br>\n  \
                                           <sub>{credit}</sub>\n</p>";

pub const LANGUAGES_LABEL: &str = "Languages:";
pub const CREDIT_LABEL: &str = "generated with <a \
                                href=\"https://github.com/Sprtacus/readme-i18n/\">readme-i18n</a> \
                                using DeepL";

/// The raw header template. Supports the `{links}`, `{languages_label}` and
/// `{credit}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate(String);

impl HeaderTemplate {
	pub fn new(template: impl Into<String>) -> Self {
		Self(template.into().trim_end().to_string())
	}

	/// Read the template at `path`, or use [`DEFAULT_HEADER_TEMPLATE`] when the
	/// file does not exist.
	pub fn load(path: &Path) -> I18nResult<Self> {
		if !path.is_file() {
			return Ok(Self::default());
		}

		Ok(Self::new(std::fs::read_to_string(path)?))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for HeaderTemplate {
	fn default() -> Self {
		Self::new(DEFAULT_HEADER_TEMPLATE)
	}
}

/// The static strings shown in every header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels {
	pub languages: String,
	pub credit: String,
}

impl Default for HeaderLabels {
	fn default() -> Self {
		Self {
			languages: LANGUAGES_LABEL.to_string(),
			credit: CREDIT_LABEL.to_string(),
		}
	}
}

impl HeaderLabels {
	/// Labels for a header addressed to `language`. They are only translated
	/// when `translate_labels` is enabled and a translator is available.
	pub fn for_language(
		config: &Config,
		language: &str,
		translator: Option<&dyn Translator>,
	) -> Self {
		let defaults = Self::default();
		if !config.translate_labels {
			return defaults;
		}

		Self {
			languages: localize_label(
				&defaults.languages,
				language,
				&config.source_lang,
				translator,
			),
			credit: localize_label(&defaults.credit, language, &config.source_lang, translator),
		}
	}
}

/// Translate a static label into `language`.
///
/// The label comes back unchanged when `language` is the source language,
/// when there is no translator, or when translation fails.
pub fn localize_label(
	label: &str,
	language: &str,
	source_lang: &str,
	translator: Option<&dyn Translator>,
) -> String {
	let Some(translator) = translator else {
		return label.to_string();
	};

	if language.eq_ignore_ascii_case(source_lang) {
		return label.to_string();
	}

	match translator.translate(label, language) {
		Ok(translated) => translated,
		Err(e) => {
			tracing::debug!("keeping untranslated label `{label}`: {e}");
			label.to_string()
		}
	}
}

/// Whether `document` starts with a complete header region.
pub fn has_header(document: &str, markers: &Markers) -> bool {
	markers.region().is_match(document)
}

/// Remove the header region from the top of `document` and return the body.
///
/// A header only counts when the start marker is the first thing in the
/// document (after whitespace); it ends at the first end marker after it.
/// Marker text anywhere else is body content. Leading whitespace is trimmed
/// from what remains.
pub fn strip_header(document: &str, markers: &Markers) -> String {
	markers
		.region()
		.replacen(document, 1, "")
		.trim_start()
		.to_string()
}

/// Render the header template and wrap it in the markers.
///
/// Markers missing from the template (compared case-insensitively) are added
/// on their own line. Template text outside the marker pair is dropped so the
/// whole header can always be removed again by [`strip_header`].
pub fn build_header(
	template: &HeaderTemplate,
	markers: &Markers,
	links: &str,
	labels: &HeaderLabels,
) -> String {
	let rendered = render_placeholders(
		template.as_str(),
		&[
			("links", links),
			("languages_label", &labels.languages),
			("credit", &labels.credit),
		],
	);

	let mut header = String::with_capacity(
		rendered.len() + markers.start.len() + markers.end.len() + 2,
	);
	if markers.find_start(&rendered).is_none() {
		header.push_str(&markers.start);
		header.push('\n');
	}
	header.push_str(&rendered);

	let closed = markers
		.find_start(&header)
		.is_some_and(|start| markers.find_end(&header[start.end()..]).is_some());
	if !closed {
		header.push('\n');
		header.push_str(&markers.end);
	}

	let region = markers.find_start(&header).and_then(|start| {
		markers
			.find_end(&header[start.end()..])
			.map(|end| header[start.start()..start.end() + end.end()].to_string())
	});

	match region {
		Some(region) if region != header => {
			tracing::warn!("ignoring header template content outside of the markers");
			region
		}
		_ => header,
	}
}

/// Build the language switcher for the document at `current`.
///
/// The source document comes first, followed by every target language in
/// configured order. Each link is relative to the directory of `current`.
pub fn build_links(config: &Config, flags: &FlagTable, current: &Path) -> String {
	let base = current.parent().unwrap_or_else(|| Path::new(""));

	let mut links = Vec::with_capacity(config.languages.len() + 1);
	links.push(render_link(base, &config.source, &config.source_lang, flags));
	for lang in &config.languages {
		links.push(render_link(base, &config.output_path(lang), lang, flags));
	}

	links.join(&config.link_separator)
}

fn render_link(base: &Path, target: &Path, code: &str, flags: &FlagTable) -> String {
	let href = relative_href(target, base);
	match flags.glyph(code) {
		Some(glyph) if !glyph.is_empty() => format!("<a href=\"{href}\">{glyph} {code}</a>"),
		_ => format!("<a href=\"{href}\">{code}</a>"),
	}
}

/// The path to `target` relative to the directory `base`, always using `/`.
pub fn relative_href(target: &Path, base: &Path) -> String {
	pathdiff::diff_paths(target, base)
		.unwrap_or_else(|| target.to_path_buf())
		.to_string_lossy()
		.replace('\\', "/")
}

/// The header for the document at `path`, addressed to `language`.
pub fn header_for(
	project: &Project,
	path: &Path,
	language: &str,
	translator: Option<&dyn Translator>,
) -> String {
	let config = &project.config;
	let links = build_links(config, &project.flags, path);
	let labels = HeaderLabels::for_language(config, language, translator);
	build_header(&project.header_template, &config.markers, &links, &labels)
}

/// Join a header and a body: one blank line between them, a single trailing
/// newline.
pub fn compose_document(header: &str, body: &str) -> String {
	let mut content = format!("{header}\n\n{}", body.trim_start())
		.trim_end()
		.to_string();
	content.push('\n');
	content
}

/// The document content with a freshly built header in place of the old one.
pub fn render_document(
	existing: &str,
	project: &Project,
	path: &Path,
	language: &str,
	translator: Option<&dyn Translator>,
) -> String {
	let body = strip_header(existing, &project.config.markers);
	compose_document(&header_for(project, path, language, translator), &body)
}

/// Add or refresh the header of the document at `path`.
///
/// A missing document is treated as empty. The file is only written when its
/// content changes; the return value tells whether a write happened.
pub fn ensure_header(
	project: &Project,
	path: &Path,
	language: &str,
	translator: Option<&dyn Translator>,
) -> I18nResult<bool> {
	let path = project.resolve(path);
	let existing = match std::fs::read_to_string(&path) {
		Ok(content) => content,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
		Err(e) => return Err(e.into()),
	};

	let content = render_document(&existing, project, &path, language, translator);
	if content == existing {
		return Ok(false);
	}

	std::fs::write(&path, content)?;
	tracing::info!("Header updated in {}", project.relative(&path));

	Ok(true)
}
