use std::path::Path;
use std::path::PathBuf;

use regex::Match;
use regex::Regex;
use regex::RegexBuilder;
use serde::Deserialize;

use crate::I18nError;
use crate::I18nResult;
use crate::placeholders::placeholder_names;
use crate::placeholders::render_placeholders;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"readme-i18n.toml",
	".readme-i18n.toml",
	".config/readme-i18n.toml",
];

/// Consulted when none of [`CONFIG_FILE_CANDIDATES`] exist. Settings are read
/// from its `[tool.readme-i18n]` table.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

pub const DEFAULT_SOURCE_LANG: &str = "EN";
pub const DEFAULT_TARGET_LANG: &str = "DE";
pub const DEFAULT_SOURCE: &str = "README.md";
pub const DEFAULT_OUTPUT_DIR: &str = "translations";
pub const DEFAULT_FILENAME_TEMPLATE: &str = "{basename}.{lang}{ext}";
pub const DEFAULT_HEADER_TEMPLATE_PATH: &str = ".readme-i18n-header.md";
pub const DEFAULT_FLAGS_PATH: &str = "flags.json";
pub const DEFAULT_MARKER_START: &str = "<!-- readme-i18n start -->";
pub const DEFAULT_MARKER_END: &str = "<!-- readme-i18n end -->";
pub const DEFAULT_LINK_SEPARATOR: &str = " ·\n  ";

/// Placeholders accepted by the filename template.
pub const FILENAME_PLACEHOLDERS: [&str; 3] = ["basename", "lang", "ext"];

/// The pair of strings delimiting the generated header region.
#[derive(Debug, Clone)]
pub struct Markers {
	pub start: String,
	pub end: String,
	region: Regex,
	start_pattern: Regex,
	end_pattern: Regex,
}

impl PartialEq for Markers {
	fn eq(&self, other: &Self) -> bool {
		self.start == other.start && self.end == other.end
	}
}

impl Eq for Markers {}

impl Markers {
	/// Both markers must be non-empty and different from each other.
	pub fn new(start: impl Into<String>, end: impl Into<String>) -> I18nResult<Self> {
		let start = start.into();
		let end = end.into();

		if start.trim().is_empty() || end.trim().is_empty() {
			return Err(I18nError::InvalidConfig {
				key: "marker_start/marker_end".to_string(),
				reason: "markers must not be empty".to_string(),
			});
		}

		if start.eq_ignore_ascii_case(&end) {
			return Err(I18nError::InvalidConfig {
				key: "marker_start/marker_end".to_string(),
				reason: format!("start and end markers must differ (both are `{start}`)"),
			});
		}

		Self::compile(start, end).map_err(|e| {
			I18nError::InvalidConfig {
				key: "marker_start/marker_end".to_string(),
				reason: e.to_string(),
			}
		})
	}

	fn compile(start: String, end: String) -> Result<Self, regex::Error> {
		let escaped_start = regex::escape(&start);
		let escaped_end = regex::escape(&end);

		Ok(Self {
			region: marker_pattern(&format!(r"\A\s*{escaped_start}.*?{escaped_end}\n?"))?,
			start_pattern: marker_pattern(&escaped_start)?,
			end_pattern: marker_pattern(&escaped_end)?,
			start,
			end,
		})
	}

	/// Matches a header at the top of a document: optional leading
	/// whitespace, the start marker, everything up to the first end marker
	/// and one trailing newline. Markers are matched case-insensitively.
	///
	/// Marker text further down (inside a code block, say) is never part of
	/// the region.
	pub fn region(&self) -> &Regex {
		&self.region
	}

	/// First occurrence of the start marker in `text`, ignoring case.
	pub fn find_start<'h>(&self, text: &'h str) -> Option<Match<'h>> {
		self.start_pattern.find(text)
	}

	/// First occurrence of the end marker in `text`, ignoring case.
	pub fn find_end<'h>(&self, text: &'h str) -> Option<Match<'h>> {
		self.end_pattern.find(text)
	}
}

impl Default for Markers {
	fn default() -> Self {
		Self::compile(DEFAULT_MARKER_START.to_string(), DEFAULT_MARKER_END.to_string())
			.unwrap_or_else(|e| panic!("default markers must compile: {e}"))
	}
}

fn marker_pattern(pattern: &str) -> Result<Regex, regex::Error> {
	RegexBuilder::new(pattern)
		.case_insensitive(true)
		.dot_matches_new_line(true)
		.build()
}

/// Raw overrides as written by the user.
///
/// ```toml
/// source_lang = "EN"
/// languages = ["DE", "FR", "JA"]
/// source = "README.md"
/// output_dir = "translations"
/// template = "{basename}.{lang}{ext}"
/// header_template_path = ".readme-i18n-header.md"
/// flags_path = "flags.json"
/// marker_start = "<!-- readme-i18n start -->"
/// marker_end = "<!-- readme-i18n end -->"
/// link_separator = " ·\n  "
/// translate_labels = true
/// ```
///
/// Every key is optional. In `pyproject.toml` the same keys live under
/// `[tool.readme-i18n]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
	pub source_lang: Option<String>,
	pub languages: Option<Vec<String>>,
	pub source: Option<PathBuf>,
	pub output_dir: Option<PathBuf>,
	pub template: Option<String>,
	pub header_template_path: Option<PathBuf>,
	pub flags_path: Option<PathBuf>,
	pub marker_start: Option<String>,
	pub marker_end: Option<String>,
	pub link_separator: Option<String>,
	pub translate_labels: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
	#[serde(default)]
	tool: PyProjectTool,
}

#[derive(Debug, Default, Deserialize)]
struct PyProjectTool {
	#[serde(default, rename = "readme-i18n")]
	readme_i18n: Option<ConfigOverrides>,
}

impl ConfigOverrides {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.chain(std::iter::once(root.join(PYPROJECT_FILE)))
			.find(|path| path.is_file())
	}

	/// Load overrides from the first discovered config file at `root`.
	/// Returns `None` if no config file exists or a `pyproject.toml` has no
	/// `[tool.readme-i18n]` table.
	pub fn load(root: &Path) -> I18nResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let parse_error = |e: toml::de::Error| {
			I18nError::ConfigParse {
				path: config_path.display().to_string(),
				reason: e.to_string(),
			}
		};

		if config_path.file_name().is_some_and(|name| name == PYPROJECT_FILE) {
			let pyproject: PyProject = toml::from_str(&content).map_err(parse_error)?;
			return Ok(pyproject.tool.readme_i18n);
		}

		toml::from_str(&content).map(Some).map_err(parse_error)
	}
}

/// Fully resolved configuration for a run. Paths are absolute (joined onto
/// the repository root).
#[derive(Debug, Clone)]
pub struct Config {
	/// Language code of the source document.
	pub source_lang: String,
	/// Target language codes in the order they are processed. Duplicates are
	/// kept.
	pub languages: Vec<String>,
	/// The document that gets translated.
	pub source: PathBuf,
	/// Directory that receives the translations.
	pub output_dir: PathBuf,
	/// Filename pattern for translations using `{basename}`, `{lang}` and
	/// `{ext}`.
	pub template: String,
	/// User supplied header template. A built-in template is used when this
	/// file does not exist.
	pub header_template_path: PathBuf,
	/// JSON file mapping language codes to flag glyphs.
	pub flags_path: PathBuf,
	pub markers: Markers,
	/// Joins the individual language links inside the header.
	pub link_separator: String,
	/// Whether header labels are translated into each target language.
	pub translate_labels: bool,
}

impl Config {
	/// The configuration used when nothing is overridden.
	pub fn defaults(root: &Path) -> Self {
		Self {
			source_lang: DEFAULT_SOURCE_LANG.to_string(),
			languages: vec![DEFAULT_TARGET_LANG.to_string()],
			source: root.join(DEFAULT_SOURCE),
			output_dir: root.join(DEFAULT_OUTPUT_DIR),
			template: DEFAULT_FILENAME_TEMPLATE.to_string(),
			header_template_path: root.join(DEFAULT_HEADER_TEMPLATE_PATH),
			flags_path: root.join(DEFAULT_FLAGS_PATH),
			markers: Markers::default(),
			link_separator: DEFAULT_LINK_SEPARATOR.to_string(),
			translate_labels: true,
		}
	}

	/// Load the configuration for `root`.
	///
	/// Never fails: an unreadable or malformed config file falls back to all
	/// defaults and an invalid individual value falls back to the default for
	/// that key. Both cases are logged as warnings.
	pub fn load(root: &Path) -> Self {
		match ConfigOverrides::load(root) {
			Ok(Some(overrides)) => Self::from_overrides(root, overrides),
			Ok(None) => Self::defaults(root),
			Err(e) => {
				tracing::warn!("{e}; using default configuration");
				Self::defaults(root)
			}
		}
	}

	/// Apply `overrides` on top of the defaults.
	pub fn from_overrides(root: &Path, overrides: ConfigOverrides) -> Self {
		let defaults = Self::defaults(root);

		let markers = Markers::new(
			overrides
				.marker_start
				.unwrap_or_else(|| defaults.markers.start.clone()),
			overrides
				.marker_end
				.unwrap_or_else(|| defaults.markers.end.clone()),
		)
		.unwrap_or_else(|e| {
			tracing::warn!("{e}; using the default markers");
			defaults.markers.clone()
		});

		let template = match overrides.template {
			Some(template) => {
				validate_filename_template(&template).unwrap_or_else(|e| {
					tracing::warn!("{e}; using `{DEFAULT_FILENAME_TEMPLATE}`");
					defaults.template.clone()
				})
			}
			None => defaults.template.clone(),
		};

		let source_lang = overrides
			.source_lang
			.map(|lang| lang.trim().to_string())
			.filter(|lang| !lang.is_empty())
			.unwrap_or(defaults.source_lang);

		let languages = overrides
			.languages
			.map(|languages| {
				languages
					.into_iter()
					.map(|lang| lang.trim().to_string())
					.filter(|lang| !lang.is_empty())
					.collect()
			})
			.unwrap_or(defaults.languages);

		Self {
			source_lang,
			languages,
			source: overrides
				.source
				.map_or(defaults.source, |path| root.join(path)),
			output_dir: overrides
				.output_dir
				.map_or(defaults.output_dir, |path| root.join(path)),
			template,
			header_template_path: overrides
				.header_template_path
				.map_or(defaults.header_template_path, |path| root.join(path)),
			flags_path: overrides
				.flags_path
				.map_or(defaults.flags_path, |path| root.join(path)),
			markers,
			link_separator: overrides
				.link_separator
				.unwrap_or(defaults.link_separator),
			translate_labels: overrides
				.translate_labels
				.unwrap_or(defaults.translate_labels),
		}
	}

	/// Where the translation for `lang` is written.
	///
	/// With the default template, `README.md` and `DE` give
	/// `<output_dir>/README.DE.md`.
	pub fn output_path(&self, lang: &str) -> PathBuf {
		let basename = self
			.source
			.file_stem()
			.map(|stem| stem.to_string_lossy())
			.unwrap_or_default();
		let ext = self
			.source
			.extension()
			.map(|ext| format!(".{}", ext.to_string_lossy()))
			.unwrap_or_default();

		let file_name = render_placeholders(
			&self.template,
			&[("basename", &basename), ("lang", lang), ("ext", &ext)],
		);

		self.output_dir.join(file_name)
	}
}

/// Check that a filename template only uses the supported placeholders and
/// includes `{lang}` so every language gets its own file.
pub fn validate_filename_template(template: &str) -> I18nResult<String> {
	let names = placeholder_names(template);

	if let Some(unknown) = names
		.iter()
		.find(|name| !FILENAME_PLACEHOLDERS.contains(&name.as_str()))
	{
		return Err(I18nError::InvalidConfig {
			key: "template".to_string(),
			reason: format!(
				"unknown placeholder `{{{unknown}}}` (supported: {{basename}}, {{lang}}, {{ext}})"
			),
		});
	}

	if !names.iter().any(|name| name == "lang") {
		return Err(I18nError::InvalidConfig {
			key: "template".to_string(),
			reason: "the template must contain `{lang}`".to_string(),
		});
	}

	Ok(template.to_string())
}
