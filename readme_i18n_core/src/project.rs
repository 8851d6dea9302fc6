use std::path::Path;
use std::path::PathBuf;

use crate::FlagTable;
use crate::I18nResult;
use crate::config::Config;
use crate::header::HeaderTemplate;

/// Everything a run needs to know about the repository, loaded once at
/// startup.
#[derive(Debug, Clone)]
pub struct Project {
	root: PathBuf,
	pub config: Config,
	pub flags: FlagTable,
	pub header_template: HeaderTemplate,
}

impl Project {
	pub fn new(
		root: impl Into<PathBuf>,
		config: Config,
		flags: FlagTable,
		header_template: HeaderTemplate,
	) -> Self {
		Self {
			root: root.into(),
			config,
			flags,
			header_template,
		}
	}

	/// Load the configuration, flag table and header template for `root`.
	pub fn load(root: &Path) -> I18nResult<Self> {
		let config = Config::load(root);
		tracing::debug!("config: {config:?}");

		let flags = FlagTable::load(&config.flags_path);
		let header_template = HeaderTemplate::load(&config.header_template_path)?;

		Ok(Self::new(root, config, flags, header_template))
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Absolute path of the source document.
	pub fn source(&self) -> &Path {
		&self.config.source
	}

	/// Join a relative path onto the root. Absolute paths are returned as is.
	pub fn resolve(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.root.join(path)
		}
	}

	/// Root-relative, `/`-separated form of `path` used for display and for
	/// comparing against staged file names.
	pub fn relative(&self, path: &Path) -> String {
		let relative = path.strip_prefix(&self.root).unwrap_or(path);
		normalize_path(&relative.to_string_lossy())
	}

	/// Whether `files` (as reported by version control or passed on the
	/// command line) include the source document.
	pub fn is_source_among<S: AsRef<str>>(&self, files: &[S]) -> bool {
		let source = self.relative(self.source());
		files.iter().any(|file| {
			let file = file.as_ref().trim();
			let path = Path::new(file);
			let file = if path.is_absolute() {
				self.relative(path)
			} else {
				normalize_path(file)
			};
			file == source
		})
	}
}

/// Use `/` separators and drop a leading `./`.
fn normalize_path(path: &str) -> String {
	let normalized = path.replace('\\', "/");
	let mut trimmed = normalized.as_str();
	while let Some(rest) = trimmed.strip_prefix("./") {
		trimmed = rest;
	}
	trimmed.to_string()
}
