use std::collections::HashMap;
use std::path::Path;

use derive_more::Deref;

use crate::I18nError;
use crate::I18nResult;

/// Display glyphs (usually flag emoji) keyed by uppercased language code.
///
/// ```json
/// { "en": "🇬🇧", "de": "🇩🇪", "ja": "🇯🇵" }
/// ```
///
/// There are no built-in glyphs: a language without an entry is rendered
/// without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct FlagTable(HashMap<String, String>);

impl FlagTable {
	pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: AsRef<str>,
		V: Into<String>,
	{
		Self(
			entries
				.into_iter()
				.map(|(code, glyph)| (code.as_ref().to_uppercase(), glyph.into()))
				.collect(),
		)
	}

	/// The glyph for `code`, matched case-insensitively.
	pub fn glyph(&self, code: &str) -> Option<&str> {
		self.0.get(&code.to_uppercase()).map(String::as_str)
	}

	/// Parse a JSON object of `code -> glyph` pairs.
	pub fn parse(content: &str, path_display: &str) -> I18nResult<Self> {
		let entries: HashMap<String, String> =
			serde_json::from_str(content).map_err(|e| {
				I18nError::FlagTable {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?;

		Ok(Self::new(entries))
	}

	/// Load the table from `path`. A missing file gives an empty table; a
	/// malformed one is logged and also gives an empty table.
	pub fn load(path: &Path) -> Self {
		let Ok(content) = std::fs::read_to_string(path) else {
			return Self::default();
		};

		Self::parse(&content, &path.display().to_string()).unwrap_or_else(|e| {
			tracing::warn!("{e}");
			Self::default()
		})
	}
}
