use std::sync::LazyLock;

use derive_more::Deref;
use regex::Captures;
use regex::Regex;

/// Prefix of every sentinel token produced by [`protect`].
pub const TOKEN_PREFIX: &str = "__RMI18N_";
/// Suffix of every sentinel token produced by [`protect`].
pub const TOKEN_SUFFIX: &str = "__";

/// Single emoji codepoints (and flag pairs) that must survive translation.
const EMOJI: &str = concat!(
	r"[\x{1F600}-\x{1F64F}]",
	r"|[\x{1F300}-\x{1F5FF}]",
	r"|[\x{1F680}-\x{1F6FF}]",
	r"|[\x{1F1E6}-\x{1F1FF}]{2}",
	r"|[\x{2600}-\x{26FF}]",
	r"|[\x{2700}-\x{27BF}]",
	r"|[\x{1F900}-\x{1F9FF}]",
	r"|[\x{1FA70}-\x{1FAFF}]",
	r"|[\x{2500}-\x{2BEF}]",
	r"|[\x{1F018}-\x{1F270}]",
	r"|[\x{1F000}-\x{1F02F}]",
);

/// Skin tones, zero-width joiner and the emoji variation selector.
const EMOJI_MODIFIERS: &str = r"[\x{1F3FB}-\x{1F3FF}\x{200D}\x{FE0F}]";

// Alternation order is the precedence order: fences win over inline code,
// inline code wins over emoji.
static PROTECTED: LazyLock<Regex> = LazyLock::new(|| {
	let pattern = format!(r"(?s:```.*?```)|`[^`\n]+`|(?:{EMOJI})(?:{EMOJI_MODIFIERS})*");
	Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid segment pattern: {e}"))
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"__RMI18N_(\d+)__").unwrap_or_else(|e| panic!("invalid token pattern: {e}"))
});

/// A region of the source text that was replaced by a sentinel token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSegment {
	/// The sentinel that stands in for the original text.
	pub token: String,
	/// The exact original text, including any backtick delimiters.
	pub original: String,
}

/// Ordered mapping from sentinel tokens back to the text they replaced.
///
/// The `n`th entry always holds the token `__RMI18N_<n>__`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct SegmentMap(Vec<ProtectedSegment>);

impl SegmentMap {
	/// Look up the original text for a token.
	pub fn original(&self, token: &str) -> Option<&str> {
		let index = token
			.strip_prefix(TOKEN_PREFIX)?
			.strip_suffix(TOKEN_SUFFIX)?
			.parse::<usize>()
			.ok()?;
		self.0
			.get(index)
			.filter(|segment| segment.token == token)
			.map(|segment| segment.original.as_str())
	}
}

/// Build the sentinel token for the `index`th protected segment.
pub fn segment_token(index: usize) -> String {
	format!("{TOKEN_PREFIX}{index}{TOKEN_SUFFIX}")
}

/// Replace fenced code blocks, inline code spans and emoji with sentinel
/// tokens so a translation service cannot alter them.
///
/// Returns the masked text together with the [`SegmentMap`] needed by
/// [`restore`].
pub fn protect(text: &str) -> (String, SegmentMap) {
	let mut segments = Vec::new();
	let masked = PROTECTED.replace_all(text, |caps: &Captures<'_>| {
		let token = segment_token(segments.len());
		segments.push(ProtectedSegment {
			token: token.clone(),
			original: caps[0].to_string(),
		});
		token
	});

	(masked.into_owned(), SegmentMap(segments))
}

/// Undo [`protect`]: put every original segment back in place of its token.
///
/// Tokens are matched whole, so `__RMI18N_1__` is never confused with
/// `__RMI18N_10__`. Token-shaped text that is not in `segments` is kept as is.
pub fn restore(text: &str, segments: &SegmentMap) -> String {
	if segments.is_empty() {
		return text.to_string();
	}

	TOKEN
		.replace_all(text, |caps: &Captures<'_>| {
			segments
				.original(&caps[0])
				.map_or_else(|| caps[0].to_string(), str::to_string)
		})
		.into_owned()
}
