use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap_or_else(|e| panic!("{e}"))
});

/// Substitute `{name}` placeholders in `template` with the matching value.
///
/// `{{` and `}}` render as literal braces. Placeholders without a value are
/// left in place so a typo in a user template is visible in the output
/// rather than silently dropped.
pub fn render_placeholders(template: &str, values: &[(&str, &str)]) -> String {
	PLACEHOLDER
		.replace_all(template, |caps: &Captures<'_>| {
			match caps.get(1) {
				None if &caps[0] == "{{" => "{".to_string(),
				None => "}".to_string(),
				Some(name) => {
					values
						.iter()
						.find(|(key, _)| *key == name.as_str())
						.map_or_else(|| caps[0].to_string(), |(_, value)| (*value).to_string())
				}
			}
		})
		.into_owned()
}

/// List the placeholder names used in `template`, in order of appearance.
pub fn placeholder_names(template: &str) -> Vec<String> {
	PLACEHOLDER
		.captures_iter(template)
		.filter_map(|caps| caps.get(1).map(|name| name.as_str().to_string()))
		.collect()
}
