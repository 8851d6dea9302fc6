use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::I18nError;
use crate::I18nResult;

/// Environment variable holding the DeepL authentication key.
pub const DEEPL_API_KEY_ENV: &str = "DEEPL_API_KEY";
/// Environment variable overriding the DeepL endpoint.
pub const DEEPL_API_URL_ENV: &str = "DEEPL_API_URL";

const DEEPL_FREE_URL: &str = "https://api-free.deepl.com";
const DEEPL_PRO_URL: &str = "https://api.deepl.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can translate text into another language.
pub trait Translator {
	/// Translate `text` into the language identified by `target_lang`
	/// (e.g. `DE`, `PT-BR`).
	fn translate(&self, text: &str, target_lang: &str) -> I18nResult<String>;
}

/// Translator backed by the DeepL REST API.
#[derive(Debug, Clone)]
pub struct DeeplTranslator {
	auth_key: String,
	base_url: String,
	client: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
	text: [&'a str; 1],
	target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
	translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
	text: String,
}

impl DeeplTranslator {
	/// Create a client for `auth_key`. Free-tier keys (ending in `:fx`) talk
	/// to the free endpoint.
	pub fn new(auth_key: impl Into<String>) -> I18nResult<Self> {
		let auth_key = auth_key.into();
		let base_url = if auth_key.ends_with(":fx") {
			DEEPL_FREE_URL
		} else {
			DEEPL_PRO_URL
		};

		let client = reqwest::blocking::Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.user_agent(concat!("readme-i18n/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|e| {
				I18nError::Translation {
					language: String::new(),
					reason: format!("failed to create HTTP client: {e}"),
				}
			})?;

		Ok(Self {
			auth_key,
			base_url: base_url.to_string(),
			client,
		})
	}

	/// Send requests to `base_url` instead of the public DeepL endpoint.
	#[must_use]
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into().trim_end_matches('/').to_string();
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}
}

impl Translator for DeeplTranslator {
	fn translate(&self, text: &str, target_lang: &str) -> I18nResult<String> {
		let failure = |reason: String| {
			I18nError::Translation {
				language: target_lang.to_string(),
				reason,
			}
		};

		let response = self
			.client
			.post(format!("{}/v2/translate", self.base_url))
			.header("Authorization", format!("DeepL-Auth-Key {}", self.auth_key))
			.json(&TranslateRequest {
				text: [text],
				target_lang,
			})
			.send()
			.map_err(|e| failure(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().unwrap_or_default();
			let reason = match status.as_u16() {
				403 => "authorization failed, check the DeepL API key".to_string(),
				429 => "too many requests, try again later".to_string(),
				456 => "the DeepL character quota has been exceeded".to_string(),
				_ if body.trim().is_empty() => format!("DeepL responded with {status}"),
				_ => format!("DeepL responded with {status}: {}", body.trim()),
			};
			return Err(failure(reason));
		}

		let payload: TranslateResponse = response
			.json()
			.map_err(|e| failure(format!("invalid response: {e}")))?;

		payload
			.translations
			.into_iter()
			.next()
			.map(|translation| translation.text)
			.ok_or_else(|| failure("DeepL returned no translations".to_string()))
	}
}
