mod common;

use predicates::prelude::PredicateBooleanExt;
use readme_i18n_core::AnyEmptyResult;
use similar_asserts::assert_eq;

#[test]
fn unstaged_readme_only_gets_a_header() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("src/lib.rs")
		.assert()
		.success()
		.stderr(predicates::str::contains("README.md not staged"));

	let content = std::fs::read_to_string(tmp.path().join("README.md"))?;
	assert!(content.starts_with("<!-- readme-i18n start -->\n"));
	assert!(content.contains("<a href=\"translations/README.DE.md\">DE</a>"));
	assert!(content.ends_with(common::README));
	assert!(!tmp.path().join("translations").exists());

	Ok(())
}

#[test]
fn header_is_stable_across_runs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	let first = std::fs::read_to_string(tmp.path().join("README.md"))?;

	common::readme_i18n_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("Header updated").not());
	let second = std::fs::read_to_string(tmp.path().join("README.md"))?;

	assert_eq!(first, second);

	Ok(())
}

#[test]
fn staged_readme_without_key_is_skipped() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("README.md")
		.assert()
		.success()
		.stderr(predicates::str::contains("No DEEPL_API_KEY found"));

	assert!(!tmp.path().join("translations").exists());

	Ok(())
}

#[test]
fn blank_key_counts_as_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.env("DEEPL_API_KEY", "  ")
		.arg("--path")
		.arg(tmp.path())
		.arg("./README.md")
		.assert()
		.success()
		.stderr(predicates::str::contains("No DEEPL_API_KEY found"));

	Ok(())
}

#[test]
fn unreachable_translation_service_fails_the_run() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.env("DEEPL_API_KEY", "test-key:fx")
		.env("DEEPL_API_URL", "http://127.0.0.1:9")
		.arg("--path")
		.arg(tmp.path())
		.arg("README.md")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Error translating to DE"))
		.stderr(predicates::str::contains("no translation could be generated"));

	assert!(!tmp.path().join("translations").join("README.DE.md").exists());

	Ok(())
}

#[test]
fn outside_a_repository_nothing_is_staged() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());
	let ceiling = tmp.path().parent().unwrap_or(tmp.path());

	common::readme_i18n_cmd()
		.env("GIT_CEILING_DIRECTORIES", ceiling)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("could not list staged files"));

	Ok(())
}

#[test]
fn key_is_read_from_dotenv_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());
	std::fs::write(
		tmp.path().join(".env"),
		"# local secrets\nDEEPL_API_KEY=test-key:fx\nDEEPL_API_URL=http://127.0.0.1:9\n",
	)?;

	common::readme_i18n_cmd()
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.arg("README.md")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("using DeepL at http://127.0.0.1:9"))
		.stderr(predicates::str::contains("No DEEPL_API_KEY found").not())
		.stderr(predicates::str::contains("Error translating to DE"));

	Ok(())
}

#[test]
fn process_environment_wins_over_dotenv_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());
	std::fs::write(
		tmp.path().join(".env"),
		"DEEPL_API_KEY=from-dotenv:fx\nDEEPL_API_URL=http://127.0.0.1:1\n",
	)?;

	common::readme_i18n_cmd()
		.env("DEEPL_API_URL", "http://127.0.0.1:9")
		.arg("--verbose")
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.arg("Cargo.toml")
		.assert()
		.success()
		.stderr(predicates::str::contains("using DeepL at http://127.0.0.1:9"));

	Ok(())
}
