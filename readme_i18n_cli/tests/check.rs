mod common;

use clap::Parser;
use readme_i18n_cli::I18nCli;
use readme_i18n_core::AnyEmptyResult;
use rstest::rstest;

#[test]
fn check_fails_when_readme_is_staged() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.env("DEEPL_API_KEY", "never-used")
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.arg("README.md")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("translations are out of date"));

	assert!(!tmp.path().join("translations").exists());

	Ok(())
}

#[test]
fn check_passes_when_readme_is_not_staged() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_readme(tmp.path());

	common::readme_i18n_cmd()
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.arg("src/main.rs")
		.arg("Cargo.toml")
		.assert()
		.success();

	Ok(())
}

#[rstest]
#[case::files_only(&["readme-i18n", "README.md", "docs/a.md"], false, 2)]
#[case::check_flag(&["readme-i18n", "--check", "README.md"], true, 1)]
#[case::no_files(&["readme-i18n", "--check"], true, 0)]
fn cli_parses_files_and_flags(
	#[case] argv: &[&str],
	#[case] check: bool,
	#[case] file_count: usize,
) -> AnyEmptyResult {
	let cli = I18nCli::try_parse_from(argv)?;
	assert_eq!(cli.check, check);
	assert_eq!(cli.files.len(), file_count);

	Ok(())
}
