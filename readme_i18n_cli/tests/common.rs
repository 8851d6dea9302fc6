use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const README: &str = "# Demo\n\nHello world!\n\n```sh\ncargo install readme-i18n\n```\n";

pub fn readme_i18n_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("readme-i18n"));
	cmd.env("NO_COLOR", "1")
		.env_remove("DEEPL_API_KEY")
		.env_remove("DEEPL_API_URL")
		.env_remove("README_I18N_LOG")
		.env_remove("README_I18N_DEBUG");
	cmd
}

#[allow(dead_code)]
pub fn write_readme(root: &Path) {
	std::fs::write(root.join("README.md"), README)
		.unwrap_or_else(|e| panic!("failed to write readme: {e}"));
}
